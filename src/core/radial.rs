//! Radial chart layout.
//!
//! Places each hospital on a polar chart centred on the reference point:
//! the angle spreads hospitals evenly around the circle and the radius is
//! proportional to distance. Only geometry is produced; colours, sizes and
//! drawing belong to the consumer.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::models::HospitalRecord;

/// Lower and upper end of the suggestive factor colour domain
pub const FACTOR_DOMAIN: (f64, f64) = (1.0, 10.0);

/// Geometry parameters of the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialConfig {
    #[serde(rename = "outerRadius")]
    pub outer_radius: f64,
    #[serde(rename = "ringSteps")]
    pub ring_steps: u32,
}

impl Default for RadialConfig {
    fn default() -> Self {
        // 700x550 canvas: min(width, height) / 2 - 40
        Self {
            outer_radius: 235.0,
            ring_steps: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialPoint {
    pub name: String,
    pub angle: f64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "suggestiveFactor")]
    pub suggestive_factor: f64,
    /// Position of the suggestive factor in [`FACTOR_DOMAIN`], clamped to 0..=1
    #[serde(rename = "colourPosition")]
    pub colour_position: f64,
    pub recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialRing {
    pub radius: f64,
    #[serde(rename = "labelKm")]
    pub label_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialChart {
    #[serde(rename = "outerRadius")]
    pub outer_radius: f64,
    #[serde(rename = "maxDistanceKm")]
    pub max_distance_km: f64,
    pub points: Vec<RadialPoint>,
    pub rings: Vec<RadialRing>,
}

/// Lay out annotated hospitals on the radial chart
///
/// `recommended` is an index into `hospitals`. Distances beyond
/// `max_distance_km` are pinned to the outer ring.
pub fn radial_layout(
    hospitals: &[HospitalRecord],
    recommended: Option<usize>,
    max_distance_km: f64,
    config: &RadialConfig,
) -> RadialChart {
    let count = hospitals.len();

    let points = hospitals
        .iter()
        .enumerate()
        .map(|(index, hospital)| {
            let angle = TAU * index as f64 / count as f64;
            let radius = radial_fraction(hospital.distance_km, max_distance_km) * config.outer_radius;

            RadialPoint {
                name: hospital.name.clone(),
                angle,
                radius,
                x: radius * angle.cos(),
                y: radius * angle.sin(),
                distance_km: hospital.distance_km,
                suggestive_factor: hospital.suggestive_factor,
                colour_position: colour_position(hospital.suggestive_factor),
                recommended: recommended == Some(index),
            }
        })
        .collect();

    let rings = (1..=config.ring_steps)
        .map(|step| {
            let step = f64::from(step);
            let steps = f64::from(config.ring_steps);
            RadialRing {
                radius: config.outer_radius * step / steps,
                label_km: max_distance_km * step / steps,
            }
        })
        .collect();

    RadialChart {
        outer_radius: config.outer_radius,
        max_distance_km,
        points,
        rings,
    }
}

#[inline]
fn radial_fraction(distance_km: f64, max_distance_km: f64) -> f64 {
    if max_distance_km <= 0.0 {
        return 0.0;
    }
    (distance_km / max_distance_km).clamp(0.0, 1.0)
}

#[inline]
fn colour_position(suggestive_factor: f64) -> f64 {
    let (low, high) = FACTOR_DOMAIN;
    ((suggestive_factor - low) / (high - low)).clamp(0.0, 1.0)
}
