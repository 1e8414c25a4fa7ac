// Route exports
pub mod hospitals;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(hospitals::configure_legacy)
        .service(web::scope("/api/v1").configure(hospitals::configure));
}
