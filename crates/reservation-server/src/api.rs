//! Route registration, split from handler bodies per
//! `tmf639_resource_inventory::api::configure_routes`'s convention.

use crate::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/reservations").route(web::post().to(handlers::create_reservation)),
    )
    .service(
        web::resource("/reservations/{id}").route(web::get().to(handlers::get_reservation)),
    )
    .service(
        web::resource("/reservations/{id}/cancel")
            .route(web::post().to(handlers::cancel_reservation)),
    )
    .service(
        web::resource("/availability/{resourceId}")
            .route(web::get().to(handlers::get_availability)),
    )
    .service(
        web::resource("/availability/cache/{id}")
            .route(web::delete().to(handlers::invalidate_availability)),
    )
    .service(
        web::resource("/availability/cache")
            .route(web::delete().to(handlers::invalidate_all_availability)),
    )
    .service(web::resource("/resources").route(web::post().to(handlers::create_resource)))
    .service(
        web::resource("/resources/{id}/open").route(web::post().to(handlers::open_resource)),
    )
    .service(
        web::resource("/resources/{id}/close").route(web::post().to(handlers::close_resource)),
    );
}
