//! HTTP shell for the reservation commit engine.
//!
//! Boots the actix-web server, grounded in `server::main`'s shape: init
//! logging, connect the pool, serve `/health`, `/ready`, `/live`, and the
//! reservation/availability/admin routes, then shut down gracefully on
//! SIGTERM/SIGINT via `HttpServer::shutdown_timeout`.

mod api;
mod error;
mod handlers;
mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use reservation_core::Config;
use reservation_utils::init_logger;
use state::AppState;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_reservation,
        handlers::cancel_reservation,
        handlers::get_reservation,
        handlers::get_availability,
    ),
    components(schemas(
        handlers::CreateReservationRequest,
        handlers::ReservationResponse,
        handlers::CreateResourceRequest,
    ))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_logger();

    log::info!("starting reservation commit engine");

    let config = Config::from_env();
    let host = config.host.clone();
    let port = config.port;
    let shutdown_timeout = config.shutdown_timeout_seconds;

    let state = web::Data::new(AppState::new(config).await);
    log::info!("database connection established");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .route("/health", web::get().to(handlers::health_check))
            .route("/ready", web::get().to(handlers::readiness_check))
            .route("/live", web::get().to(handlers::liveness_check))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .configure(api::configure_routes)
    })
    .bind((host.as_str(), port))?
    .shutdown_timeout(shutdown_timeout);

    log::info!("listening on http://{}:{}", host, port);

    server.run().await
}
