use actix_web::{web, App, HttpServer};
use lantern_auth::config::{EnvConfig, CONFIG};
use lantern_auth::db::postgres_service::PostgresService;
use lantern_auth::routes::configure_routes;
use lantern_auth::session::{SessionCoordinator, SessionPolicy};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .expect("Failed to initialize PostgresService"),
    );

    // sign-out policy is threaded in here, nothing reads it off the static later
    let coordinator = web::Data::new(SessionCoordinator::new(
        Arc::clone(&postgres_service),
        SessionPolicy {
            destroy_on_sign_out: config.session.destroy_on_sign_out,
            keep_signed_ttl: chrono::Duration::days(config.session.keep_signed_ttl_days),
        },
    ));

    CONFIG.set(config).ok();

    tracing::info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(coordinator.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
