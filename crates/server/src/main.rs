use database::{PgStore, db::create_connection};
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use scheduler::{HttpCapacityClient, HttpGenerationClient, ScheduleManager};
use server::{
    access::IdentityClaims, app, config::Config, protected_routes, state::AppState,
    utils::shutdown::shutdown_signal,
};
use std::{process::ExitCode, sync::Arc};
use tower::ServiceBuilder;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let db = create_connection(&config.database_url).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations applied");

    let store = Arc::new(PgStore::new(db));
    let http = reqwest::Client::builder()
        .timeout(config.service_timeout)
        .build()?;

    let manager = ScheduleManager::new(
        store.clone(),
        store.clone(),
        Arc::new(HttpCapacityClient::new(http.clone(), &config.capacity_service_url)),
        Arc::new(HttpGenerationClient::new(http, &config.generation_service_url)),
    )
    .with_deadline(config.generation_timeout);

    let oauth2_resource_server = OAuth2ResourceServer::<IdentityClaims>::builder()
        .issuer_url(&config.oidc_issuer_url)
        .build()
        .await
        .map_err(|e| format!("failed to build OAuth2 resource server: {e:?}"))?;

    let api = protected_routes(AppState::new(store, manager))
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Running axum on http://{}", config.bind_address);

    axum::serve(listener, app(api))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
