//! Backend entry-point: wires the REST endpoints, persistence adapters, and
//! the card processor gateway.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use mockable::DefaultClock;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use hackhub_backend::doc::ApiDoc;
use hackhub_backend::domain::{
    PaymentIntentService, PublishService, RegistrationService, TeamRosterService,
};
use hackhub_backend::inbound::http::HttpState;
use hackhub_backend::outbound::payments::PaymentHttpGateway;
use hackhub_backend::outbound::persistence::{
    DbPool, DieselHackathonRepository, DieselIdentityGate, DieselTeamRosterRepository, PoolConfig,
};
use hackhub_backend::server::{
    configure_api, run_migrations, secret_fingerprint, session_middleware, ServerConfig,
};

const PAYMENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    info!(
        bind_addr = %config.bind_addr,
        payment_key_fingerprint = %config.payment.secret_fingerprint(),
        session_key_fingerprint = %secret_fingerprint(config.session_key.master()),
        "configuration resolved"
    );

    run_migrations(&config.database_url).map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(std::io::Error::other)?;

    let identity = Arc::new(DieselIdentityGate::new(pool.clone()));
    let hackathons = Arc::new(DieselHackathonRepository::new(pool.clone()));
    let roster = Arc::new(DieselTeamRosterRepository::new(pool.clone()));
    let gateway = Arc::new(
        PaymentHttpGateway::new(
            config.payment.base_url.clone(),
            config.payment.secret_key.clone(),
            PAYMENT_REQUEST_TIMEOUT,
        )
        .map_err(std::io::Error::other)?,
    );

    let state = HttpState::new(
        Arc::new(RegistrationService::new(Arc::clone(&identity))),
        Arc::new(PublishService::new(
            hackathons,
            Arc::clone(&identity),
            Arc::new(DefaultClock),
        )),
        Arc::new(PaymentIntentService::new(gateway, identity)),
        Arc::new(TeamRosterService::new(roster)),
    );

    let session_key = config.session_key.clone();
    let cookie_secure = config.cookie_secure;
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(session_middleware(session_key.clone(), cookie_secure))
            .configure(configure_api);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    info!(bind_addr = %config.bind_addr, "hackhub backend listening");
    server.run().await
}
