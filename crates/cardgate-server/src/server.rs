use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};
use cardgate_types::GatewayConfig;
use tracing::info;

use crate::{
    errors::ServerError,
    routes::{self, Engine},
    telemetry::{self, ChannelTelemetry},
};

/// Seed the engine, start the telemetry drain and serve until shutdown.
pub async fn run_server(config: GatewayConfig) -> Result<(), ServerError> {
    let (sink, events) = ChannelTelemetry::channel();
    tokio::spawn(telemetry::drain(events));

    let engine = Engine::from_config(&config)?.with_telemetry(Arc::new(sink));
    let srv = create_server_instance(&config, web::Data::new(engine))?;
    info!(addr = %config.listen_addr(), "Listening");
    srv.await.map_err(ServerError::from)
}

pub fn create_server_instance(
    config: &GatewayConfig,
    engine: web::Data<Engine>,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %r").log_target("cardgate::access_log"))
            .app_data(engine.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
