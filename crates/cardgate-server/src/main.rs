use std::process::ExitCode;

use cardgate_server::{config, logging, server::run_server};
use cardgate_types::constants;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> ExitCode {
    logging::init();
    let config = match config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration. {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = constants::VERSION,
        addr = %config.listen_addr(),
        cards = config.seed_cards.len(),
        "Starting {}",
        constants::SERVICE_NAME
    );
    match run_server(config).await {
        Ok(()) => {
            info!("Bye!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
