use tracing_subscriber::EnvFilter;

pub const JSON_VAR: &str = "CARDGATE_LOG_JSON";

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// filter; `CARDGATE_LOG_JSON=1` switches to JSON lines.
///
/// `log` records, such as actix's access log, are forwarded to the same
/// subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(JSON_VAR).is_ok_and(|v| v == "1" || v == "true");

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}
