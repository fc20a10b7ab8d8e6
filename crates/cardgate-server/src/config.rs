//! Gateway configuration from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `CARDGATE_HOST` | bind address | `127.0.0.1` |
//! | `CARDGATE_PORT` | bind port | `7000` |
//! | `CARDGATE_SEED_FILE` | JSON array of seed cards | built-in seed set |
//!
//! A bad port falls back to the default with a logged error. A seed file that
//! is set but cannot be read or decoded stops startup.

use std::{env, fs};

use cardgate_types::{ConfigError, GatewayConfig, constants};
use tracing::{error, info};

pub const HOST_VAR: &str = "CARDGATE_HOST";
pub const PORT_VAR: &str = "CARDGATE_PORT";
pub const SEED_FILE_VAR: &str = "CARDGATE_SEED_FILE";

/// Load the configuration from process environment variables.
pub fn from_env() -> Result<GatewayConfig, ConfigError> {
    from_lookup(|key| env::var(key).ok())
}

/// Load the configuration through an arbitrary variable lookup.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();

    if let Some(host) = lookup(HOST_VAR).filter(|h| !h.trim().is_empty()) {
        config.host = host.trim().to_string();
    }
    if let Some(port) = lookup(PORT_VAR) {
        match parse_port(&port) {
            Ok(port) => config.port = port,
            Err(e) => error!(
                "{e} Using the default, {}, instead.",
                constants::DEFAULT_PORT
            ),
        }
    }
    if let Some(path) = lookup(SEED_FILE_VAR) {
        let json = fs::read_to_string(&path).map_err(|e| ConfigError::SeedFileUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        config = config.with_seed_json(&json)?;
        info!(path = %path, cards = config.seed_cards.len(), "Loaded seed cards");
    }

    config.validate()?;
    Ok(config)
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidPort {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:7000");
        assert_eq!(config.seed_cards.len(), 3);
    }

    #[test]
    fn host_and_port_are_read() {
        let config = from_lookup(lookup(&[(HOST_VAR, "0.0.0.0"), (PORT_VAR, "8080")])).unwrap();
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        let config = from_lookup(lookup(&[(PORT_VAR, "seventy")])).unwrap();
        assert_eq!(config.port, constants::DEFAULT_PORT);
        let config = from_lookup(lookup(&[(PORT_VAR, "70000")])).unwrap();
        assert_eq!(config.port, constants::DEFAULT_PORT);
    }

    #[test]
    fn seed_file_replaces_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "pan": "4111111111111111", "e_month": 1, "e_year": 2040,
                  "cvv": 321, "holder": "TEST HOLDER", "balance": 42 }}]"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = from_lookup(lookup(&[(SEED_FILE_VAR, path.as_str())])).unwrap();
        assert_eq!(config.seed_cards.len(), 1);
        assert_eq!(config.seed_cards[0].holder, "TEST HOLDER");
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let err = from_lookup(lookup(&[(SEED_FILE_VAR, "/nonexistent/cards.json")])).unwrap_err();
        assert!(matches!(err, ConfigError::SeedFileUnreadable { .. }));
    }

    #[test]
    fn invalid_seed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let seed = r#"[{
            "pan": "", "e_month": 1, "e_year": 2040, "cvv": 321, "holder": "X", "balance": 1
        }]"#;
        write!(file, "{seed}").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let err = from_lookup(lookup(&[(SEED_FILE_VAR, path.as_str())])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeedCard { .. }));
    }
}
