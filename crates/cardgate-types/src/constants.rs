//! System-wide constants for the cardgate gateway.

/// Smallest accepted card verification code.
pub const CVV_MIN: u16 = 100;

/// Largest accepted card verification code.
pub const CVV_MAX: u16 = 999;

/// Expiry years at or before this are treated as malformed, not expired.
pub const MIN_EXPIRY_YEAR: i32 = 1970;

/// The first deal identifier handed out by a fresh registry.
pub const FIRST_DEAL_ID: u64 = 1;

/// Value of the `Operation` field in a successful charge response.
pub const OPERATION_SUCCESS: &str = "Success";

/// Default listen host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 7000;

/// Number of leading SHA-256 bytes kept in a card fingerprint.
pub const FINGERPRINT_BYTES: usize = 4;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name.
pub const SERVICE_NAME: &str = "cardgate";
