//! Default configuration values
//!
//! Constants shared by the config loader and the quoter binary.

/// Config file looked up when no path is given (extension resolved by the loader)
pub const CONFIG_PATH: &str = "config/bancor";

/// Environment override prefix: `BANCOR__SECTION__KEY`
pub const ENV_PREFIX: &str = "BANCOR";

pub const ENV_SEPARATOR: &str = "__";

/// Ledger snapshot defaults
pub mod ledger {
    /// Snapshot file read when none is configured
    pub const SNAPSHOT_PATH: &str = "ledger.json";
}

/// Logging defaults
pub mod logging {
    pub const LEVEL: &str = "info";
}
