//! camlights: camera-presence driven light control
//!
//! Watches the machine's camera inventory, derives a single aggregate
//! boolean ("is any allowed camera in use"), and on every transition of that
//! boolean fans the new state out to configured network light devices.
//!
//! # Features
//! - Polling camera inventory monitor with connect/disconnect detection
//! - Edge-triggered fan-out: one command per device per transition
//! - Elgato Key Light and WLED wire protocols
//! - Name-based camera filtering (regex, allowlist, or custom predicate)
//! - Per-device failure isolation: one broken light never blocks the rest
//!
//! # Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! camlights = "0.2"
//! ```
//!
//! Then wire up a session:
//! ```rust,ignore
//! use camlights::{CamLightsConfig, LightsSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     camlights::init_logging();
//!     let config = CamLightsConfig::load_or_default();
//!     let session = LightsSession::new(&config)?;
//!     session.start().await?;
//!     session.run().await;
//!     Ok(())
//! }
//! ```
pub mod config;
pub mod errors;
pub mod filter;
pub mod lights;
pub mod monitor;
pub mod session;
pub mod tracker;
pub mod types;

// Testing utilities - offline stand-ins for hardware and network
pub mod testing;

// Re-exports for convenience
pub use config::{CamLightsConfig, FilterConfig, FilterMode, LightConfig, LightKind};
pub use errors::CamLightsError;
pub use filter::CameraFilter;
pub use lights::{LightController, LightFanOut};
pub use monitor::DeviceMonitor;
pub use session::LightsSession;
pub use tracker::{CameraPresenceTracker, CameraStatus, StatusReport};
pub use types::{CameraEvent, CameraHandle};

/// Initialize logging for the camera-to-lights pipeline
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "camlights=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}
