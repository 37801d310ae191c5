use std::fmt;

#[derive(Debug)]
pub enum CamLightsError {
    ConfigError(String),
    EncodingError(String),
    TransportError(String),
    ProtocolError(String),
    MonitorError(String),
    FilterError(String),
}

impl fmt::Display for CamLightsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CamLightsError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            CamLightsError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            CamLightsError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            CamLightsError::ProtocolError(msg) => write!(f, "Protocol error: {}", msg),
            CamLightsError::MonitorError(msg) => write!(f, "Camera monitor error: {}", msg),
            CamLightsError::FilterError(msg) => write!(f, "Camera filter error: {}", msg),
        }
    }
}

impl std::error::Error for CamLightsError {}
