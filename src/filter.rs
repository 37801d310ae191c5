//! Camera filtering
//!
//! Selects which cameras are allowed to influence lighting. A failing
//! predicate must never take the tracker down, so predicate evaluation is
//! wrapped in `catch_unwind` and a panic maps to "not allowed".

use crate::config::{FilterConfig, FilterMode};
use crate::errors::CamLightsError;
use crate::types::CameraHandle;
use std::collections::HashSet;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Arbitrary predicate over a camera handle.
pub type FilterPredicate = Box<dyn Fn(&CameraHandle) -> bool + Send + Sync>;

/// Predicate selecting which cameras influence lighting.
pub enum CameraFilter {
    /// No filter configured; every camera is allowed
    AllowAll,
    /// Allowed iff the display name matches the pattern
    NamePattern(regex::Regex),
    /// Allowed iff the display name is in the set
    NameList(HashSet<String>),
    /// Allowed iff the predicate returns true; panics fail closed
    Predicate(FilterPredicate),
}

impl fmt::Debug for CameraFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CameraFilter::AllowAll => write!(f, "AllowAll"),
            CameraFilter::NamePattern(re) => write!(f, "NamePattern({})", re.as_str()),
            CameraFilter::NameList(names) => write!(f, "NameList({} names)", names.len()),
            CameraFilter::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl CameraFilter {
    /// Build a filter from its configuration form.
    pub fn from_config(config: &FilterConfig) -> Result<Self, CamLightsError> {
        match config.mode {
            FilterMode::All => Ok(CameraFilter::AllowAll),
            FilterMode::Pattern => {
                let pattern = config.pattern.as_deref().ok_or_else(|| {
                    CamLightsError::FilterError(
                        "filter mode 'pattern' requires a pattern".to_string(),
                    )
                })?;
                let re = regex::Regex::new(pattern).map_err(|e| {
                    CamLightsError::FilterError(format!("invalid filter pattern: {}", e))
                })?;
                Ok(CameraFilter::NamePattern(re))
            }
            FilterMode::List => Ok(CameraFilter::NameList(
                config.names.iter().cloned().collect(),
            )),
        }
    }

    /// Wrap an arbitrary predicate.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&CameraHandle) -> bool + Send + Sync + 'static,
    {
        CameraFilter::Predicate(Box::new(f))
    }

    /// Whether a filter beyond allow-all is active.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, CameraFilter::AllowAll)
    }

    /// Total verdict for one camera. Never panics.
    pub fn allows(&self, camera: &CameraHandle) -> bool {
        match self {
            CameraFilter::AllowAll => true,
            CameraFilter::NamePattern(re) => re.is_match(&camera.name),
            CameraFilter::NameList(names) => names.contains(&camera.name),
            CameraFilter::Predicate(f) => {
                match catch_unwind(AssertUnwindSafe(|| f(camera))) {
                    Ok(allowed) => allowed,
                    Err(_) => {
                        log::warn!(
                            "Camera filter predicate panicked for '{}', treating as not allowed",
                            camera.name
                        );
                        false
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(name: &str) -> CameraHandle {
        CameraHandle::new("0", name)
    }

    #[test]
    fn test_allow_all() {
        let filter = CameraFilter::AllowAll;
        assert!(filter.allows(&camera("Anything")));
        assert!(!filter.is_enabled());
    }

    #[test]
    fn test_name_pattern() {
        let config = FilterConfig {
            mode: FilterMode::Pattern,
            pattern: Some("^FaceTime".to_string()),
            names: Vec::new(),
        };
        let filter = CameraFilter::from_config(&config).unwrap();
        assert!(filter.allows(&camera("FaceTime HD Camera")));
        assert!(!filter.allows(&camera("OBS Virtual Camera")));
        assert!(filter.is_enabled());
    }

    #[test]
    fn test_name_list() {
        let config = FilterConfig {
            mode: FilterMode::List,
            pattern: None,
            names: vec!["Logitech BRIO".to_string()],
        };
        let filter = CameraFilter::from_config(&config).unwrap();
        assert!(filter.allows(&camera("Logitech BRIO")));
        assert!(!filter.allows(&camera("Logitech C920")));
    }

    #[test]
    fn test_pattern_mode_requires_pattern() {
        let config = FilterConfig {
            mode: FilterMode::Pattern,
            pattern: None,
            names: Vec::new(),
        };
        assert!(CameraFilter::from_config(&config).is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = FilterConfig {
            mode: FilterMode::Pattern,
            pattern: Some("[".to_string()),
            names: Vec::new(),
        };
        assert!(CameraFilter::from_config(&config).is_err());
    }

    #[test]
    fn test_predicate() {
        let filter = CameraFilter::predicate(|c| c.name.contains("BRIO"));
        assert!(filter.allows(&camera("Logitech BRIO")));
        assert!(!filter.allows(&camera("FaceTime HD Camera")));
    }

    #[test]
    fn test_panicking_predicate_fails_closed() {
        let filter = CameraFilter::predicate(|_| panic!("broken filter"));
        assert!(!filter.allows(&camera("Any Camera")));
        // Still usable afterwards
        assert!(!filter.allows(&camera("Another Camera")));
    }
}
