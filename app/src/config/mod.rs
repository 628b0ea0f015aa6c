//! Registry settings that are not framework concerns

use crate::query::NameMatch;
use web::config::env;

/// Registry configuration
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Match the substation-name filter case-sensitively (default: false)
    pub filter_case_sensitive: bool,
}

impl RegistryConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            filter_case_sensitive: env("FILTER_CASE_SENSITIVE", false),
        }
    }

    /// How the substation-name filter compares text
    pub fn name_match(&self) -> NameMatch {
        if self.filter_case_sensitive {
            NameMatch::CaseSensitive
        } else {
            NameMatch::CaseInsensitive
        }
    }
}
