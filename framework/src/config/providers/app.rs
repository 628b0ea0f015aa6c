use crate::config::env::{env, env_optional, Environment};
use crate::error::FrameworkError;
use crate::http::FlashKey;

/// Key used when `APP_KEY` is unset outside production
const DEVELOPMENT_KEY: &str = "substation-registry-development-key";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application name, shown in page titles
    pub name: String,
    /// Current environment
    pub environment: Environment,
    /// Secret used to sign flash cookies
    pub key: Option<String>,
}

impl AppConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            name: env("APP_NAME", "Substation Registry".to_string()),
            environment: Environment::detect(),
            key: env_optional("APP_KEY"),
        }
    }

    /// Refuse to run production without a real key
    pub fn validate(&self) -> Result<(), FrameworkError> {
        if self.key.is_none() && self.environment.is_production() {
            return Err(FrameworkError::config("APP_KEY must be set in production"));
        }
        Ok(())
    }

    /// Signing key for flash cookies
    pub fn flash_key(&self) -> FlashKey {
        match &self.key {
            Some(key) => FlashKey::new(key),
            None => {
                tracing::warn!("APP_KEY is not set, flash cookies use the development key");
                FlashKey::new(DEVELOPMENT_KEY)
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: Environment, key: Option<&str>) -> AppConfig {
        AppConfig {
            name: "Substation Registry".to_string(),
            environment,
            key: key.map(str::to_string),
        }
    }

    #[test]
    fn test_production_requires_key() {
        assert!(config(Environment::Production, None).validate().is_err());
        assert!(config(Environment::Production, Some("s3cret")).validate().is_ok());
    }

    #[test]
    fn test_local_without_key_is_allowed() {
        assert!(config(Environment::Local, None).validate().is_ok());
    }
}
