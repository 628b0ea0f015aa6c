use std::path::Path;

/// Environment type enumeration
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    /// Detect environment from APP_ENV or default to Local
    pub fn detect() -> Self {
        Self::parse(std::env::var("APP_ENV").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            Some("staging") => Self::Staging,
            Some("development") => Self::Development,
            Some("testing") => Self::Testing,
            Some("local") | Some("") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Get the .env file suffix for this environment
    pub fn env_file_suffix(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.env_file_suffix())
    }
}

/// Load environment variables from .env files with proper precedence
///
/// Precedence (later files override earlier):
/// 1. .env (base defaults)
/// 2. .env.local (local overrides, not committed)
/// 3. .env.{environment} (environment-specific)
/// 4. .env.{environment}.local (environment-specific local overrides)
/// 5. Actual system environment variables (highest priority)
///
/// `APP_ENV` may itself come from `.env.local` or `.env`, so it is resolved
/// before the environment-specific files are picked.
///
/// Returns the detected environment and the files that were loaded.
pub fn load_dotenv(project_root: &Path) -> (Environment, Vec<String>) {
    let env = resolve_environment(std::env::var("APP_ENV").ok(), project_root);
    let suffix = env.env_file_suffix().to_string();

    // dotenvy never overwrites variables that are already set, so the most
    // specific file is loaded first
    let candidates = [
        format!(".env.{}.local", suffix),
        format!(".env.{}", suffix),
        ".env.local".to_string(),
        ".env".to_string(),
    ];

    let mut loaded = Vec::new();
    for name in candidates {
        if dotenvy::from_path(project_root.join(&name)).is_ok() {
            loaded.push(name);
        }
    }

    (env, loaded)
}

/// The process value wins, then `.env.local`, then `.env`
fn resolve_environment(process_value: Option<String>, project_root: &Path) -> Environment {
    if let Some(value) = process_value {
        return Environment::parse(Some(value.trim()));
    }

    for name in [".env.local", ".env"] {
        let Ok(entries) = dotenvy::from_path_iter(project_root.join(name)) else {
            continue;
        };
        if let Some((_, value)) = entries.flatten().find(|(key, _)| key == "APP_ENV") {
            return Environment::parse(Some(value.trim()));
        }
    }

    Environment::Local
}

/// Get an environment variable with a default value
///
/// Unset or unparsable values fall back to `default`.
///
/// # Example
/// ```
/// use substation_web::config::env;
///
/// let port: u16 = env("SUBSTATION_DOC_PORT", 8080);
/// assert_eq!(port, 8080);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Get an optional environment variable
///
/// Empty values count as unset.
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse(Some("production")), Environment::Production);
        assert_eq!(Environment::parse(None), Environment::Local);
        assert_eq!(
            Environment::parse(Some("qa")),
            Environment::Custom("qa".to_string())
        );
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
        assert_eq!(Environment::Testing.to_string(), "testing");
    }

    #[test]
    fn test_app_env_from_dotenv_selects_environment() {
        let root = std::env::temp_dir().join(format!("substation-env-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join(".env"), "APP_NAME=Registry\nAPP_ENV=production\n").unwrap();

        assert_eq!(resolve_environment(None, &root), Environment::Production);
        assert_eq!(
            resolve_environment(Some("staging".into()), &root),
            Environment::Staging
        );

        std::fs::write(root.join(".env.local"), "APP_ENV=testing\n").unwrap();
        assert_eq!(resolve_environment(None, &root), Environment::Testing);

        std::fs::remove_dir_all(&root).unwrap();
        assert_eq!(resolve_environment(None, &root), Environment::Local);
    }

    #[test]
    fn test_env_defaults_when_unset_or_invalid() {
        assert_eq!(env("SUBSTATION_TEST_SURELY_UNSET_VAR", 7u16), 7);
        assert_eq!(env_optional::<u16>("SUBSTATION_TEST_SURELY_UNSET_VAR"), None);
    }
}
