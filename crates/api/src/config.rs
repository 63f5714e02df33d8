use std::path::PathBuf;

use signup_db::StoreBackend;
use validator::ValidateUrl;

/// A configuration value that cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Prefix for the HTML pages, e.g. `/inscription`. Empty mounts them at `/`.
    pub base_path: String,
    /// Registrant store to open at startup.
    pub store: StoreBackend,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Panics on invalid values; misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
            .unwrap_or_else(|e| panic!("Invalid configuration: {e}"))
    }

    /// Load configuration through `lookup`, with defaults.
    ///
    /// | Env Var                | Default                                 |
    /// |------------------------|-----------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                               |
    /// | `PORT`                 | `3000`                                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`                 |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                    |
    /// | `BASE_PATH`            | empty                                   |
    /// | `STORE_BACKEND`        | `file`                                  |
    /// | `STORE_PATH`           | `users.json`                            |
    /// | `API_URL`              | required when `STORE_BACKEND=remote`    |
    /// | `DATABASE_URL`         | required when `STORE_BACKEND=postgres`  |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_or("PORT", lookup("PORT"), 3000_u16, "u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(
            "REQUEST_TIMEOUT_SECS",
            lookup("REQUEST_TIMEOUT_SECS"),
            30_u64,
            "u64",
        )?;

        let base_path = normalize_base_path(&lookup("BASE_PATH").unwrap_or_default());

        let store = store_backend(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            base_path,
            store,
        })
    }

    /// Absolute URL path of a page under the base path.
    pub fn page_path(&self, path: &str) -> String {
        page_path(&self.base_path, path)
    }
}

/// Join a page path onto a base path; `"/"` maps to the base itself.
pub fn page_path(base_path: &str, path: &str) -> String {
    match (base_path.is_empty(), path) {
        (true, _) => path.to_string(),
        (false, "/") => base_path.to_string(),
        (false, _) => format!("{base_path}{path}"),
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
    }
}

/// Leading slash, no trailing slash; `""` and `"/"` both mean the root.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn store_backend(lookup: &impl Fn(&str) -> Option<String>) -> Result<StoreBackend, ConfigError> {
    let kind = lookup("STORE_BACKEND").unwrap_or_else(|| "file".into());

    match kind.trim().to_ascii_lowercase().as_str() {
        "memory" => Ok(StoreBackend::Memory),
        "file" => {
            let path = lookup("STORE_PATH").unwrap_or_else(|| "users.json".into());
            Ok(StoreBackend::File {
                path: PathBuf::from(path),
            })
        }
        "remote" => {
            let base_url = lookup("API_URL").ok_or(ConfigError::Missing("API_URL"))?;
            if !base_url.validate_url() {
                return Err(ConfigError::Invalid {
                    key: "API_URL",
                    expected: "URL",
                    value: base_url,
                });
            }
            Ok(StoreBackend::Remote { base_url })
        }
        "postgres" => {
            let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
            Ok(StoreBackend::Postgres { database_url })
        }
        _ => Err(ConfigError::Invalid {
            key: "STORE_BACKEND",
            expected: "store backend (memory, file, remote, postgres)",
            value: kind,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.base_path, "");
        assert_eq!(
            config.store,
            StoreBackend::File {
                path: PathBuf::from("users.json")
            }
        );
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("BASE_PATH", "inscription/"),
            ("STORE_BACKEND", "Memory"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.base_path, "/inscription");
        assert_eq!(config.store, StoreBackend::Memory);
    }

    #[test]
    fn invalid_port() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        );
    }

    #[test]
    fn remote_backend_requires_api_url() {
        assert_matches!(
            load(&[("STORE_BACKEND", "remote")]),
            Err(ConfigError::Missing("API_URL"))
        );

        let config = load(&[
            ("STORE_BACKEND", "remote"),
            ("API_URL", "http://registrants.internal:8080"),
        ])
        .unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Remote {
                base_url: "http://registrants.internal:8080".to_string()
            }
        );

        assert_matches!(
            load(&[("STORE_BACKEND", "remote"), ("API_URL", "not a url")]),
            Err(ConfigError::Invalid { key: "API_URL", .. })
        );
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        assert_matches!(
            load(&[("STORE_BACKEND", "postgres")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn unknown_backend() {
        assert_matches!(
            load(&[("STORE_BACKEND", "redis")]),
            Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                ..
            })
        );
    }

    #[test]
    fn page_paths() {
        assert_eq!(page_path("", "/"), "/");
        assert_eq!(page_path("", "/register"), "/register");
        assert_eq!(page_path("/tests", "/"), "/tests");
        assert_eq!(page_path("/tests", "/register"), "/tests/register");
    }
}
