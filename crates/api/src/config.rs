use std::fmt;

use acfruit_db::SupabaseConfig;

use crate::auth::password::hash_password;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@acfruit.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// The single admin login. Only the Argon2id hash of the password is kept.
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl AdminCredentials {
    pub fn new(email: &str, password: &str) -> Result<Self, ConfigError> {
        let password_hash = hash_password(password).map_err(|e| ConfigError {
            missing: Vec::new(),
            invalid: vec![("ADMIN_PASSWORD", format!("cannot be hashed: {e}"))],
        })?;
        Ok(Self {
            email: email.to_string(),
            password_hash,
        })
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Hosted persistence endpoint and key.
    pub supabase: SupabaseConfig,
    pub admin: AdminCredentials,
}

/// Missing required variables and malformed optional ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.summary())]
pub struct ConfigError {
    pub missing: Vec<&'static str>,
    pub invalid: Vec<(&'static str, String)>,
}

impl ConfigError {
    /// Every problem in one line, missing variables first.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!(
                "Missing environment variables: {}",
                self.missing.join(", ")
            ));
        }
        for (name, reason) in &self.invalid {
            parts.push(format!("{name} {reason}"));
        }
        parts.join(". ")
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `SUPABASE_URL`         | required                   |
    /// | `SUPABASE_ANON_KEY`    | required                   |
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ADMIN_EMAIL`          | `admin@acfruit.com`        |
    /// | `ADMIN_PASSWORD`       | `admin123`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, collecting every problem at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut error = ConfigError::default();

        let url = var("SUPABASE_URL");
        if url.is_none() {
            error.missing.push("SUPABASE_URL");
        }
        let anon_key = var("SUPABASE_ANON_KEY");
        if anon_key.is_none() {
            error.missing.push("SUPABASE_ANON_KEY");
        }

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        if host.parse::<std::net::IpAddr>().is_err() {
            error.invalid.push(("HOST", "must be an IP address".into()));
        }
        let port = parse_or(&mut error, "PORT", var("PORT"), DEFAULT_PORT, "must be a valid port number");
        let request_timeout_secs = parse_or(
            &mut error,
            "REQUEST_TIMEOUT_SECS",
            var("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
            "must be a whole number of seconds",
        );

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if cors_origins
            .iter()
            .any(|o| o.parse::<axum::http::HeaderValue>().is_err())
        {
            error.invalid.push(("CORS_ORIGINS", "contains an invalid origin".into()));
        }

        let (Some(url), Some(anon_key)) = (url, anon_key) else {
            return Err(error);
        };
        if !error.invalid.is_empty() {
            return Err(error);
        }

        let admin_email = var("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.into());
        let admin_password = var("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.into());
        let admin = AdminCredentials::new(&admin_email, &admin_password)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            supabase: SupabaseConfig { url, anon_key },
            admin,
        })
    }

    /// Where to listen when the configuration is unusable, so the
    /// configuration-error router can still answer.
    pub fn fallback_bind() -> (String, u16) {
        let host = std::env::var("HOST")
            .ok()
            .filter(|h| h.parse::<std::net::IpAddr>().is_ok())
            .unwrap_or_else(|| DEFAULT_HOST.into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        (host, port)
    }
}

fn parse_or<T: std::str::FromStr>(
    error: &mut ConfigError,
    name: &'static str,
    raw: Option<String>,
    default: T,
    reason: &str,
) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            error.invalid.push((name, reason.to_string()));
            default
        }),
    }
}

/// `key` cut to its first 20 characters for display.
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(20).collect();
    if visible.len() < key.len() {
        format!("{visible}...")
    } else {
        visible
    }
}
