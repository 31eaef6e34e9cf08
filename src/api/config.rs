use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub port: u16,
    /// Bearer token guarding the diagnostic user listing
    pub admin_token: Option<String>,
    /// Directory served for paths no route matches
    pub static_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            admin_token: None,
            static_dir: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3001);

        let admin_token = normalize_token(env::var("ADMIN_TOKEN").ok());
        if admin_token.is_none() {
            tracing::warn!("ADMIN_TOKEN not set in environment, GET /users will be served without authentication");
        }

        let static_dir = env::var("STATIC_DIR")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);

        Self {
            port,
            admin_token,
            static_dir,
        }
    }
}

/// Surrounding whitespace can never match a token read from a header.
fn normalize_token(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
