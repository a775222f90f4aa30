pub mod auth;
pub mod files;
pub mod tables;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    cache,
    core::MedidictError,
};

pub const ENV_API_URL: &str = "MEDIDICT_API_URL";
pub const ENV_API_KEY: &str = "MEDIDICT_API_KEY";

const CONFIG_FILE: &str = "config.json";
const SESSION_FILE: &str = "session.json";

/// Backend endpoint and anon API key. When neither the environment nor
/// config.json provides one, the app silently runs local-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: String,
}

impl RemoteConfig {
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(ENV_API_URL).ok()?;
        let anon_key = std::env::var(ENV_API_KEY).ok()?;
        Self { url, anon_key }.validated()
    }

    pub fn load() -> Option<Self> {
        if let Some(config) = Self::from_env() {
            return Some(config);
        }
        cache::load_json_or_default::<RemoteConfig>(CONFIG_FILE).validated()
    }

    fn validated(self) -> Option<Self> {
        if self.url.trim().is_empty() || self.anon_key.trim().is_empty() {
            return None;
        }
        Some(Self { url: self.url.trim().trim_end_matches('/').to_string(), ..self })
    }
}

/// An authenticated backend session, persisted across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub email: String,
}

pub fn load_session() -> Option<Session> {
    cache::load_json_or_default::<Option<Session>>(SESSION_FILE)
}

pub fn store_session(session: &Session) -> Result<(), MedidictError> {
    cache::save_json(session, SESSION_FILE)
}

pub fn clear_session() -> Result<(), MedidictError> {
    cache::delete_data_file(SESSION_FILE)
}
