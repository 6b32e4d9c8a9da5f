//! Endpoint configuration for the backend API, the welcome API, and Firebase.
//!
//! SYSTEM CONTEXT
//! ==============
//! Values come from build-time environment variables and can be overridden at
//! runtime through `window.PORTAL_CONFIG`, so a static deployment can point at
//! another backend without rebuilding. The Firebase web API key is public;
//! nothing secret belongs here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Frontend configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the registration/profile backend.
    pub api_base_url: String,
    /// Base URL of the welcome notification API. Empty means same origin.
    pub welcome_api_base_url: String,
    pub firebase_api_key: String,
    pub identity_toolkit_url: String,
    pub secure_token_url: String,
}

impl AppConfig {
    /// Loads config from build-time variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::from_build_env();
        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }
        config
    }

    fn from_build_env() -> Self {
        Self {
            api_base_url: option_env!("PORTAL_API_BASE_URL").unwrap_or("").to_owned(),
            welcome_api_base_url: option_env!("PORTAL_WELCOME_API_BASE_URL").unwrap_or("").to_owned(),
            firebase_api_key: option_env!("PORTAL_FIREBASE_API_KEY").unwrap_or("").to_owned(),
            identity_toolkit_url: option_env!("PORTAL_IDENTITY_TOOLKIT_URL")
                .unwrap_or(DEFAULT_IDENTITY_TOOLKIT_URL)
                .to_owned(),
            secure_token_url: option_env!("PORTAL_SECURE_TOKEN_URL")
                .unwrap_or(DEFAULT_SECURE_TOKEN_URL)
                .to_owned(),
        }
    }
}

#[derive(Debug, Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    welcome_api_base_url: Option<String>,
    firebase_api_key: Option<String>,
    identity_toolkit_url: Option<String>,
    secure_token_url: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.welcome_api_base_url {
        config.welcome_api_base_url = value;
    }
    if let Some(value) = runtime.firebase_api_key {
        config.firebase_api_key = value;
    }
    if let Some(value) = runtime.identity_toolkit_url {
        config.identity_toolkit_url = value;
    }
    if let Some(value) = runtime.secure_token_url {
        config.secure_token_url = value;
    }
}

#[cfg(feature = "hydrate")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let raw = Reflect::get(&window, &JsValue::from_str("PORTAL_CONFIG")).ok()?;
    if raw.is_null() || raw.is_undefined() {
        return None;
    }
    let object = Object::from(raw);
    let read = |key: &str| {
        Reflect::get(&object, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_string())
            .and_then(|value| normalize_runtime_value(&value))
    };

    Some(RuntimeConfig {
        api_base_url: read("api_base_url"),
        welcome_api_base_url: read("welcome_api_base_url"),
        firebase_api_key: read("firebase_api_key"),
        identity_toolkit_url: read("identity_toolkit_url"),
        secure_token_url: read("secure_token_url"),
    })
}

#[cfg(not(feature = "hydrate"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}
