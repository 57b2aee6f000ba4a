use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{sync::OnceLock, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_CHAT_POLL_INTERVAL_MS: u64 = 5_000;
const MIN_CHAT_POLL_INTERVAL_MS: u64 = 1_000;

/// Partial configuration as read from one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "CHAT_POLL_INTERVAL_MS")]
    pub chat_poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub chat_poll_interval: Duration,
}

impl RuntimeConfig {
    /// Fields missing here are taken from `fallback`.
    pub fn or(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            chat_poll_interval_ms: self.chat_poll_interval_ms.or(fallback.chat_poll_interval_ms),
        }
    }

    pub fn resolve(self) -> ResolvedConfig {
        let api_base_url = self
            .api_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let interval_ms = self
            .chat_poll_interval_ms
            .unwrap_or(DEFAULT_CHAT_POLL_INTERVAL_MS)
            .max(MIN_CHAT_POLL_INTERVAL_MS);
        ResolvedConfig {
            api_base_url,
            chat_poll_interval: Duration::from_millis(interval_ms),
        }
    }
}

static RESOLVED: OnceLock<ResolvedConfig> = OnceLock::new();

fn cache(config: ResolvedConfig) -> ResolvedConfig {
    let _ = RESOLVED.set(config.clone());
    RESOLVED.get().cloned().unwrap_or(config)
}

#[cfg(target_arch = "wasm32")]
mod sources {
    use super::RuntimeConfig;
    use wasm_bindgen::JsValue;

    fn read_global(name: &str) -> Option<RuntimeConfig> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &name.into()).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let object = js_sys::Object::from(value);
        let string_field = |keys: &[&str]| {
            keys.iter().find_map(|key| {
                js_sys::Reflect::get(&object, &JsValue::from_str(key))
                    .ok()
                    .and_then(|v| v.as_string())
            })
        };
        let number_field = |keys: &[&str]| {
            keys.iter().find_map(|key| {
                js_sys::Reflect::get(&object, &JsValue::from_str(key))
                    .ok()
                    .and_then(|v| v.as_f64())
                    .filter(|v| *v > 0.0)
                    .map(|v| v as u64)
            })
        };
        Some(RuntimeConfig {
            api_base_url: string_field(&["API_BASE_URL", "api_base_url"]),
            chat_poll_interval_ms: number_field(&["CHAT_POLL_INTERVAL_MS", "chat_poll_interval_ms"]),
        })
    }

    /// `window.__SKILLS_HUB_ENV` (env.js) wins over `window.__SKILLS_HUB_CONFIG`.
    pub fn from_globals() -> RuntimeConfig {
        let env = read_global("__SKILLS_HUB_ENV").unwrap_or_default();
        let config = read_global("__SKILLS_HUB_CONFIG").unwrap_or_default();
        env.or(config)
    }

    pub async fn from_config_json() -> Option<RuntimeConfig> {
        let href = web_sys::window()?.location().href().ok()?;
        let url = reqwest::Url::parse(&href).ok()?.join("config.json").ok()?;
        let response = reqwest::get(url).await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod sources {
    use super::RuntimeConfig;

    pub fn from_globals() -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: std::env::var("SKILLS_HUB_API_BASE_URL").ok(),
            chat_poll_interval_ms: std::env::var("SKILLS_HUB_CHAT_POLL_INTERVAL_MS")
                .ok()
                .and_then(|raw| raw.trim().parse().ok()),
        }
    }

    pub async fn from_config_json() -> Option<RuntimeConfig> {
        None
    }
}

pub async fn await_config() -> ResolvedConfig {
    if let Some(cached) = RESOLVED.get() {
        return cached.clone();
    }
    let mut config = sources::from_globals();
    if config.api_base_url.is_none() || config.chat_poll_interval_ms.is_none() {
        match sources::from_config_json().await {
            Some(file) => config = config.or(file),
            None => debug!("No runtime config file; using defaults"),
        }
    }
    let resolved = config.resolve();
    if resolved.api_base_url == DEFAULT_API_BASE_URL {
        warn!("API base URL not configured; using {}", DEFAULT_API_BASE_URL);
    }
    cache(resolved)
}

pub async fn await_api_base_url() -> String {
    await_config().await.api_base_url
}

/// Interval between chat refreshes; the default until `init` has run.
pub fn chat_poll_interval() -> Duration {
    RESOLVED
        .get()
        .map(|config| config.chat_poll_interval)
        .unwrap_or_else(|| Duration::from_millis(DEFAULT_CHAT_POLL_INTERVAL_MS))
}

pub async fn init() {
    let config = await_config().await;
    debug!("Runtime config: {:?}", config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_applies_defaults() {
        let resolved = RuntimeConfig::default().resolve();
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.chat_poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn resolve_normalizes_values() {
        let resolved = RuntimeConfig {
            api_base_url: Some(" https://hub.example.org/api/ ".into()),
            chat_poll_interval_ms: Some(10),
        }
        .resolve();
        assert_eq!(resolved.api_base_url, "https://hub.example.org/api");
        assert_eq!(resolved.chat_poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn earlier_sources_take_precedence() {
        let env = RuntimeConfig {
            api_base_url: Some("https://env.example.org/api".into()),
            chat_poll_interval_ms: None,
        };
        let file = RuntimeConfig {
            api_base_url: Some("https://file.example.org/api".into()),
            chat_poll_interval_ms: Some(2_000),
        };
        let merged = env.or(file);
        assert_eq!(merged.api_base_url.as_deref(), Some("https://env.example.org/api"));
        assert_eq!(merged.chat_poll_interval_ms, Some(2_000));
    }

    #[test]
    fn config_file_accepts_upper_case_keys() {
        let parsed: RuntimeConfig =
            serde_json::from_str(r#"{"API_BASE_URL":"https://x/api"}"#).unwrap();
        assert_eq!(parsed.api_base_url.as_deref(), Some("https://x/api"));
    }
}
