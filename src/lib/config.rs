//! Browser configuration. Values come from two layers: build-time env
//! (`CROSSBOX_API_BASE_URL`, `CROSSBOX_LOG_LEVEL`) and, on top, an optional
//! `window.CROSSBOX_CONFIG` object so a static deployment can point at another
//! API without a rebuild. Everything here ends up public in the bundle.

use std::{fmt, str::FromStr, sync::OnceLock};

#[cfg(target_arch = "wasm32")]
const RUNTIME_CONFIG_KEY: &str = "CROSSBOX_CONFIG";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Position on the `-v` scale, `Error` being 0.
    pub const fn verbosity(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Accepts a level name in any case or its verbosity number.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "error" | "0" => Ok(LogLevel::Error),
            "warn" | "1" => Ok(LogLevel::Warn),
            "info" | "2" => Ok(LogLevel::Info),
            "debug" | "3" => Ok(LogLevel::Debug),
            "trace" | "4" => Ok(LogLevel::Trace),
            _ => Err(format!("invalid log level: {value}")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        formatter.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Empty means same origin.
    pub api_base_url: String,
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Resolved configuration, computed on first use.
    pub fn get() -> &'static AppConfig {
        static CONFIG: OnceLock<AppConfig> = OnceLock::new();
        CONFIG.get_or_init(AppConfig::load)
    }

    /// Reads both layers; runtime values win over build-time ones.
    pub fn load() -> Self {
        let build = ConfigLayer::build_time();
        let layer = match runtime_layer() {
            Some(runtime) => runtime.over(build),
            None => build,
        };
        Self::resolve(layer)
    }

    fn resolve(layer: ConfigLayer) -> Self {
        Self {
            api_base_url: layer.api_base_url.unwrap_or_default(),
            // An unreadable level is not worth failing startup over.
            log_level: layer
                .log_level
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// One source of settings. `None` defers to the layer below.
#[derive(Clone, Debug, Default)]
struct ConfigLayer {
    api_base_url: Option<String>,
    log_level: Option<String>,
}

impl ConfigLayer {
    fn build_time() -> Self {
        Self {
            api_base_url: option_env!("CROSSBOX_API_BASE_URL").and_then(non_blank),
            log_level: option_env!("CROSSBOX_LOG_LEVEL").and_then(non_blank),
        }
    }

    fn over(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            api_base_url: self.api_base_url.or(lower.api_base_url),
            log_level: self.log_level.or(lower.log_level),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_layer() -> Option<ConfigLayer> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(RUNTIME_CONFIG_KEY)).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let object = Object::from(value);
    let field = |key: &str| {
        Reflect::get(&object, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_string())
            .and_then(|value| non_blank(&value))
    };

    Some(ConfigLayer {
        api_base_url: field("api_base_url"),
        log_level: field("log_level"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_layer() -> Option<ConfigLayer> {
    None
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
