//! Navigation and coalescing configuration.
//!
//! The process-wide configuration is read from the environment once, on first
//! use, and is read-only afterwards. Individual chains can override it with
//! [`VoidSafe::with_config`](crate::VoidSafe::with_config).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Environment variable enabling per-step trace logging.
pub const ENV_TRACE_STEPS: &str = "VOIDSAFE_TRACE_STEPS";
/// Environment variable setting the default coalescing type guard.
pub const ENV_TYPE_GUARD: &str = "VOIDSAFE_TYPE_GUARD";

/// Configuration for chains and coalescing operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeConfig {
    /// Emit a `log::trace!` record for every chain step and write-back.
    #[serde(default)]
    pub trace_steps: bool,
    /// Whether coalescing returns the fallback when the value's runtime type
    /// differs from the fallback's, for operators that inherit this setting.
    #[serde(default = "default_type_guard")]
    pub type_guard: bool,
}

fn default_type_guard() -> bool {
    true
}

impl Default for SafeConfig {
    fn default() -> Self {
        Self {
            trace_steps: false,
            type_guard: default_type_guard(),
        }
    }
}

static GLOBAL: Lazy<SafeConfig> = Lazy::new(SafeConfig::from_env);

impl SafeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide configuration.
    pub fn global() -> &'static SafeConfig {
        &GLOBAL
    }

    /// Build a configuration from `VOIDSAFE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_TRACE_STEPS) {
            config.trace_steps = parse_flag(ENV_TRACE_STEPS, &raw, config.trace_steps);
        }
        if let Some(raw) = lookup(ENV_TYPE_GUARD) {
            config.type_guard = parse_flag(ENV_TYPE_GUARD, &raw, config.type_guard);
        }
        log::debug!("voidsafe config: {:?}", config);
        config
    }

    /// Enable step tracing (builder pattern).
    pub fn with_trace_steps(mut self, trace_steps: bool) -> Self {
        self.trace_steps = trace_steps;
        self
    }

    /// Set the default type guard (builder pattern).
    pub fn with_type_guard(mut self, type_guard: bool) -> Self {
        self.type_guard = type_guard;
        self
    }
}

fn parse_flag(name: &str, raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            log::warn!("Ignoring {}={:?}: expected a boolean flag", name, other);
            default
        }
    }
}
