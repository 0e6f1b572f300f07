use std::str::FromStr;
use std::time::Duration;

/// Collector settings, fixed when a [`Collector`](crate::gc::Collector) is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Whether automatic collection starts out enabled.
    pub gc_enabled: bool,

    /// How long an explicit pass waits for mutators to release the world.
    pub pause_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gc_enabled: true,
            pause_timeout: Duration::from_secs(1),
        }
    }
}

impl Settings {
    /// Default settings overlaid with the `GCGUARD_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = var("GCGUARD_GC_DISABLE") {
            if !value.is_empty() && value != "0" {
                self.gc_enabled = false;
            }
        }
        if let Some(ms) = parse_var(&var, "GCGUARD_PAUSE_TIMEOUT_MS") {
            self.pause_timeout = Duration::from_millis(ms);
        }
        self
    }
}

fn parse_var<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let value = var(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring {key}={value:?}, expected a non-negative integer");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::default().with_env(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        assert_eq!(from_vars(&[]), Settings::default());
    }

    #[test]
    fn env_overrides() {
        let settings = from_vars(&[
            ("GCGUARD_GC_DISABLE", "1"),
            ("GCGUARD_PAUSE_TIMEOUT_MS", " 250 "),
        ]);
        assert!(!settings.gc_enabled);
        assert_eq!(settings.pause_timeout, Duration::from_millis(250));
    }

    #[test]
    fn zero_or_empty_disable_flag_keeps_gc_on() {
        assert!(from_vars(&[("GCGUARD_GC_DISABLE", "0")]).gc_enabled);
        assert!(from_vars(&[("GCGUARD_GC_DISABLE", "")]).gc_enabled);
    }

    #[test]
    fn malformed_numbers_are_ignored() {
        let settings = from_vars(&[("GCGUARD_PAUSE_TIMEOUT_MS", "-5")]);
        assert_eq!(settings.pause_timeout, Settings::default().pause_timeout);
    }

    #[test]
    fn scheduling_variables_are_not_read() {
        let settings = from_vars(&[
            ("GCGUARD_GC_THRESHOLD", "12"),
            ("GCGUARD_GC_MIN_INTERVAL_MS", "0"),
        ]);
        assert_eq!(settings, Settings::default());
    }
}
