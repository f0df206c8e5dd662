//! Process-wide display toggles.
//!
//! Two opt-in behaviors are controlled by the embedding application rather
//! than by the data: overwriting a known-degenerate legacy float color
//! model, and brute-force min/max scanning when explicit metadata is
//! absent. Both default to off.
//!
//! Options are an explicit value passed into [`crate::resolve_display_config`],
//! not ambient global state; [`DisplayOptions::from_env`] exists for
//! applications that want to wire them to the environment.

/// Environment variable enabling legacy float color model overwrite.
pub const ENV_OVERWRITE_FLOAT_MODEL: &str = "BANDVIEW_COLORMODEL_OVERWRITE";

/// Environment variable enabling brute-force min/max scanning.
pub const ENV_BRUTE_FORCE_MINMAX: &str = "BANDVIEW_BRUTEFORCE_MINMAX";

/// Opt-in display behaviors. Both default to disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Replace a detected legacy float color model with a normalized
    /// min/max mapping (requires a no-data sentinel to be present).
    pub overwrite_float_model: bool,
    /// Scan every sample for the observed min/max when the explicit
    /// range tags are absent. Expensive: reads the full raster once.
    pub brute_force_minmax: bool,
}

impl DisplayOptions {
    /// Options with both toggles off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the toggles from the environment.
    ///
    /// A variable set to `1` or `true` (case-insensitive) enables the
    /// corresponding behavior; anything else, including absence, leaves it
    /// disabled.
    pub fn from_env() -> Self {
        Self {
            overwrite_float_model: env_flag(ENV_OVERWRITE_FLOAT_MODEL),
            brute_force_minmax: env_flag(ENV_BRUTE_FORCE_MINMAX),
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| {
            let v = v.trim();
            v == "1" || v.eq_ignore_ascii_case("true")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_off() {
        let opts = DisplayOptions::new();
        assert!(!opts.overwrite_float_model);
        assert!(!opts.brute_force_minmax);
    }
}
