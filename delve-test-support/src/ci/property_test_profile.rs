//! Environment-driven settings for property-test suites.
//!
//! Suites read one shared profile so a CI job can scale every property run
//! by exporting two variables.

use std::env;

/// Overrides the number of cases each property runs.
pub const DELVE_PBT_CASES_ENV_KEY: &str = "DELVE_PBT_CASES";
/// Runs each property case in a forked subprocess when truthy.
pub const DELVE_PBT_FORK_ENV_KEY: &str = "DELVE_PBT_FORK";

/// Case count and fork mode for property runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the profile, falling back to the given defaults for variables
    /// that are unset or malformed.
    ///
    /// # Examples
    /// ```
    /// use delve_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(DELVE_PBT_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(DELVE_PBT_FORK_ENV_KEY, default_fork, parse_switch),
        }
    }

    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring malformed property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|cases| *cases > 0)
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
