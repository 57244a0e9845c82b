//! Shared test utilities for `delve-core`.

use delve_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

/// Builds a proptest configuration from the shared run profile so every
/// property suite honours `DELVE_PBT_CASES` and `DELVE_PBT_FORK`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}
