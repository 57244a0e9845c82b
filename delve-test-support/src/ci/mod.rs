//! Helpers for tuning test runs from the environment.

pub mod property_test_profile;
