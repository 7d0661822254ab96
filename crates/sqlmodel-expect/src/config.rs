//! Expectation and mock-driver configuration.

use std::env;

use sqlmodel_core::error::ConfigError;
use sqlmodel_core::{Error, Result};

/// Environment variable that turns on strict preload resolution.
pub const STRICT_ENV: &str = "SQLMODEL_EXPECT_STRICT";

/// How the expecter treats its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectConfig {
    /// Fail when a preload tag names no relationship field, instead of
    /// skipping the statement.
    pub strict_preload: bool,
}

impl ExpectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict preload resolution.
    #[must_use]
    pub fn strict_preload(mut self, strict: bool) -> Self {
        self.strict_preload = strict;
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(STRICT_ENV) {
            config.strict_preload = parse_flag(STRICT_ENV, &raw)?;
        }
        Ok(config)
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(ConfigError {
            message: format!("{name}: expected a boolean, got '{other}'"),
        })),
    }
}

/// How the mock driver matches statements against expectations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryMatcher {
    /// The expected SQL, regex-escaped, must occur in the executed SQL.
    #[default]
    Regexp,
    /// Expected and executed SQL must be equal after collapsing whitespace.
    Equal,
}

/// Mock-driver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    pub matcher: QueryMatcher,
    /// Expectations must be met in registration order.
    pub ordered: bool,
    /// Compare bound arguments when the expectation recorded any.
    pub match_args: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            matcher: QueryMatcher::default(),
            ordered: true,
            match_args: true,
        }
    }
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matcher(mut self, matcher: QueryMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    #[must_use]
    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    #[must_use]
    pub fn match_args(mut self, match_args: bool) -> Self {
        self.match_args = match_args;
        self
    }
}
