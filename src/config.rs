// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Backend client configuration.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_URL_ENV: &str = "CONVOSCRIBE_API_URL";
pub const TIMEOUT_SECS_ENV: &str = "CONVOSCRIBE_TIMEOUT_SECS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid timeout {value:?}: expected a positive number of seconds")]
    InvalidTimeout { value: String },

    #[error("api url must not be empty")]
    EmptyApiUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: String,
    timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let api_url = api_url.into().trim().trim_end_matches('/').to_owned();
        if api_url.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        Ok(Self { api_url, timeout })
    }

    /// Defaults overridden by `CONVOSCRIBE_API_URL` / `CONVOSCRIBE_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let timeout = match lookup(TIMEOUT_SECS_ENV) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Self::new(api_url, timeout)
    }

    pub fn with_api_url(self, api_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(api_url, self.timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout { value: raw.to_owned() }),
    }
}
