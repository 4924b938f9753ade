//! # Widget Configuration
//!
//! Deployment-level settings shared by every widget attachment.
//!
//! ## Overview
//!
//! The widget is served from a different origin per deployment target. The
//! base locators are configuration values rather than literals in the bridge,
//! because the test and local values differ between environments:
//!
//! | Network | Default base locator | Override |
//! |---------|----------------------|----------|
//! | `main`  | `https://widget.hydroprotocol.io/` | `HYDRO_WIDGET_MAIN_URL` |
//! | `test`  | `https://widget-test.hydroprotocol.io/` | `HYDRO_WIDGET_TEST_URL` |
//! | `local` | `http://localhost:3000/` | `HYDRO_WIDGET_LOCAL_URL` |
//!
//! ## Usage
//!
//! ```no_run
//! use core_runtime::config::{Network, WidgetEndpoints};
//!
//! let endpoints = WidgetEndpoints::default()
//!     .with_local("http://localhost:8080/");
//! endpoints.validate().expect("valid endpoints");
//!
//! let base = endpoints.base_for(Network::Local).unwrap();
//! assert_eq!(base.as_str(), "http://localhost:8080/");
//! ```

use std::fmt;
use std::str::FromStr;

use bridge_traits::layout::{ContainerStyle, FrameStyle};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_MAIN_URL: &str = "https://widget.hydroprotocol.io/";
pub const DEFAULT_TEST_URL: &str = "https://widget-test.hydroprotocol.io/";
pub const DEFAULT_LOCAL_URL: &str = "http://localhost:3000/";

pub const MAIN_URL_ENV: &str = "HYDRO_WIDGET_MAIN_URL";
pub const TEST_URL_ENV: &str = "HYDRO_WIDGET_TEST_URL";
pub const LOCAL_URL_ENV: &str = "HYDRO_WIDGET_LOCAL_URL";

/// Deployment target the widget is loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Main,
    Test,
    Local,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Local => "local",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Test),
            "local" => Ok(Network::Local),
            other => Err(Error::Config(format!("Unknown network: {}", other))),
        }
    }
}

/// Base locators for each [`Network`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEndpoints {
    pub main: String,
    pub test: String,
    pub local: String,
}

impl Default for WidgetEndpoints {
    fn default() -> Self {
        Self {
            main: DEFAULT_MAIN_URL.to_string(),
            test: DEFAULT_TEST_URL.to_string(),
            local: DEFAULT_LOCAL_URL.to_string(),
        }
    }
}

impl WidgetEndpoints {
    /// Defaults overridden by the `HYDRO_WIDGET_*_URL` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut endpoints = Self::default();
        if let Some(main) = lookup(MAIN_URL_ENV) {
            endpoints.main = main;
        }
        if let Some(test) = lookup(TEST_URL_ENV) {
            endpoints.test = test;
        }
        if let Some(local) = lookup(LOCAL_URL_ENV) {
            endpoints.local = local;
        }
        endpoints.validate()?;
        Ok(endpoints)
    }

    pub fn with_main(mut self, url: impl Into<String>) -> Self {
        self.main = url.into();
        self
    }

    pub fn with_test(mut self, url: impl Into<String>) -> Self {
        self.test = url.into();
        self
    }

    pub fn with_local(mut self, url: impl Into<String>) -> Self {
        self.local = url.into();
        self
    }

    /// Checks that every base locator is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        for network in [Network::Main, Network::Test, Network::Local] {
            self.base_for(network)?;
        }
        Ok(())
    }

    /// Parsed base locator for `network`.
    pub fn base_for(&self, network: Network) -> Result<Url> {
        let raw = match network {
            Network::Main => &self.main,
            Network::Test => &self.test,
            Network::Local => &self.local,
        };

        let url = Url::parse(raw).map_err(|e| {
            Error::Config(format!("Invalid {} widget URL '{}': {}", network, raw, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "{} widget URL must be an absolute http(s) URL, got '{}'",
                network, raw
            )));
        }

        Ok(url)
    }
}

/// Presentation of the attached widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLayout {
    pub container: ContainerStyle,
    pub frame: FrameStyle,
}

impl WidgetLayout {
    pub fn with_container(mut self, container: ContainerStyle) -> Self {
        self.container = container;
        self
    }

    pub fn with_frame(mut self, frame: FrameStyle) -> Self {
        self.frame = frame;
        self
    }
}
