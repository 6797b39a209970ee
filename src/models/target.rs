//! Probe target model

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named probe destination
///
/// Targets are owned by the server registry; a run only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Display name, unique within a registry
    pub name: String,

    /// Host to probe (IP address or hostname, handed to the ping command verbatim)
    pub address: String,
}

impl Target {
    /// Create a new target
    pub fn new<N: Into<String>, A: Into<String>>(name: N, address: A) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Create a target whose name is its address (ad-hoc CLI targets)
    pub fn from_address<A: Into<String>>(address: A) -> Self {
        let address = address.into();
        Self {
            name: address.clone(),
            address,
        }
    }

    /// Validate name and address are present
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("target name must not be empty"));
        }
        if self.address.trim().is_empty() {
            return Err(AppError::validation(format!(
                "target '{}' has an empty address",
                self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.address {
            write!(f, "{}", self.address)
        } else {
            write!(f, "{} ({})", self.name, self.address)
        }
    }
}

impl FromStr for Target {
    type Err = AppError;

    /// Parse `NAME=ADDRESS` or a bare `ADDRESS`
    fn from_str(s: &str) -> Result<Self> {
        let target = match s.split_once('=') {
            Some((name, address)) => Self::new(name.trim(), address.trim()),
            None => Self::from_address(s.trim()),
        };
        target.validate()?;
        Ok(target)
    }
}
