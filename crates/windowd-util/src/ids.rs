//! Strongly-typed names for windowd

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Result, WindowdError};

/// Name of the service manager unit being kept in its window (e.g. `apache2`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitName(String);

impl UnitName {
    /// Parse a unit name, rejecting values `systemctl` would misinterpret
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(WindowdError::unit_name(name, "cannot be empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(WindowdError::unit_name(name, "cannot contain whitespace"));
        }
        if name.starts_with('-') {
            return Err(WindowdError::unit_name(name, "cannot start with '-'"));
        }
        if name.contains('/') {
            return Err(WindowdError::unit_name(name, "cannot contain '/'"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_name_accepts_plain_names() {
        assert_eq!(UnitName::parse("apache2").unwrap().as_str(), "apache2");
        assert_eq!(
            UnitName::parse("nginx.service").unwrap().to_string(),
            "nginx.service"
        );
    }

    #[test]
    fn unit_name_rejects_bad_names() {
        assert!(UnitName::parse("").is_err());
        assert!(UnitName::parse("apache 2").is_err());
        assert!(UnitName::parse("--now").is_err());
        assert!(UnitName::parse("../etc").is_err());
    }
}
