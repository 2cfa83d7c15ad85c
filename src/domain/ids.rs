//! Source identifier type with validation
//!
//! A source name is used verbatim as the stem of its archive entry, so it has to
//! be something an archive reader can turn back into a file name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a configuration source
///
/// # Examples
///
/// ```
/// use confzip::domain::ids::SourceName;
/// use std::str::FromStr;
///
/// let name = SourceName::from_str("home").unwrap();
/// assert_eq!(name.entry_name(), "home.conf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceName(String);

impl SourceName {
    /// Extension appended to the name to form the archive entry name
    pub const ENTRY_EXTENSION: &'static str = "conf";

    /// Creates a new SourceName
    ///
    /// # Returns
    ///
    /// Returns `Err` if the name is blank or contains a path separator or NUL
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Source name cannot be empty".to_string());
        }
        if let Some(c) = name.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(format!(
                "Source name '{}' contains forbidden character {:?}",
                name.escape_debug(),
                c
            ));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Archive entry name for this source (`<name>.conf`)
    pub fn entry_name(&self) -> String {
        format!("{}.{}", self.0, Self::ENTRY_EXTENSION)
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SourceName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SourceName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SourceName> for String {
    fn from(name: SourceName) -> Self {
        name.0
    }
}

impl AsRef<str> for SourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_source_name_valid() {
        let name = SourceName::new("office-vpn").unwrap();
        assert_eq!(name.as_str(), "office-vpn");
        assert_eq!(name.to_string(), "office-vpn");
        assert_eq!(name.entry_name(), "office-vpn.conf");
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    #[test_case("a/b" ; "forward slash")]
    #[test_case("a\\b" ; "backslash")]
    #[test_case("a\0b" ; "nul")]
    fn test_source_name_rejected(input: &str) {
        assert!(SourceName::new(input).is_err());
    }

    #[test]
    fn test_source_name_keeps_unicode_verbatim() {
        let name = SourceName::from_str("café wg0").unwrap();
        assert_eq!(name.entry_name(), "café wg0.conf");
    }

    #[test]
    fn test_source_name_serde() {
        let name: SourceName = serde_json::from_str("\"home\"").unwrap();
        assert_eq!(name.as_str(), "home");
        assert!(serde_json::from_str::<SourceName>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"home\"");
    }
}
