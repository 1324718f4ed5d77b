use serde::{Deserialize, Serialize};
use std::fmt;

/// A trimmed, non-empty display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: &str) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Display name cannot be empty".to_string());
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn initials(&self) -> String {
        initials(&self.0)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upper-cased first letters of the first two words of `name`.
///
/// Returns an empty string for blank input; callers decide the fallback.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let name = DisplayName::new("  Ada Lovelace \n").unwrap();
        assert_eq!(name.as_str(), "Ada Lovelace");
    }

    #[test]
    fn test_blank_names_are_rejected() {
        assert!(DisplayName::new("").is_err());
        assert!(DisplayName::new("   ").is_err());
        assert!(DisplayName::new("\t\n").is_err());
    }

    #[test]
    fn test_long_names_are_kept_whole() {
        let long = "x".repeat(500);
        assert_eq!(DisplayName::new(&long).unwrap().as_str(), long);
    }

    #[test]
    fn test_initials_use_first_two_words() {
        assert_eq!(initials("ada lovelace"), "AL");
        assert_eq!(initials("Maya R."), "MR");
        assert_eq!(initials("Grace Brewster Murray Hopper"), "GB");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn test_initials_handle_non_ascii() {
        assert_eq!(initials("émile zola"), "ÉZ");
    }
}
