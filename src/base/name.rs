//! Case-insensitive MSBuild names.
//!
//! Element, attribute, property, item and metadata names compare with
//! ASCII case folding. [`Name`] keeps the spelling it was created with
//! for display but hashes and compares folded.

use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

#[derive(Clone, Default)]
pub struct Name(SmolStr);

impl Name {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(SmolStr::new(text.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_smol_str(&self) -> &SmolStr {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive comparison against a plain string.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Name {}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.matches(other)
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.matches(other)
    }
}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self(SmolStr::from(value))
    }
}

impl From<SmolStr> for Name {
    fn from(value: SmolStr) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_case_insensitive_eq() {
        assert_eq!(Name::new("OutputPath"), Name::new("outputpath"));
        assert!(Name::new("Compile").matches("COMPILE"));
        assert_ne!(Name::new("Compile"), Name::new("Compiles"));
    }

    #[test]
    fn test_hash_folds_case() {
        let mut set = FxHashSet::default();
        set.insert(Name::new("Configuration"));
        assert!(set.contains(&Name::new("CONFIGURATION")));
        assert!(!set.insert(Name::new("configuration")));
    }

    #[test]
    fn test_display_keeps_spelling() {
        assert_eq!(Name::new("TargetFramework").to_string(), "TargetFramework");
    }
}
