//! Cache Key Module
//!
//! Deterministic key derivation from a domain label and call arguments.
//!
//! Keys have the form `<label>:<sha256 hex>`. The digest covers the label and
//! every component, each length-prefixed, so `("ab", "c")` and `("a", "bc")`
//! never produce the same key. Nothing process-specific goes into the digest:
//! equal inputs give equal keys across runs.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;

const POSITIONAL_TAG: u8 = 0x01;
const NAMED_TAG: u8 = 0x02;

// == Cache Key Builder ==
/// Builds a stable cache key from ordered and named components.
///
/// Positional components keep the order they were added in. Named components
/// are sorted by name when the key is built, so callers can add them in any
/// order. Unordered collections passed through [`CacheKeyBuilder::serialized`]
/// must be sorted by the caller first.
#[derive(Debug, Clone, Default)]
pub struct CacheKeyBuilder {
    label: String,
    positional: Vec<String>,
    named: BTreeMap<String, String>,
}

impl CacheKeyBuilder {
    /// Starts a key for the given domain label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            positional: Vec::new(),
            named: BTreeMap::new(),
        }
    }

    /// Appends a string component.
    pub fn component(mut self, component: impl AsRef<str>) -> Self {
        self.positional.push(component.as_ref().to_string());
        self
    }

    /// Appends any value using its `Display` form.
    pub fn display(mut self, component: impl Display) -> Self {
        self.positional.push(component.to_string());
        self
    }

    /// Appends a value using its JSON serialization.
    pub fn serialized<T: Serialize + ?Sized>(mut self, component: &T) -> Result<Self> {
        self.positional.push(serde_json::to_string(component)?);
        Ok(self)
    }

    /// Sets a named component. A repeated name replaces the earlier value.
    pub fn named(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.named.insert(name.into(), value.as_ref().to_string());
        self
    }

    /// Produces the key.
    pub fn build(&self) -> String {
        let mut hasher = Sha256::new();
        write_field(&mut hasher, self.label.as_bytes());

        for component in &self.positional {
            hasher.update([POSITIONAL_TAG]);
            write_field(&mut hasher, component.as_bytes());
        }
        for (name, value) in &self.named {
            hasher.update([NAMED_TAG]);
            write_field(&mut hasher, name.as_bytes());
            write_field(&mut hasher, value.as_bytes());
        }

        format!("{}:{}", self.label, hex::encode(hasher.finalize()))
    }
}

/// Derives a key from a label and an ordered list of string components.
pub fn cache_key<I, S>(label: &str, components: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    components
        .into_iter()
        .fold(CacheKeyBuilder::new(label), |builder, c| builder.component(c))
        .build()
}

fn write_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_key_is_deterministic() {
        let a = CacheKeyBuilder::new("llm").component("what is ibuprofen?").build();
        let b = CacheKeyBuilder::new("llm").component("what is ibuprofen?").build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_is_stable_across_runs() {
        let key = CacheKeyBuilder::new("medicine")
            .component("paracetamol")
            .named("dose", "500mg")
            .build();

        assert_eq!(
            key,
            "medicine:862a6166ab4a9060cea284e7383145edd1f5b67d4d26b0497176221b47b9a752"
        );
    }

    #[test]
    fn test_key_has_label_prefix() {
        let key = cache_key("ocr", ["abc"]);
        assert!(key.starts_with("ocr:"));
        // label + ':' + 64 hex chars
        assert_eq!(key.len(), "ocr:".len() + 64);
    }

    #[test]
    fn test_component_change_changes_key() {
        let a = cache_key("agent", ["user-1", "headache"]);
        let b = cache_key("agent", ["user-1", "fever"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_component_order_matters() {
        let a = cache_key("agent", ["x", "y"]);
        let b = cache_key("agent", ["y", "x"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_component_boundaries_are_unambiguous() {
        let a = cache_key("llm", ["ab", "c"]);
        let b = cache_key("llm", ["a", "bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_label_changes_key_digest() {
        let a = cache_key("medicine", ["aspirin"]);
        let b = cache_key("ocr", ["aspirin"]);
        assert_ne!(a.split(':').nth(1), b.split(':').nth(1));
    }

    #[test]
    fn test_named_components_are_order_independent() {
        let a = CacheKeyBuilder::new("agent")
            .named("age", "42")
            .named("symptom", "cough")
            .build();
        let b = CacheKeyBuilder::new("agent")
            .named("symptom", "cough")
            .named("age", "42")
            .build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_named_and_positional_are_distinct() {
        let a = CacheKeyBuilder::new("agent").component("age").component("42").build();
        let b = CacheKeyBuilder::new("agent").named("age", "42").build();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_component() {
        let a = CacheKeyBuilder::new("ocr").display(42u32).build();
        let b = CacheKeyBuilder::new("ocr").component("42").build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialized_component() {
        let symptoms: BTreeSet<&str> = ["fever", "cough"].into_iter().collect();
        let a = CacheKeyBuilder::new("agent")
            .serialized(&symptoms)
            .unwrap()
            .build();
        let b = CacheKeyBuilder::new("agent")
            .serialized(&["cough", "fever"])
            .unwrap()
            .build();
        assert_eq!(a, b);
    }
}
