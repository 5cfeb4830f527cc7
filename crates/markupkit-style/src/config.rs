//! Per-selector style override configuration.
//!
//! Selector bags are created lazily the first time a property is written and
//! dropped again once their last property is removed, so an empty bag never
//! survives a mutation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use markupkit_core::StyleError;

/// Property name to value.
pub type PropertyBag = BTreeMap<String, String>;

/// Style overrides: selector bags plus one free-form stylesheet fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignConfig {
    #[serde(default)]
    pub selectors: BTreeMap<String, PropertyBag>,
    #[serde(default)]
    pub custom_css: String,
}

impl DesignConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there are no overrides and no custom fragment.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty() && self.custom_css.trim().is_empty()
    }

    /// Total number of declared properties across all selectors.
    pub fn property_count(&self) -> usize {
        self.selectors.values().map(BTreeMap::len).sum()
    }

    /// Value of `property` under `selector`, if set.
    pub fn get(&self, selector: &str, property: &str) -> Option<&str> {
        self.selectors
            .get(selector.trim())
            .and_then(|bag| bag.get(property.trim()))
            .map(String::as_str)
    }

    /// Property bag of a selector.
    pub fn selector(&self, selector: &str) -> Option<&PropertyBag> {
        self.selectors.get(selector.trim())
    }

    /// Sets a property. A blank value removes it instead.
    ///
    /// Returns whether the configuration changed.
    pub fn set_property(
        &mut self,
        selector: &str,
        property: &str,
        value: &str,
    ) -> Result<bool, StyleError> {
        let (selector, property) = validate_key(selector, property)?;
        let value = value.trim();
        if value.is_empty() {
            return Ok(self.remove(selector, property));
        }
        let bag = self.selectors.entry(selector.to_string()).or_default();
        match bag.get(property) {
            Some(existing) if existing == value => Ok(false),
            _ => {
                bag.insert(property.to_string(), value.to_string());
                Ok(true)
            }
        }
    }

    /// Removes a property, dropping the selector bag if it becomes empty.
    pub fn remove_property(&mut self, selector: &str, property: &str) -> Result<bool, StyleError> {
        let (selector, property) = validate_key(selector, property)?;
        Ok(self.remove(selector, property))
    }

    /// Removes a selector and all its properties.
    pub fn remove_selector(&mut self, selector: &str) -> bool {
        self.selectors.remove(selector.trim()).is_some()
    }

    /// Replaces the free-form fragment. Returns whether it changed.
    pub fn set_custom_css(&mut self, css: impl Into<String>) -> bool {
        let css = css.into();
        if css == self.custom_css {
            return false;
        }
        self.custom_css = css;
        true
    }

    /// Clears every override and the custom fragment.
    pub fn reset(&mut self) -> bool {
        let changed = !self.selectors.is_empty() || !self.custom_css.is_empty();
        self.selectors.clear();
        self.custom_css.clear();
        changed
    }

    fn remove(&mut self, selector: &str, property: &str) -> bool {
        let Some(bag) = self.selectors.get_mut(selector) else {
            return false;
        };
        let removed = bag.remove(property).is_some();
        if bag.is_empty() {
            self.selectors.remove(selector);
        }
        removed
    }
}

fn validate_key<'a>(selector: &'a str, property: &'a str) -> Result<(&'a str, &'a str), StyleError> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(StyleError::EmptySelector);
    }
    let property = property.trim();
    if property.is_empty() {
        return Err(StyleError::EmptyProperty {
            selector: selector.to_string(),
        });
    }
    Ok((selector, property))
}
