//! Capability checks.
//!
//! Each page names the capability a viewer must hold. Whoever presents the
//! menu supplies a [`CapabilityCheck`] describing the current viewer.

use std::collections::HashSet;

/// Answers whether the current viewer holds a capability.
pub trait CapabilityCheck {
    /// Whether `capability` is held.
    fn has_capability(&self, capability: &str) -> bool;
}

/// A viewer holding an explicit set of capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    held: HashSet<String>,
}

impl CapabilitySet {
    /// Create a set from capability names.
    pub fn new<I, S>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            held: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a capability.
    pub fn grant(&mut self, capability: impl Into<String>) {
        self.held.insert(capability.into());
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl CapabilityCheck for CapabilitySet {
    fn has_capability(&self, capability: &str) -> bool {
        self.held.contains(capability)
    }
}

/// A viewer holding every capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CapabilityCheck for AllowAll {
    fn has_capability(&self, _capability: &str) -> bool {
        true
    }
}
