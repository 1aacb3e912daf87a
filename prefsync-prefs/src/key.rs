//! Preference keys.

use crate::value::{PrefValue, ValueType};
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

/// Type-erased metadata of a preference key.
///
/// This is what [`EventListener`](crate::EventListener)s receive, so a
/// single listener can observe keys of every value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDescriptor {
    name: String,
    value_type: ValueType,
    tags: BTreeSet<String>,
    cacheable: bool,
}

impl KeyDescriptor {
    /// Creates a descriptor with no tags that is not cached in memory.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            tags: BTreeSet::new(),
            cacheable: false,
        }
    }

    /// Returns the key name (unique within a store).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared value type.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns true if the key carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns all tags on the key.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Returns whether the store keeps this key's value in memory.
    pub fn is_cacheable(&self) -> bool {
        self.cacheable
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Sets whether the value is cached in memory.
    pub fn cacheable(mut self, cacheable: bool) -> Self {
        self.cacheable = cacheable;
        self
    }
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.value_type)
    }
}

/// A typed handle to a named preference.
///
/// Keys are immutable once built; the builder methods consume and return
/// the key.
pub struct PrefsKey<T> {
    descriptor: KeyDescriptor,
    _value: PhantomData<fn() -> T>,
}

impl<T: PrefValue> PrefsKey<T> {
    /// Creates an untagged key whose declared type is `T::VALUE_TYPE`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            descriptor: KeyDescriptor::new(name, T::VALUE_TYPE),
            _value: PhantomData,
        }
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.descriptor = self.descriptor.with_tag(tag);
        self
    }

    /// Adds several tags.
    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().fold(self, |key, tag| key.with_tag(tag))
    }

    /// Sets whether the store keeps the value in its in-memory cache.
    pub fn cacheable(mut self, cacheable: bool) -> Self {
        self.descriptor = self.descriptor.cacheable(cacheable);
        self
    }
}

impl<T> PrefsKey<T> {
    /// Returns the type-erased metadata.
    pub fn descriptor(&self) -> &KeyDescriptor {
        &self.descriptor
    }

    /// Returns the key name.
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Returns true if the key carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.descriptor.has_tag(tag)
    }
}

impl<T> Clone for PrefsKey<T> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PrefsKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefsKey")
            .field("descriptor", &self.descriptor)
            .finish()
    }
}
