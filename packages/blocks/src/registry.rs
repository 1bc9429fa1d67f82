//! # Block Type Registry
//!
//! Lookup table from type key (`"heading"`, `"list"`, ...) to the
//! [`BlockType`] implementing it. Registries are values: [`BlockRegistry::register`]
//! returns a new registry and leaves the original untouched, so references
//! captured earlier keep seeing the set of types they were created with.

use crate::block_type::BlockType;
use crate::{Heading, Image, List, Paragraph};
use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown block type: {0}")]
    UnknownType(String),
}

/// Ordered mapping of type key to descriptor
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    types: IndexMap<String, Arc<dyn BlockType>>,
}

impl BlockRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in kinds, in toolbar order
    pub fn get_all() -> Self {
        let mut types: IndexMap<String, Arc<dyn BlockType>> = IndexMap::new();
        types.insert("heading".to_string(), Arc::new(Heading));
        types.insert("paragraph".to_string(), Arc::new(Paragraph));
        types.insert("image".to_string(), Arc::new(Image));
        types.insert("list".to_string(), Arc::new(List));
        Self { types }
    }

    /// New registry with `key` added (or replaced); `self` is unchanged
    pub fn register(&self, key: impl Into<String>, descriptor: Arc<dyn BlockType>) -> Self {
        let mut types = self.types.clone();
        types.insert(key.into(), descriptor);
        Self { types }
    }

    /// New registry holding only `keys`, in the order given
    pub fn restrict<S: AsRef<str>>(&self, keys: &[S]) -> Result<Self, RegistryError> {
        let mut types = IndexMap::new();
        for key in keys {
            let key = key.as_ref();
            let descriptor = self
                .types
                .get(key)
                .ok_or_else(|| RegistryError::UnknownType(key.to_string()))?;
            types.insert(key.to_string(), Arc::clone(descriptor));
        }
        Ok(Self { types })
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn BlockType>> {
        self.types.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn BlockType>)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Free-function form of [`BlockRegistry::register`]
pub fn register(
    existing: &BlockRegistry,
    key: impl Into<String>,
    descriptor: Arc<dyn BlockType>,
) -> BlockRegistry {
    existing.register(key, descriptor)
}
