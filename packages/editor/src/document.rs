//! # Document Model
//!
//! Ordered, identity-stable collection of block instances plus a single
//! selection pointer.
//!
//! ## Invariants
//!
//! - Ids are assigned once, on creation or seeding, and never reused.
//! - `selected`, if set, names an instance in `blocks`. Every operation
//!   that removes instances clears it when its target goes away.
//! - Only `props` mutate in place. Type and id never change.
//!
//! All changes go through [`Document::apply`] so the revision counter
//! sees every effective mutation.

use crate::config::BlockSeed;
use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationError, MutationResult};
use pagebuilder_blocks::{BlockRegistry, Props};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use tracing::{debug, warn};

/// Stable identity of a block instance (`data-element-id` in the preview)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BlockId)
    }
}

impl From<u64> for BlockId {
    fn from(id: u64) -> Self {
        BlockId(id)
    }
}

/// Largest id a JavaScript number holds exactly
pub const MAX_BLOCK_ID: u64 = (1 << 53) - 1;

/// Low bits reserved for the per-session counter
const COUNTER_BITS: u32 = 10;
const COUNTER_MASK: u64 = (1 << COUNTER_BITS) - 1;

/// Issues block ids: a millisecond timestamp combined with a counter.
///
/// Ids are strictly increasing for the generator's lifetime even if the
/// clock steps backwards, and stay below 2^53 so they survive a trip
/// through a JavaScript number.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    counter: u64,
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> BlockId {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.counter = self.counter.wrapping_add(1);

        let candidate = (now << COUNTER_BITS) | (self.counter & COUNTER_MASK);
        let id = candidate.max(self.last.saturating_add(1));
        self.last = id;
        BlockId(id)
    }

    /// Make sure future ids sort after `id` (used for seeded instances)
    pub fn observe(&mut self, id: BlockId) {
        self.last = self.last.max(id.0);
    }
}

/// One block on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockInstance {
    pub id: BlockId,

    /// Registry key
    #[serde(rename = "type")]
    pub block_type: String,

    pub props: Props,
}

/// The page being edited
#[derive(Debug, Default)]
pub struct Document {
    blocks: Vec<BlockInstance>,
    selected: Option<BlockId>,
    ids: IdGenerator,

    /// Increments on each effective mutation
    pub revision: u64,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from seed entries.
    ///
    /// Seed props are merged over the type's defaults. A seed without an id,
    /// or whose id is already taken, gets a fresh one. Ids above
    /// [`MAX_BLOCK_ID`] are rejected.
    pub fn seed(seeds: &[BlockSeed], registry: &BlockRegistry) -> Result<Self, EditorError> {
        let mut doc = Self::new();
        let mut taken = HashSet::new();

        // Reserve explicit ids first so generated ones never collide with them
        for seed in seeds {
            if let Some(id) = seed.id {
                if id.0 > MAX_BLOCK_ID {
                    return Err(EditorError::InvalidBlockId(id));
                }
                doc.ids.observe(id);
            }
        }

        for seed in seeds {
            let descriptor = registry
                .get(&seed.block_type)
                .ok_or_else(|| EditorError::UnknownType(seed.block_type.clone()))?;
            let props = descriptor.decode_props(seed.props.clone())?;

            let id = match seed.id {
                Some(id) if taken.insert(id) => id,
                Some(id) => {
                    let fresh = doc.ids.next_id();
                    warn!(%id, %fresh, "Duplicate seed id; assigning a fresh one");
                    taken.insert(fresh);
                    fresh
                }
                None => {
                    let fresh = doc.ids.next_id();
                    taken.insert(fresh);
                    fresh
                }
            };

            doc.blocks.push(BlockInstance {
                id,
                block_type: seed.block_type.clone(),
                props,
            });
        }

        debug!(blocks = doc.blocks.len(), "Seeded document");
        Ok(doc)
    }

    /// Parse a saved block list (`[{ id?, type, props }]` or `{ "blocks": [...] }`)
    pub fn from_json(json: &str, registry: &BlockRegistry) -> Result<Self, EditorError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Saved {
            List(Vec<BlockSeed>),
            Wrapped { blocks: Vec<BlockSeed> },
        }

        let seeds = match serde_json::from_str(json)? {
            Saved::List(seeds) | Saved::Wrapped { blocks: seeds } => seeds,
        };
        Self::seed(&seeds, registry)
    }

    /// Block list as `[{ id, type, props }]`, readable by [`Document::from_json`]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.blocks).unwrap_or(serde_json::Value::Null)
    }

    /// Apply a mutation, bumping the revision if anything changed
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        registry: &BlockRegistry,
    ) -> Result<MutationResult, MutationError> {
        let mut result = mutation.apply(self, registry)?;
        if result.changed {
            self.revision += 1;
        }
        result.revision = self.revision;
        Ok(result)
    }

    /// Output markup: each block's render, in order
    pub fn render_body(&self, registry: &BlockRegistry) -> String {
        self.blocks
            .iter()
            .map(|block| match registry.get(&block.block_type) {
                Some(descriptor) => descriptor.render(&block.props),
                None => {
                    warn!(id = %block.id, block_type = %block.block_type, "Skipping block of unregistered type");
                    String::new()
                }
            })
            .collect()
    }

    pub fn blocks(&self) -> &[BlockInstance] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Ids in document order
    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id).collect()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn get(&self, id: BlockId) -> Option<&BlockInstance> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn selected_id(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&BlockInstance> {
        self.selected.and_then(|id| self.get(id))
    }

    pub(crate) fn get_mut(&mut self, id: BlockId) -> Option<&mut BlockInstance> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub(crate) fn next_id(&mut self) -> BlockId {
        self.ids.next_id()
    }

    pub(crate) fn push(&mut self, instance: BlockInstance) {
        self.blocks.push(instance);
    }

    pub(crate) fn remove(&mut self, id: BlockId) -> Option<BlockInstance> {
        let index = self.position(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.blocks.remove(index))
    }

    pub(crate) fn set_selected(&mut self, id: Option<BlockId>) {
        self.selected = id;
    }

    /// Swap in a new block sequence, keeping the selection invariant
    pub(crate) fn replace_blocks(&mut self, blocks: Vec<BlockInstance>) {
        self.blocks = blocks;
        if let Some(id) = self.selected {
            if !self.contains(id) {
                self.selected = None;
            }
        }
    }
}
