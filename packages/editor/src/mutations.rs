//! # Document Mutations
//!
//! Every change to the page is a [`Mutation`] value. The facade's methods
//! build one and hand it to [`Document::apply`], and hosts can replay the
//! same values from JSON.
//!
//! ## Mutation Semantics
//!
//! ### AddBlock
//! - Fails with `UnknownType` if the key is not registered
//! - Appends a copy of the type's default props and selects the new block
//!
//! ### SelectBlock
//! - Selects the block if present, otherwise clears the selection
//!
//! ### UpdateProperty
//! - Writes one key on the selected block
//! - No-op when nothing is selected
//!
//! ### DeleteBlock
//! - Removes the block; clears the selection if it pointed there
//! - Absent ids are a no-op
//!
//! ### Reorder
//! - The document becomes the named existing blocks, in the order given
//! - Unknown and repeated ids are skipped; blocks not named are dropped

use crate::document::{BlockId, BlockInstance, Document};
use indexmap::IndexMap;
use pagebuilder_blocks::{BlockRegistry, PropValue, PropertyError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Semantic operations on the document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Append a block of a registered type
    AddBlock {
        #[serde(rename = "blockType")]
        block_type: String,
    },

    /// Move the selection pointer
    SelectBlock { id: BlockId },

    /// Set a property on the selected block
    UpdateProperty { key: String, value: PropValue },

    /// Remove a block
    DeleteBlock { id: BlockId },

    /// Replace the document order
    Reorder { order: Vec<BlockId> },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Unknown block type: {0}")]
    UnknownType(String),

    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// What a mutation did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationResult {
    /// Document revision after the mutation
    pub revision: u64,

    /// Whether blocks, props or selection changed
    pub changed: bool,

    /// Whether the selection pointer moved (including being cleared)
    pub selection_changed: bool,

    /// Block created by `AddBlock`
    pub created: Option<BlockId>,
}

impl MutationResult {
    fn unchanged() -> Self {
        Self::default()
    }
}

impl Mutation {
    /// Apply to `doc`. Use [`Document::apply`], which also tracks the revision.
    pub(crate) fn apply(
        &self,
        doc: &mut Document,
        registry: &BlockRegistry,
    ) -> Result<MutationResult, MutationError> {
        match self {
            Mutation::AddBlock { block_type } => Self::apply_add(doc, registry, block_type),
            Mutation::SelectBlock { id } => Ok(Self::apply_select(doc, *id)),
            Mutation::UpdateProperty { key, value } => Self::apply_update(doc, key, value),
            Mutation::DeleteBlock { id } => Ok(Self::apply_delete(doc, *id)),
            Mutation::Reorder { order } => Ok(Self::apply_reorder(doc, order)),
        }
    }

    fn apply_add(
        doc: &mut Document,
        registry: &BlockRegistry,
        block_type: &str,
    ) -> Result<MutationResult, MutationError> {
        let descriptor = registry
            .get(block_type)
            .ok_or_else(|| MutationError::UnknownType(block_type.to_string()))?;

        let id = doc.next_id();
        doc.push(BlockInstance {
            id,
            block_type: block_type.to_string(),
            props: descriptor.default_props(),
        });
        doc.set_selected(Some(id));

        debug!(%id, block_type, "Added block");
        Ok(MutationResult {
            changed: true,
            selection_changed: true,
            created: Some(id),
            ..Default::default()
        })
    }

    fn apply_select(doc: &mut Document, id: BlockId) -> MutationResult {
        let target = doc.contains(id).then_some(id);
        if target.is_none() {
            debug!(%id, "Selecting absent block; clearing selection");
        }

        let selection_changed = doc.selected_id() != target;
        doc.set_selected(target);

        MutationResult {
            changed: selection_changed,
            selection_changed,
            ..Default::default()
        }
    }

    fn apply_update(
        doc: &mut Document,
        key: &str,
        value: &PropValue,
    ) -> Result<MutationResult, MutationError> {
        let Some(id) = doc.selected_id() else {
            debug!(key, "Property update with nothing selected");
            return Ok(MutationResult::unchanged());
        };
        let Some(block) = doc.get_mut(id) else {
            return Ok(MutationResult::unchanged());
        };

        block.props.set(key, value.clone())?;

        debug!(%id, key, "Updated property");
        Ok(MutationResult {
            changed: true,
            ..Default::default()
        })
    }

    fn apply_delete(doc: &mut Document, id: BlockId) -> MutationResult {
        let was_selected = doc.selected_id() == Some(id);

        match doc.remove(id) {
            Some(_) => {
                debug!(%id, "Deleted block");
                MutationResult {
                    changed: true,
                    selection_changed: was_selected,
                    ..Default::default()
                }
            }
            None => {
                debug!(%id, "Delete of absent block ignored");
                MutationResult::unchanged()
            }
        }
    }

    fn apply_reorder(doc: &mut Document, order: &[BlockId]) -> MutationResult {
        let before = doc.ids();
        let selected = doc.selected_id();

        let mut remaining: IndexMap<BlockId, BlockInstance> =
            doc.blocks().iter().map(|b| (b.id, b.clone())).collect();
        let mut reordered = Vec::with_capacity(order.len());

        for id in order {
            match remaining.shift_remove(id) {
                Some(block) => reordered.push(block),
                None => warn!(%id, "Reorder names an unknown or repeated block"),
            }
        }

        if !remaining.is_empty() {
            debug!(dropped = remaining.len(), "Reorder dropped blocks it did not name");
        }

        doc.replace_blocks(reordered);

        let changed = doc.ids() != before;
        MutationResult {
            changed,
            selection_changed: doc.selected_id() != selected,
            ..Default::default()
        }
    }
}
