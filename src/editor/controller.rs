//! # Editor Controller
//!
//! The single authority over the block sequence of the page being edited and
//! over which block is selected.
//!
//! Every operation is synchronous and atomic with respect to the sequence.
//! Operations that name a missing block or an unknown type are silent no-ops:
//! they come from stale UI events, not programmer errors.

use std::collections::HashSet;

use tracing::debug;

use super::reorder;
use crate::model::{Block, BlockId, BlockType, Props};
use crate::template;

/// Generates fresh block identities.
pub type IdGenerator = Box<dyn FnMut() -> BlockId + Send>;

pub struct EditorController {
    blocks: Vec<Block>,
    selected: Option<BlockId>,
    next_id_fn: IdGenerator,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EditorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorController")
            .field("blocks", &self.blocks)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl EditorController {
    /// Creates an empty document using random UUID ids.
    pub fn new() -> Self {
        Self::with_id_generator(BlockId::generate)
    }

    /// Creates an empty document with a custom id source.
    pub fn with_id_generator(next_id_fn: impl FnMut() -> BlockId + Send + 'static) -> Self {
        Self {
            blocks: Vec::new(),
            selected: None,
            next_id_fn: Box::new(next_id_fn),
        }
    }

    /// Opens an existing block sequence for editing.
    ///
    /// A block whose id was already seen earlier in the tree gets a fresh one,
    /// so every block stays addressable.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut controller = Self::new();
        let mut seen = HashSet::new();
        let mut blocks = blocks;
        for block in blocks.iter_mut() {
            controller.claim_ids(block, &mut seen);
        }
        controller.blocks = blocks;
        controller
    }

    fn claim_ids(&mut self, block: &mut Block, seen: &mut HashSet<BlockId>) {
        if !seen.insert(block.id.clone()) {
            let fresh = (self.next_id_fn)();
            debug!(id = %block.id, %fresh, "Repeated block id replaced");
            block.id = fresh.clone();
            seen.insert(fresh);
        }
        if let Some(children) = block.children.as_mut() {
            for child in children {
                self.claim_ids(child, seen);
            }
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Looks up a top-level block.
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn selected_id(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    /// The selected block as it currently stands in the sequence.
    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Appends a fresh block of `kind` to the end of the page.
    pub fn add_block(&mut self, kind: BlockType) -> BlockId {
        let id = (self.next_id_fn)();
        let block = template::instantiate(kind).into_block(id.clone());
        self.blocks.push(block);
        debug!(%id, %kind, size = self.blocks.len(), "Block added");
        id
    }

    /// Like [`add_block`](Self::add_block), but from a wire tag. Unknown tags add nothing.
    pub fn add_block_by_tag(&mut self, tag: &str) -> Option<BlockId> {
        match tag.parse::<BlockType>() {
            Ok(kind) => Some(self.add_block(kind)),
            Err(_) => {
                debug!(tag, "Unknown block type, nothing added");
                None
            }
        }
    }

    /// Removes a block; clears the selection if it pointed at it.
    pub fn delete_block(&mut self, id: &BlockId) {
        let Some(index) = self.position(id) else {
            debug!(%id, "Delete ignored, block not found");
            return;
        };
        self.blocks.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        debug!(%id, size = self.blocks.len(), "Block deleted");
    }

    /// Inserts a copy of a block right after it and returns the copy's id.
    ///
    /// The copy and all of its nested children get new ids.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Option<BlockId> {
        let Some(index) = self.position(id) else {
            debug!(%id, "Duplicate ignored, block not found");
            return None;
        };
        let mut copy = self.blocks[index].clone();
        self.reassign_ids(&mut copy);
        let new_id = copy.id.clone();
        self.blocks.insert(index + 1, copy);
        debug!(%id, %new_id, size = self.blocks.len(), "Block duplicated");
        Some(new_id)
    }

    fn reassign_ids(&mut self, block: &mut Block) {
        block.id = (self.next_id_fn)();
        if let Some(children) = block.children.as_mut() {
            for child in children {
                self.reassign_ids(child);
            }
        }
    }

    /// Merges `partial` into the selected block's props, field by field.
    pub fn update_block_props(&mut self, partial: Props) {
        let Some(id) = self.selected.clone() else {
            debug!("Props update ignored, nothing selected");
            return;
        };
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return;
        };
        let (finite, rejected): (Props, Props) =
            partial.into_iter().partition(|(_, value)| value.is_finite());
        if !rejected.is_empty() {
            debug!(%id, fields = ?rejected.keys().collect::<Vec<_>>(), "Non-finite numbers dropped");
        }
        let fields = finite.len();
        block.props.extend(finite);
        debug!(%id, fields, "Block props updated");
    }

    /// Replaces the ordering with a permutation of the current top-level ids.
    ///
    /// Anything that is not exactly a permutation is rejected and `false` returned.
    pub fn reorder(&mut self, order: &[BlockId]) -> bool {
        if order.len() != self.blocks.len() {
            debug!(expected = self.blocks.len(), got = order.len(), "Reorder rejected");
            return false;
        }
        let unique: HashSet<&BlockId> = order.iter().collect();
        if unique.len() != order.len() || order.iter().any(|id| self.position(id).is_none()) {
            debug!("Reorder rejected, not a permutation");
            return false;
        }

        let mut remaining = std::mem::take(&mut self.blocks);
        let mut reordered = Vec::with_capacity(remaining.len());
        for id in order {
            // Presence was checked above.
            if let Some(index) = remaining.iter().position(|b| &b.id == id) {
                reordered.push(remaining.swap_remove(index));
            }
        }
        self.blocks = reordered;
        debug!(size = self.blocks.len(), "Blocks reordered");
        true
    }

    /// Applies a drag gesture: `source` dropped onto `target`.
    pub fn move_block(&mut self, source: &BlockId, target: &BlockId) {
        if source == target || self.position(source).is_none() || self.position(target).is_none() {
            debug!(%source, %target, "Move ignored");
            return;
        }
        let blocks = std::mem::take(&mut self.blocks);
        self.blocks = reorder::move_block(blocks, source, target);
        debug!(%source, %target, "Block moved");
    }

    /// Selects a block. Selecting a missing block, or `None`, clears the selection.
    pub fn select_block(&mut self, id: Option<&BlockId>) {
        self.selected = id.filter(|id| self.position(id).is_some()).cloned();
        debug!(selected = ?self.selected, "Selection changed");
    }

    pub fn deselect_block(&mut self) {
        self.selected = None;
        debug!("Selection cleared");
    }
}
