//! Drag-and-drop reordering as a pure function over the block sequence.
//!
//! A drop moves a single element: the source is removed from its position and
//! re-inserted at the target's position in the shortened sequence. Blocks in
//! between shift by one. Adjacent moves therefore look like a swap.

use crate::model::{Block, BlockId};

/// Moves the element at `old_index` to `new_index`.
///
/// Out-of-range indices leave the sequence untouched.
pub fn array_move<T>(mut items: Vec<T>, old_index: usize, new_index: usize) -> Vec<T> {
    if old_index == new_index || old_index >= items.len() || new_index >= items.len() {
        return items;
    }
    let item = items.remove(old_index);
    items.insert(new_index, item);
    items
}

/// Returns the sequence after dropping `source` onto `target`.
///
/// No-op when the ids are equal or either id is missing.
pub fn move_block(blocks: Vec<Block>, source: &BlockId, target: &BlockId) -> Vec<Block> {
    if source == target {
        return blocks;
    }
    let old_index = blocks.iter().position(|b| &b.id == source);
    let new_index = blocks.iter().position(|b| &b.id == target);
    match (old_index, new_index) {
        (Some(old_index), Some(new_index)) => array_move(blocks, old_index, new_index),
        _ => blocks,
    }
}
