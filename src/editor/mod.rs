//! # Editor Core
//!
//! - [`controller`] - [`EditorController`], the only writer of the block sequence
//! - [`reorder`] - pure drag-and-drop reordering
//! - [`panel`] - Properties Panel binding for the selected block
//! - [`session`] - [`EditorSession`], page metadata and save gating

pub mod controller;
pub mod panel;
pub mod reorder;
pub mod session;

pub use controller::*;
pub use session::*;
