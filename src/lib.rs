#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Page Editor
//!
//! > **The core of a block-based landing page editor.**
//!
//! A page is an ordered sequence of typed blocks (heading, text, hero, pricing,
//! ...). The editor core creates blocks from a fixed library of templates, lets
//! the user select, edit, duplicate, delete and drag them around, and saves the
//! whole page to a remote page store.
//!
//! ## 🏗️ Design Philosophy
//!
//! - **One writer**: every change to the block sequence goes through
//!   [`EditorController`](editor::EditorController). Operations on missing
//!   blocks are silent no-ops, because they come from stale UI events.
//! - **No optimistic writes**: saving is request/response. Local state only
//!   adopts the store's id and timestamps once the store has acknowledged.
//! - **Swappable persistence**: the editor depends on the
//!   [`PageStore`](clients::PageStore) trait, not on a transport.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Document ([`model`], [`template`])
//! - **Role**: Plain data. [`Block`](model::Block) and [`Page`](model::Page)
//!   serialize to the JSON the page store speaks.
//! - **Key items**: [`BlockType`](model::BlockType), [`instantiate`](template::instantiate).
//!
//! ### 2. The Editor ([`editor`])
//! - **Role**: Mutations, drag reorder, the Properties Panel and save gating.
//! - **Key items**: [`EditorController`](editor::EditorController),
//!   [`EditorSession`](editor::EditorSession), [`panel::edit`](editor::panel::edit).
//!
//! ### 3. The Store ([`framework`], [`page_actor`])
//! An in-process page store built on a generic actor: one Tokio task owns the
//! pages and handles requests one at a time, so no locks are needed.
//! - **Key items**: [`ResourceActor`](framework::ResourceActor),
//!   [`ActorEntity`](framework::ActorEntity), [`framework::mock`].
//!
//! ### 4. The Interface ([`clients`], [`api`])
//! - **Role**: [`PageClient`](clients::PageClient) talks to the store directly,
//!   [`HttpPageStore`](clients::HttpPageStore) speaks the `/pages` HTTP routes
//!   with a bearer token over any [`Transport`](api::Transport).
//!
//! ### 5. The Runtime ([`lifecycle`], [`config`])
//! - **Key items**: [`PageSystem`](lifecycle::PageSystem),
//!   [`setup_tracing`](lifecycle::setup_tracing), [`EditorConfig`](config::EditorConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! PAGE_EDITOR_TOKEN=dev-token RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod api;
pub mod clients;
pub mod config;
pub mod editor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod page_actor;
pub mod template;
