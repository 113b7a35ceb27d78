//! # HTTP Surface
//!
//! The `/pages` API as axum routes, plus the [`Transport`] seam clients send through.
//!
//! | Route | Result |
//! |---|---|
//! | `GET /pages` | every page, ordered by id |
//! | `GET /pages/:key` | one page, `key` tried as slug first, then as id |
//! | `POST /pages` | created page (`201`) |
//! | `PUT /pages/:id` | updated page |
//! | `DELETE /pages/:id` | no content (`204`) |
//!
//! Every route requires `Authorization: Bearer <token>`.

pub mod router;
pub mod wire;

pub use router::*;
pub use wire::*;
