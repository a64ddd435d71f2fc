//! Persisted blog entities and the write payloads that create or patch them.
//!
//! # Invariants
//! - `id`, `created_at` and `updated_at` are assigned by the record store only.
//! - Authors and posts are independent entity sets; no foreign key links them.

pub mod author;
pub mod post;
pub mod validation;
