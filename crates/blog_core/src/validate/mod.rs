//! Field validators gating every author and post write.
//!
//! # Responsibility
//! - Check one field value against its rule and hand the value back unchanged.
//! - Run the rules for insert payloads and patches (changed fields only).
//! - Collect every violation of a payload for callers that report them all.
//!
//! # Invariants
//! - Validators never mutate the record store.
//! - Write paths stop at the first failing field, in declaration order.

pub mod author;
pub mod post;
