//! Use-case services over the record store contracts.
//!
//! # Responsibility
//! - Offer author/post entry points that read like the blog's use-cases.
//! - Expose collect-all validation for callers that report every violation.
//!
//! # Invariants
//! - Services never bypass repository validation.

pub mod author_service;
pub mod post_service;
