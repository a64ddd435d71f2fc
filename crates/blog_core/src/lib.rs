//! Core domain logic for the blog: authors, posts and the rules that gate
//! every write to them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::author::{Author, AuthorField, AuthorId, AuthorPatch, NewAuthor};
pub use model::post::{Category, NewPost, Post, PostField, PostId, PostPatch};
pub use model::validation::ValidationError;
pub use repo::author_repo::{AuthorListQuery, AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use repo::{Entity, RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::post_service::PostService;
pub use validate::author::{AuthorLookup, AuthorValidator};
pub use validate::post::{PostRules, PostRulesError, PostValidator};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
