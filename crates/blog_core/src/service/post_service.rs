//! Post use-case service.

use crate::model::post::{NewPost, Post, PostId, PostPatch};
use crate::model::validation::ValidationError;
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::RepoResult;

/// Post service facade over a repository implementation.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn publish(&self, post: &NewPost) -> RepoResult<Post> {
        self.repo.create_post(post)
    }

    /// Applies a partial update; only fields that differ are re-validated.
    pub fn revise(&self, id: PostId, patch: &PostPatch) -> RepoResult<Post> {
        self.repo.update_post(id, patch)
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn remove_post(&self, id: PostId) -> RepoResult<()> {
        self.repo.delete_post(id)
    }

    /// Lists every rule `post` would violate under the repository's rules.
    pub fn check_draft(&self, post: &NewPost) -> Vec<ValidationError> {
        self.repo.validator().collect_violations(post)
    }
}
