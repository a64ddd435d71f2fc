//! Author use-case service.

use crate::model::author::{Author, AuthorId, AuthorPatch, NewAuthor};
use crate::model::validation::ValidationError;
use crate::repo::author_repo::{AuthorListQuery, AuthorRepository};
use crate::repo::RepoResult;
use crate::validate::author::AuthorValidator;

/// Author service facade over a repository implementation.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new author, optionally with a phone number.
    pub fn register(
        &self,
        name: impl Into<String>,
        phone_number: Option<String>,
    ) -> RepoResult<Author> {
        self.repo.create_author(&NewAuthor {
            name: name.into(),
            phone_number,
        })
    }

    /// Renames an author; renaming to the current name is a no-op.
    pub fn rename(&self, id: AuthorId, name: impl Into<String>) -> RepoResult<Author> {
        self.repo.update_author(id, &AuthorPatch::name(name))
    }

    /// Sets or clears the phone number. Clearing is never validated.
    pub fn set_phone_number(
        &self,
        id: AuthorId,
        phone_number: Option<String>,
    ) -> RepoResult<Author> {
        self.repo
            .update_author(id, &AuthorPatch::phone_number(phone_number))
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(query)
    }

    pub fn remove_author(&self, id: AuthorId) -> RepoResult<()> {
        self.repo.delete_author(id)
    }

    /// Lists every rule `author` would violate, without writing anything.
    pub fn check_new_author(&self, author: &NewAuthor) -> RepoResult<Vec<ValidationError>> {
        AuthorValidator::new(&self.repo).collect_violations(author)
    }
}
