//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - Inserts validate every supplied field; updates validate changed fields.
//! - The name lookup used by the uniqueness rule reads the same connection
//!   the write goes to.
//! - Reads only decode rows. Field rules run on writes, so a row stored before
//!   a rule tightened can still be listed, matched by name and repaired.

use super::{
    ensure_connection_ready, is_unique_violation, pagination_sql, Entity, RepoError, RepoResult,
};
use crate::model::author::{Author, AuthorId, AuthorPatch, NewAuthor};
use crate::validate::author::{AuthorLookup, AuthorValidator};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

/// Query options for listing authors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for author CRUD.
pub trait AuthorRepository: AuthorLookup {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<Author>;
    fn update_author(&self, id: AuthorId, patch: &AuthorPatch) -> RepoResult<Author>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Wraps a connection that already has the blog schema applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, Entity::Author)?;
        Ok(Self { conn })
    }

    fn read_back(&self, id: AuthorId) -> RepoResult<Author> {
        self.get_author(id)?.ok_or(RepoError::NotFound {
            entity: Entity::Author,
            id,
        })
    }
}

impl AuthorLookup for SqliteAuthorRepository<'_> {
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE name = ?1;"),
                [name],
                parse_author_row,
            )
            .optional()
            .map_err(RepoError::from)
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<Author> {
        if let Err(err) = AuthorValidator::new(self).validate_new(author) {
            log_write_failure("author_create", None, &err);
            return Err(err);
        }

        let inserted = self.conn.execute(
            "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
            params![author.name.as_str(), author.phone_number.as_deref()],
        );
        if let Err(err) = inserted {
            let err = map_write_error(err, &author.name);
            log_write_failure("author_create", None, &err);
            return Err(err);
        }

        let id = self.conn.last_insert_rowid();
        info!("event=author_create module=repo status=ok author_id={id}");
        self.read_back(id)
    }

    fn update_author(&self, id: AuthorId, patch: &AuthorPatch) -> RepoResult<Author> {
        let current = self.read_back(id)?;
        let changes = patch.changes_against(&current);
        if changes.is_empty() {
            return Ok(current);
        }

        if let Err(err) = AuthorValidator::new(self).validate_patch(&changes) {
            log_write_failure("author_update", Some(id), &err);
            return Err(err);
        }

        let next = changes.apply_to(&current);
        let updated = self.conn.execute(
            "UPDATE authors
             SET
                name = ?1,
                phone_number = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![next.name.as_str(), next.phone_number.as_deref(), id],
        );
        match updated {
            Ok(0) => {
                return Err(RepoError::NotFound {
                    entity: Entity::Author,
                    id,
                })
            }
            Ok(_) => {}
            Err(err) => {
                let err = map_write_error(err, &next.name);
                log_write_failure("author_update", Some(id), &err);
                return Err(err);
            }
        }

        info!("event=author_update module=repo status=ok author_id={id}");
        self.read_back(id)
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_author_row,
            )
            .optional()
            .map_err(RepoError::from)
    }

    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let sql = format!(
            "{AUTHOR_SELECT_SQL} ORDER BY id ASC{};",
            pagination_sql(query.limit, query.offset)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }
        Ok(authors)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Author,
                id,
            });
        }

        info!("event=author_delete module=repo status=ok author_id={id}");
        Ok(())
    }
}

fn map_write_error(err: rusqlite::Error, name: &str) -> RepoError {
    if is_unique_violation(&err) {
        return RepoError::Conflict {
            entity: Entity::Author,
            field: "name",
            value: name.to_string(),
        };
    }
    err.into()
}

fn log_write_failure(event: &str, id: Option<AuthorId>, err: &RepoError) {
    let field = match err {
        RepoError::Validation(violation) => violation.field(),
        RepoError::Conflict { field, .. } => *field,
        _ => "-",
    };
    warn!(
        "event={event} module=repo status=error author_id={} error_code={} field={field}",
        id.map_or_else(|| "-".to_string(), |id| id.to_string()),
        err.code()
    );
}

fn parse_author_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get("id")?,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
