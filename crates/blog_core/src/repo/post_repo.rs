//! Post repository contract and SQLite implementation.
//!
//! # Invariants
//! - Inserts validate every field; updates validate changed fields only.
//! - `category` is stored as its literal and decoded back into [`Category`].

use super::{ensure_connection_ready, pagination_sql, Entity, RepoError, RepoResult};
use crate::model::post::{Category, NewPost, Post, PostField, PostId, PostPatch};
use crate::validate::post::{PostRules, PostValidator};
use log::{info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    category,
    summary,
    created_at,
    updated_at
FROM posts";

/// Query options for listing posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListQuery {
    pub category: Option<Category>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for post CRUD.
pub trait PostRepository {
    /// Rules every write through this repository is checked against.
    fn validator(&self) -> &PostValidator;
    fn create_post(&self, post: &NewPost) -> RepoResult<Post>;
    fn update_post(&self, id: PostId, patch: &PostPatch) -> RepoResult<Post>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
    validator: PostValidator,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Wraps a migrated connection using the default post rules.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::with_rules(conn, PostRules::default())
    }

    pub fn with_rules(conn: &'conn Connection, rules: PostRules) -> RepoResult<Self> {
        ensure_connection_ready(conn, Entity::Post)?;
        Ok(Self {
            conn,
            validator: PostValidator::new(rules),
        })
    }

    fn read_back(&self, id: PostId) -> RepoResult<Post> {
        self.get_post(id)?.ok_or(RepoError::NotFound {
            entity: Entity::Post,
            id,
        })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn validator(&self) -> &PostValidator {
        &self.validator
    }

    fn create_post(&self, post: &NewPost) -> RepoResult<Post> {
        let category = match self.validator.validate_new(post) {
            Ok(category) => category,
            Err(violation) => {
                let err = RepoError::Validation(violation);
                log_write_failure("post_create", None, &err);
                return Err(err);
            }
        };

        let inserted = self.conn.execute(
            "INSERT INTO posts (title, content, category, summary)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                post.title.as_str(),
                post.content.as_str(),
                category.as_str(),
                post.summary.as_str(),
            ],
        );
        if let Err(err) = inserted {
            let err = RepoError::from(err);
            log_write_failure("post_create", None, &err);
            return Err(err);
        }

        let id = self.conn.last_insert_rowid();
        info!(
            "event=post_create module=repo status=ok post_id={id} category={}",
            category.as_str()
        );
        self.read_back(id)
    }

    fn update_post(&self, id: PostId, patch: &PostPatch) -> RepoResult<Post> {
        let current = self.read_back(id)?;
        let changes = patch.changes_against(&current);
        if changes.is_empty() {
            return Ok(current);
        }

        if let Err(violation) = self.validator.validate_patch(&changes) {
            let err = RepoError::Validation(violation);
            log_write_failure("post_update", Some(id), &err);
            return Err(err);
        }

        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();
        for field in PostField::ALL {
            if let Some(value) = changes.field(field) {
                assignments.push(format!("{} = ?", field.as_str()));
                bind_values.push(Value::Text(value.to_string()));
            }
        }
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(
            &format!(
                "UPDATE posts
                 SET {}, updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?;",
                assignments.join(", ")
            ),
            params_from_iter(bind_values),
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Post,
                id,
            });
        }

        info!("event=post_update module=repo status=ok post_id={id}");
        self.read_back(id)
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.conn
            .query_row(
                &format!("{POST_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| Ok(parse_post_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.as_str().to_string()));
        }

        sql.push_str(" ORDER BY id ASC");
        sql.push_str(&pagination_sql(query.limit, query.offset));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }
        Ok(posts)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM posts WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Post,
                id,
            });
        }

        info!("event=post_delete module=repo status=ok post_id={id}");
        Ok(())
    }
}

fn log_write_failure(event: &str, id: Option<PostId>, err: &RepoError) {
    let field = match err {
        RepoError::Validation(violation) => violation.field(),
        _ => "-",
    };
    warn!(
        "event={event} module=repo status=error post_id={} error_code={} field={field}",
        id.map_or_else(|| "-".to_string(), |id| id.to_string()),
        err.code()
    );
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;
    let category_text: String = row.get("category")?;
    let category = Category::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in posts row {id}"
        ))
    })?;

    Ok(Post {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        category,
        summary: row.get("summary")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
