//! Post entity.
//!
//! # Invariants
//! - `category` is always one of [`Category`]'s variants once persisted.
//! - Length rules are measured in characters, not bytes.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned post identifier.
pub type PostId = i64;

/// Accepted post categories.
///
/// Wire and storage form are the exact literals `Fiction` and `Non-Fiction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fiction")]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }

    /// Exact, case-sensitive match without trimming.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Fiction" => Some(Self::Fiction),
            "Non-Fiction" => Some(Self::NonFiction),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub summary: String,
    /// Unix epoch milliseconds, set once on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds of the latest mutation.
    pub updated_at: Option<i64>,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post(id={}, title={}, content={}, summary={})",
            self.id, self.title, self.content, self.summary
        )
    }
}

/// Validated fields of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    Title,
    Content,
    Category,
    Summary,
}

impl PostField {
    /// Fields in declaration order.
    pub const ALL: [PostField; 4] = [
        PostField::Title,
        PostField::Content,
        PostField::Category,
        PostField::Summary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Category => "category",
            Self::Summary => "summary",
        }
    }
}

/// Insert payload for a new post.
///
/// `category` stays a raw string here; it is parsed into [`Category`] only
/// after validation accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub summary: String,
}

impl NewPost {
    /// Returns the raw value supplied for `field`.
    pub fn field(&self, field: PostField) -> &str {
        match field {
            PostField::Title => &self.title,
            PostField::Content => &self.content,
            PostField::Category => &self.category,
            PostField::Summary => &self.summary,
        }
    }
}

/// Partial update for an existing post. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.summary.is_none()
    }

    /// Returns the new value for `field`, if the patch sets it.
    pub fn field(&self, field: PostField) -> Option<&str> {
        match field {
            PostField::Title => self.title.as_deref(),
            PostField::Content => self.content.as_deref(),
            PostField::Category => self.category.as_deref(),
            PostField::Summary => self.summary.as_deref(),
        }
    }

    /// Drops fields whose new value equals the stored one.
    pub fn changes_against(&self, current: &Post) -> Self {
        let keep = |value: &Option<String>, stored: &str| {
            value.clone().filter(|value| value != stored)
        };
        Self {
            title: keep(&self.title, &current.title),
            content: keep(&self.content, &current.content),
            category: keep(&self.category, current.category.as_str()),
            summary: keep(&self.summary, &current.summary),
        }
    }
}
