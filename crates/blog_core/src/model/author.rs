//! Author entity.
//!
//! # Invariants
//! - `name` is unique across all authors and never blank.
//! - `phone_number`, when set, is exactly ten ASCII digits.
//! - `updated_at` stays `None` until the first successful mutation.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned author identifier.
pub type AuthorId = i64;

/// Persisted author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub phone_number: Option<String>,
    /// Unix epoch milliseconds, set once on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds of the latest mutation.
    pub updated_at: Option<i64>,
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Author(id={}, name={})", self.id, self.name)
    }
}

/// Validated fields of an author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorField {
    Name,
    PhoneNumber,
}

impl AuthorField {
    /// Fields in declaration order.
    pub const ALL: [AuthorField; 2] = [AuthorField::Name, AuthorField::PhoneNumber];

    /// Column name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PhoneNumber => "phone_number",
        }
    }
}

/// Insert payload for a new author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub phone_number: Option<String>,
}

impl NewAuthor {
    /// Creates a payload without a phone number.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: None,
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

/// Partial update for an existing author.
///
/// `None` leaves a field untouched. For `phone_number`, `Some(None)` clears
/// the stored number and is not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub phone_number: Option<Option<String>>,
}

impl AuthorPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn phone_number(phone_number: Option<String>) -> Self {
        Self {
            phone_number: Some(phone_number),
            ..Self::default()
        }
    }

    /// Returns whether the patch touches no field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none()
    }

    /// Drops fields whose new value equals the stored one.
    ///
    /// Only the remaining fields count as changed and get re-validated.
    pub fn changes_against(&self, current: &Author) -> Self {
        Self {
            name: self
                .name
                .clone()
                .filter(|name| *name != current.name),
            phone_number: self
                .phone_number
                .clone()
                .filter(|phone_number| *phone_number != current.phone_number),
        }
    }

    /// Produces the record as it would look once the patch is committed.
    ///
    /// Store-managed fields (`id`, timestamps) are copied unchanged.
    pub fn apply_to(&self, current: &Author) -> Author {
        Author {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            phone_number: self
                .phone_number
                .clone()
                .unwrap_or_else(|| current.phone_number.clone()),
            ..current.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Author, AuthorField, AuthorPatch};

    fn stored() -> Author {
        Author {
            id: 7,
            name: "Ada".to_string(),
            phone_number: Some("5551234567".to_string()),
            created_at: 1_700_000_000_000,
            updated_at: None,
        }
    }

    #[test]
    fn display_shows_id_and_name() {
        assert_eq!(stored().to_string(), "Author(id=7, name=Ada)");
    }

    #[test]
    fn changes_against_drops_unchanged_fields() {
        let patch = AuthorPatch {
            name: Some("Ada".to_string()),
            phone_number: Some(None),
        };

        let changes = patch.changes_against(&stored());
        assert_eq!(changes.name, None);
        assert_eq!(changes.phone_number, Some(None));
        assert!(!changes.is_empty());
    }

    #[test]
    fn apply_to_keeps_untouched_fields() {
        let merged = AuthorPatch::name("Grace").apply_to(&stored());
        assert_eq!(merged.name, "Grace");
        assert_eq!(merged.phone_number.as_deref(), Some("5551234567"));
        assert_eq!(merged.id, 7);
    }

    #[test]
    fn fields_name_their_columns_in_declaration_order() {
        let columns: Vec<_> = AuthorField::ALL.into_iter().map(AuthorField::as_str).collect();
        assert_eq!(columns, vec!["name", "phone_number"]);
    }
}
