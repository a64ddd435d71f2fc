//! Field-level validation failures shared by author and post rules.

use crate::model::author::AuthorField;
use crate::model::post::PostField;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A single violated field rule.
///
/// `Display` renders the exact user-facing message for the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Author name is empty or whitespace only.
    MissingAuthorName,
    /// Another author already uses this name.
    DuplicateAuthorName,
    /// Phone number is not exactly ten ASCII digits.
    InvalidPhoneNumber,
    /// Post content is empty or shorter than `min_chars`.
    ContentTooShort { min_chars: usize },
    /// Post summary is longer than `max_chars`.
    SummaryTooLong { max_chars: usize },
    /// Category is not one of the accepted literals.
    InvalidCategory,
    /// Title contains none of the configured markers.
    TitleNotClickbait,
}

impl ValidationError {
    /// Returns the storage column the rule guards.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingAuthorName | Self::DuplicateAuthorName => AuthorField::Name.as_str(),
            Self::InvalidPhoneNumber => AuthorField::PhoneNumber.as_str(),
            Self::ContentTooShort { .. } => PostField::Content.as_str(),
            Self::SummaryTooLong { .. } => PostField::Summary.as_str(),
            Self::InvalidCategory => PostField::Category.as_str(),
            Self::TitleNotClickbait => PostField::Title.as_str(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAuthorName => write!(f, "Author must have a name"),
            Self::DuplicateAuthorName => write!(f, "Author name must be unique"),
            Self::InvalidPhoneNumber => write!(f, "Phone number must be exactly 10 digits"),
            Self::ContentTooShort { min_chars } => {
                write!(f, "Post content must be at least {min_chars} characters long")
            }
            Self::SummaryTooLong { max_chars } => {
                write!(f, "Summary must be at most {max_chars} characters")
            }
            Self::InvalidCategory => write!(f, "Category must be either Fiction or Non-Fiction"),
            Self::TitleNotClickbait => write!(f, "Title must be clickbait-y"),
        }
    }
}

impl Error for ValidationError {}
