//! Post field rules.
//!
//! All post rules are pure; the bounds and the clickbait marker list come
//! from [`PostRules`] so deployments can tune them through config.

use crate::model::post::{Category, NewPost, PostField, PostPatch};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_CLICKBAIT_MARKERS: &[&str] = &["Won't Believe", "Secret", "Top", "Guess"];
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 250;
pub const DEFAULT_MAX_SUMMARY_CHARS: usize = 250;

/// Tunable bounds for post validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostRules {
    /// Case-sensitive substrings; a title must contain at least one.
    pub clickbait_markers: Vec<String>,
    pub min_content_chars: usize,
    pub max_summary_chars: usize,
}

impl Default for PostRules {
    fn default() -> Self {
        Self {
            clickbait_markers: DEFAULT_CLICKBAIT_MARKERS
                .iter()
                .map(|marker| (*marker).to_string())
                .collect(),
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
            max_summary_chars: DEFAULT_MAX_SUMMARY_CHARS,
        }
    }
}

/// Rule set that cannot be used to validate posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostRulesError {
    /// No title could ever pass.
    NoClickbaitMarkers,
    /// Every title would pass.
    EmptyClickbaitMarker,
}

impl Display for PostRulesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoClickbaitMarkers => {
                write!(f, "clickbait_markers must list at least one marker")
            }
            Self::EmptyClickbaitMarker => {
                write!(f, "clickbait_markers cannot contain an empty marker")
            }
        }
    }
}

impl Error for PostRulesError {}

impl PostRules {
    /// Rejects rule sets that would accept every title or none.
    pub fn check(&self) -> Result<(), PostRulesError> {
        if self.clickbait_markers.is_empty() {
            return Err(PostRulesError::NoClickbaitMarkers);
        }
        if self.clickbait_markers.iter().any(|marker| marker.is_empty()) {
            return Err(PostRulesError::EmptyClickbaitMarker);
        }
        Ok(())
    }
}

/// Post validator over a fixed rule set.
#[derive(Debug, Clone, Default)]
pub struct PostValidator {
    rules: PostRules,
}

impl PostValidator {
    pub fn new(rules: PostRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PostRules {
        &self.rules
    }

    /// Checks one field and returns `value` unchanged when it passes.
    pub fn validate_field<'v>(
        &self,
        field: PostField,
        value: &'v str,
    ) -> Result<&'v str, ValidationError> {
        match field {
            PostField::Content => {
                // An empty summary passes below; empty content never does.
                if value.chars().count() < self.rules.min_content_chars || value.is_empty() {
                    return Err(ValidationError::ContentTooShort {
                        min_chars: self.rules.min_content_chars,
                    });
                }
            }
            PostField::Summary => {
                if value.chars().count() > self.rules.max_summary_chars {
                    return Err(ValidationError::SummaryTooLong {
                        max_chars: self.rules.max_summary_chars,
                    });
                }
            }
            PostField::Category => {
                if Category::parse(value).is_none() {
                    return Err(ValidationError::InvalidCategory);
                }
            }
            PostField::Title => {
                let is_clickbait = self
                    .rules
                    .clickbait_markers
                    .iter()
                    .any(|marker| value.contains(marker.as_str()));
                if !is_clickbait {
                    return Err(ValidationError::TitleNotClickbait);
                }
            }
        }
        Ok(value)
    }

    /// Validates an insert payload and returns its parsed category.
    pub fn validate_new(&self, post: &NewPost) -> Result<Category, ValidationError> {
        for field in PostField::ALL {
            self.validate_field(field, post.field(field))?;
        }
        Category::parse(&post.category).ok_or(ValidationError::InvalidCategory)
    }

    /// Validates the fields a patch sets.
    ///
    /// Callers pass the output of [`PostPatch::changes_against`] so that
    /// unchanged fields are skipped.
    pub fn validate_patch(&self, patch: &PostPatch) -> Result<(), ValidationError> {
        for field in PostField::ALL {
            if let Some(value) = patch.field(field) {
                self.validate_field(field, value)?;
            }
        }
        Ok(())
    }

    /// Returns every rule an insert payload violates, in field order.
    pub fn collect_violations(&self, post: &NewPost) -> Vec<ValidationError> {
        PostField::ALL
            .into_iter()
            .filter_map(|field| self.validate_field(field, post.field(field)).err())
            .collect()
    }
}
