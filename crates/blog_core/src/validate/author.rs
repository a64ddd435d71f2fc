//! Author field rules.
//!
//! The name uniqueness rule reads from the record store through
//! [`AuthorLookup`], so the validator can run against SQLite or an in-memory
//! fake. The lookup is read-then-decide; `authors.name UNIQUE` in the schema
//! catches concurrent writers that both pass it.

use crate::model::author::{Author, AuthorField, AuthorPatch, NewAuthor};
use crate::model::validation::ValidationError;
use crate::repo::{RepoError, RepoResult};
use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone number regex"));

/// Name lookup the uniqueness rule depends on.
pub trait AuthorLookup {
    /// Returns the author whose name equals `name` exactly, if any.
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
}

/// Rejects empty and whitespace-only names.
pub fn check_name_present(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingAuthorName);
    }
    Ok(())
}

/// Accepts exactly ten ASCII digits. An empty string is rejected.
pub fn check_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if !PHONE_NUMBER_RE.is_match(phone_number) {
        return Err(ValidationError::InvalidPhoneNumber);
    }
    Ok(())
}

/// Author validator bound to a name lookup.
pub struct AuthorValidator<'l, L: AuthorLookup + ?Sized> {
    lookup: &'l L,
}

impl<'l, L: AuthorLookup + ?Sized> AuthorValidator<'l, L> {
    pub fn new(lookup: &'l L) -> Self {
        Self { lookup }
    }

    /// Checks one field and returns `value` unchanged when it passes.
    ///
    /// Rule failures come back as `RepoError::Validation`; lookup failures
    /// pass through as the store reported them.
    pub fn validate_field<'v>(&self, field: AuthorField, value: &'v str) -> RepoResult<&'v str> {
        match self.check_field(field, value)? {
            Some(violation) => Err(RepoError::Validation(violation)),
            None => Ok(value),
        }
    }

    /// Validates every supplied field of an insert payload.
    pub fn validate_new(&self, author: &NewAuthor) -> RepoResult<()> {
        self.validate_field(AuthorField::Name, &author.name)?;
        if let Some(phone_number) = author.phone_number.as_deref() {
            self.validate_field(AuthorField::PhoneNumber, phone_number)?;
        }
        Ok(())
    }

    /// Validates the fields a patch sets.
    ///
    /// Callers pass the output of [`AuthorPatch::changes_against`] so that
    /// unchanged fields are skipped. Clearing the phone number is not checked.
    pub fn validate_patch(&self, patch: &AuthorPatch) -> RepoResult<()> {
        if let Some(name) = patch.name.as_deref() {
            self.validate_field(AuthorField::Name, name)?;
        }
        if let Some(Some(phone_number)) = patch.phone_number.as_ref() {
            self.validate_field(AuthorField::PhoneNumber, phone_number)?;
        }
        Ok(())
    }

    /// Returns every rule an insert payload violates, in field order.
    pub fn collect_violations(&self, author: &NewAuthor) -> RepoResult<Vec<ValidationError>> {
        let mut violations = Vec::new();
        for field in AuthorField::ALL {
            let value = match field {
                AuthorField::Name => Some(author.name.as_str()),
                AuthorField::PhoneNumber => author.phone_number.as_deref(),
            };
            if let Some(value) = value {
                violations.extend(self.check_field(field, value)?);
            }
        }
        Ok(violations)
    }

    fn check_field(&self, field: AuthorField, value: &str) -> RepoResult<Option<ValidationError>> {
        let outcome = match field {
            AuthorField::Name => match check_name_present(value) {
                Ok(()) => self.check_name_unique(value)?,
                Err(violation) => Err(violation),
            },
            AuthorField::PhoneNumber => check_phone_number(value),
        };
        Ok(outcome.err())
    }

    fn check_name_unique(&self, name: &str) -> RepoResult<Result<(), ValidationError>> {
        if self.lookup.find_author_by_name(name)?.is_some() {
            return Ok(Err(ValidationError::DuplicateAuthorName));
        }
        Ok(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::{check_phone_number, AuthorLookup, AuthorValidator};
    use crate::model::author::{Author, AuthorField, AuthorPatch, NewAuthor};
    use crate::model::validation::ValidationError;
    use crate::repo::{RepoError, RepoResult};
    use std::collections::HashMap;

    #[derive(Default)]
    struct InMemoryAuthors {
        by_name: HashMap<String, Author>,
    }

    impl InMemoryAuthors {
        fn with(names: &[&str]) -> Self {
            let mut lookup = Self::default();
            for (index, name) in names.iter().enumerate() {
                lookup.by_name.insert(
                    (*name).to_string(),
                    Author {
                        id: i64::try_from(index).unwrap() + 1,
                        name: (*name).to_string(),
                        phone_number: None,
                        created_at: 0,
                        updated_at: None,
                    },
                );
            }
            lookup
        }
    }

    impl AuthorLookup for InMemoryAuthors {
        fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
            Ok(self.by_name.get(name).cloned())
        }
    }

    struct FailingLookup;

    impl AuthorLookup for FailingLookup {
        fn find_author_by_name(&self, _name: &str) -> RepoResult<Option<Author>> {
            Err(RepoError::InvalidData("lookup offline".to_string()))
        }
    }

    fn violation(result: RepoResult<&str>) -> ValidationError {
        match result {
            Err(RepoError::Validation(violation)) => violation,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn blank_names_are_rejected_before_lookup() {
        let validator = AuthorValidator::new(&FailingLookup);
        for name in ["", "   ", "\t\n"] {
            let err = violation(validator.validate_field(AuthorField::Name, name));
            assert_eq!(err, ValidationError::MissingAuthorName);
            assert_eq!(err.to_string(), "Author must have a name");
        }
    }

    #[test]
    fn taken_name_is_rejected_and_free_name_returned() {
        let lookup = InMemoryAuthors::with(&["Ada"]);
        let validator = AuthorValidator::new(&lookup);

        let err = violation(validator.validate_field(AuthorField::Name, "Ada"));
        assert_eq!(err.to_string(), "Author name must be unique");

        let accepted = validator.validate_field(AuthorField::Name, "Grace").unwrap();
        assert_eq!(accepted, "Grace");
    }

    #[test]
    fn name_match_is_exact() {
        let lookup = InMemoryAuthors::with(&["Ada"]);
        let validator = AuthorValidator::new(&lookup);
        assert!(validator.validate_field(AuthorField::Name, "ada").is_ok());
        assert!(validator.validate_field(AuthorField::Name, " Ada").is_ok());
    }

    #[test]
    fn phone_number_needs_exactly_ten_ascii_digits() {
        let rejected = [
            "",
            "123456789",
            "12345678901",
            "555-123-456",
            "55512345a7",
            "５５５１２３４５６７",
        ];
        for bad in rejected {
            assert_eq!(
                check_phone_number(bad),
                Err(ValidationError::InvalidPhoneNumber),
                "{bad:?} should be rejected"
            );
        }

        let validator = AuthorValidator::new(&FailingLookup);
        let accepted = validator
            .validate_field(AuthorField::PhoneNumber, "0123456789")
            .unwrap();
        assert_eq!(accepted, "0123456789");
    }

    #[test]
    fn lookup_failures_are_not_reported_as_violations() {
        let validator = AuthorValidator::new(&FailingLookup);
        let err = validator
            .validate_field(AuthorField::Name, "Ada")
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn validate_new_stops_at_first_failing_field() {
        let lookup = InMemoryAuthors::with(&["Ada"]);
        let validator = AuthorValidator::new(&lookup);
        let author = NewAuthor::new("Ada").with_phone_number("123");

        let err = validator.validate_new(&author).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::DuplicateAuthorName)
        ));
    }

    #[test]
    fn collect_violations_reports_every_field() {
        let lookup = InMemoryAuthors::with(&["Ada"]);
        let validator = AuthorValidator::new(&lookup);
        let author = NewAuthor::new("Ada").with_phone_number("123");

        let violations = validator.collect_violations(&author).unwrap();
        assert_eq!(
            violations,
            vec![
                ValidationError::DuplicateAuthorName,
                ValidationError::InvalidPhoneNumber
            ]
        );
    }

    #[test]
    fn clearing_phone_number_skips_the_rule() {
        let validator = AuthorValidator::new(&FailingLookup);
        validator
            .validate_patch(&AuthorPatch::phone_number(None))
            .unwrap();
    }
}
