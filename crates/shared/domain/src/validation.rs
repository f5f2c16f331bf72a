//! Field-level registration rules.
//!
//! Each field has an ordered rule list; the first rule that fails is the one
//! reported for that field. Uniqueness needs the user store and is layered
//! on top of these by the registration service.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use validator::ValidateLength;

use crate::constants::{
    size_message, FIELD_PASSWORD, FIELD_SURNAME, FIELD_USERNAME, MAX_PASSWORD_LENGTH,
    MAX_SURNAME_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_SURNAME_LENGTH,
    MIN_USERNAME_LENGTH, MSG_NOT_NULL, MSG_PASSWORD_PATTERN,
};
use crate::user::RegisterUser;

/// Field name to violation message, at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping with a single violation
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record a violation unless the field already has one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// A single field constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    NotNull,
    /// Inclusive character-count bounds
    Length { min: u64, max: u64 },
    /// Upper, lower, digit and symbol classes all present
    PasswordPattern,
}

impl Rule {
    /// Message for this rule if `value` violates it.
    ///
    /// Only `NotNull` applies to an absent value.
    pub fn violation(&self, value: Option<&String>) -> Option<String> {
        match (self, value) {
            (Rule::NotNull, None) => Some(MSG_NOT_NULL.to_string()),
            (Rule::Length { min, max }, Some(v))
                if !v.validate_length(Some(*min), Some(*max), None) =>
            {
                Some(size_message(*min, *max))
            }
            (Rule::PasswordPattern, Some(v)) if !meets_password_pattern(v) => {
                Some(MSG_PASSWORD_PATTERN.to_string())
            }
            _ => None,
        }
    }
}

pub const USERNAME_RULES: &[Rule] = &[
    Rule::NotNull,
    Rule::Length {
        min: MIN_USERNAME_LENGTH,
        max: MAX_USERNAME_LENGTH,
    },
];

pub const SURNAME_RULES: &[Rule] = &[
    Rule::NotNull,
    Rule::Length {
        min: MIN_SURNAME_LENGTH,
        max: MAX_SURNAME_LENGTH,
    },
];

pub const PASSWORD_RULES: &[Rule] = &[
    Rule::NotNull,
    Rule::Length {
        min: MIN_PASSWORD_LENGTH,
        max: MAX_PASSWORD_LENGTH,
    },
    Rule::PasswordPattern,
];

/// First violated rule, in list order.
pub fn first_violation(value: Option<&String>, rules: &[Rule]) -> Option<String> {
    rules.iter().find_map(|rule| rule.violation(value))
}

static PASSWORD_CLASSES: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([r"[A-Z]", r"[a-z]", r"[0-9]", r"[@#$%^&+=\-]"])
        .expect("password class patterns are valid")
});

/// True when every required character class occurs at least once.
pub fn meets_password_pattern(password: &str) -> bool {
    PASSWORD_CLASSES.matches(password).matched_all()
}

/// Apply the field rules of a registration payload.
pub fn validate_registration(candidate: &RegisterUser) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let fields = [
        (FIELD_USERNAME, candidate.username.as_ref(), USERNAME_RULES),
        (FIELD_SURNAME, candidate.surname.as_ref(), SURNAME_RULES),
        (FIELD_PASSWORD, candidate.password.as_ref(), PASSWORD_RULES),
    ];

    for (field, value, rules) in fields {
        if let Some(message) = first_violation(value, rules) {
            errors.insert(field, message);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_candidate() -> RegisterUser {
        RegisterUser {
            username: Some("test-user".to_string()),
            surname: Some("test-surname".to_string()),
            password: Some("P4ssword@".to_string()),
            image: None,
        }
    }

    fn chars(n: usize) -> String {
        "s".repeat(n)
    }

    #[test]
    fn test_valid_candidate_has_no_errors() {
        assert!(validate_registration(&valid_candidate()).is_empty());
    }

    #[test]
    fn test_empty_candidate_reports_three_null_errors() {
        let errors = validate_registration(&RegisterUser::default());

        assert_eq!(errors.len(), 3);
        for field in [FIELD_USERNAME, FIELD_SURNAME, FIELD_PASSWORD] {
            assert_eq!(errors.get(field), Some(MSG_NOT_NULL));
        }
    }

    #[test]
    fn test_null_username_only_reports_username() {
        let candidate = RegisterUser {
            username: None,
            ..valid_candidate()
        };
        let errors = validate_registration(&candidate);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FIELD_USERNAME), Some("Cannot be null"));
    }

    #[test]
    fn test_username_length_bounds() {
        for (len, ok) in [(3, false), (4, true), (255, true), (256, false), (270, false)] {
            let candidate = RegisterUser {
                username: Some(chars(len)),
                ..valid_candidate()
            };
            let errors = validate_registration(&candidate);
            assert_eq!(errors.is_empty(), ok, "username length {}", len);
            if !ok {
                assert_eq!(
                    errors.get(FIELD_USERNAME),
                    Some("It must have minimum 4 and maximum 255 characters")
                );
            }
        }
    }

    #[test]
    fn test_surname_length_bounds() {
        for (len, ok) in [(3, false), (4, true), (255, true), (256, false)] {
            let candidate = RegisterUser {
                surname: Some(chars(len)),
                ..valid_candidate()
            };
            assert_eq!(
                validate_registration(&candidate).contains(FIELD_SURNAME),
                !ok,
                "surname length {}",
                len
            );
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let candidate = RegisterUser {
            username: Some("ééé".to_string()),
            ..valid_candidate()
        };
        assert!(validate_registration(&candidate).contains(FIELD_USERNAME));

        let candidate = RegisterUser {
            username: Some("éééé".to_string()),
            ..valid_candidate()
        };
        assert!(validate_registration(&candidate).is_empty());
    }

    #[test]
    fn test_password_length_bounds() {
        for (len, ok) in [(7, false), (8, true), (255, true), (256, false)] {
            let password = format!("P4s@{}", "a".repeat(len - 4));
            let candidate = RegisterUser {
                password: Some(password),
                ..valid_candidate()
            };
            let errors = validate_registration(&candidate);
            assert_eq!(errors.is_empty(), ok, "password length {}", len);
            if !ok {
                assert_eq!(
                    errors.get(FIELD_PASSWORD),
                    Some("It must have minimum 8 and maximum 255 characters")
                );
            }
        }
    }

    #[test]
    fn test_password_missing_a_class_fails_pattern() {
        for password in [
            "asssssssssssfff",
            "AAAAAAAAAAAAAAAAAAA",
            "12233333332",
            "nullnull",
            "P4ssword",
            "p4ssword@",
            "Password@",
        ] {
            let candidate = RegisterUser {
                password: Some(password.to_string()),
                ..valid_candidate()
            };
            assert_eq!(
                validate_registration(&candidate).get(FIELD_PASSWORD),
                Some(MSG_PASSWORD_PATTERN),
                "password {:?}",
                password
            );
        }
    }

    #[test]
    fn test_every_symbol_is_accepted() {
        for symbol in crate::constants::PASSWORD_SYMBOLS.chars() {
            assert!(meets_password_pattern(&format!("Passw0rd{}", symbol)));
        }
    }

    #[test]
    fn test_password_length_takes_precedence_over_pattern() {
        let candidate = RegisterUser {
            password: Some("abc".to_string()),
            ..valid_candidate()
        };
        assert_eq!(
            validate_registration(&candidate).get(FIELD_PASSWORD),
            Some("It must have minimum 8 and maximum 255 characters")
        );

        let candidate = RegisterUser {
            password: Some(format!("{}-^A1", chars(270))),
            ..valid_candidate()
        };
        assert_eq!(
            validate_registration(&candidate).get(FIELD_PASSWORD),
            Some("It must have minimum 8 and maximum 255 characters")
        );
    }

    #[test]
    fn test_insert_keeps_first_message() {
        let mut errors = FieldErrors::single("username", "first");
        errors.insert("username", "second");

        assert_eq!(errors.get("username"), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_field_errors_serialize_as_flat_object() {
        let errors = FieldErrors::single("username", "This name is in use");
        let json = serde_json::to_string(&errors).unwrap();

        assert_eq!(json, r#"{"username":"This name is in use"}"#);
    }
}
