//! User domain entity and its projections.
//!
//! `User` is the persistence projection and deliberately has no `Serialize`
//! impl. Anything returned to a client goes through `UserProfile`.

use chrono::{DateTime, Utc};
use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

use crate::constants::ROLE_USER;
use crate::password::Password;
use crate::validation::{validate_registration, FieldErrors};

/// User domain entity as persisted
#[derive(Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub surname: String,
    pub password_hash: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("surname", &self.surname)
            .field("password_hash", &"[REDACTED]")
            .field("image", &self.image)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl User {
    /// Stored password hash
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.as_str())
    }

    /// Role granted to every user
    pub fn role(&self) -> &'static str {
        ROLE_USER
    }
}

/// Public view of a user (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProfile {
    /// Store-assigned identifier
    pub id: i32,
    pub username: String,
    pub surname: String,
    /// Avatar reference, if any
    pub image: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            surname: user.surname,
            image: user.image,
        }
    }
}

/// Registration payload as received from an untrusted client.
///
/// Every field is optional so that a missing key and an explicit `null`
/// both surface as a validation message instead of a parse failure.
/// Only a JSON object is accepted; unknown keys are ignored.
#[derive(Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterUser {
    /// 4 to 255 characters, unique
    #[cfg_attr(feature = "openapi", schema(example = "test-user"))]
    pub username: Option<String>,
    /// 4 to 255 characters
    #[cfg_attr(feature = "openapi", schema(example = "test-surname"))]
    pub surname: Option<String>,
    /// 8 to 255 characters with upper, lower, digit and one of @#$%^-&+=
    #[cfg_attr(feature = "openapi", schema(example = "P4ssword@"))]
    pub password: Option<String>,
    pub image: Option<String>,
}

impl std::fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUser")
            .field("username", &self.username)
            .field("surname", &self.surname)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("image", &self.image)
            .finish()
    }
}

impl<'de> Deserialize<'de> for RegisterUser {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RegisterUserVisitor)
    }
}

struct RegisterUserVisitor;

impl<'de> Visitor<'de> for RegisterUserVisitor {
    type Value = RegisterUser;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a registration object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut candidate = RegisterUser::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "username" => candidate.username = map.next_value()?,
                "surname" => candidate.surname = map.next_value()?,
                "password" => candidate.password = map.next_value()?,
                "image" => candidate.image = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(candidate)
    }
}

impl RegisterUser {
    /// Run the field-level rules, one message per failing field.
    pub fn validate(&self) -> FieldErrors {
        validate_registration(self)
    }

    /// Consume the payload given the violations already collected for it.
    ///
    /// `errors` must come from [`RegisterUser::validate`], optionally
    /// extended with checks that need persisted state.
    pub fn into_valid(self, errors: FieldErrors) -> Result<ValidRegistration, FieldErrors> {
        match (self.username, self.surname, self.password) {
            (Some(username), Some(surname), Some(password)) if errors.is_empty() => {
                Ok(ValidRegistration {
                    username,
                    surname,
                    password,
                    image: self.image,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Registration that passed every field rule; the password is still plaintext.
pub struct ValidRegistration {
    pub username: String,
    pub surname: String,
    pub password: String,
    pub image: Option<String>,
}

impl std::fmt::Debug for ValidRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidRegistration")
            .field("username", &self.username)
            .field("surname", &self.surname)
            .field("password", &"[REDACTED]")
            .field("image", &self.image)
            .finish()
    }
}

impl ValidRegistration {
    /// Replace the plaintext with its hash, dropping the plaintext.
    pub fn into_new_user(self, password: Password) -> NewUser {
        NewUser {
            username: self.username,
            surname: self.surname,
            password_hash: password.into_string(),
            image: self.image,
        }
    }
}

/// Record ready for insertion; only ever carries a hashed password.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub surname: String,
    pub password_hash: String,
    pub image: Option<String>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("surname", &self.surname)
            .field("password_hash", &"[REDACTED]")
            .field("image", &self.image)
            .finish()
    }
}
