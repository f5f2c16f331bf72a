//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// The single implicit role every registered user holds
pub const ROLE_USER: &str = "Role_USER";

// =============================================================================
// Validation
// =============================================================================

/// Username length bounds (inclusive, in characters)
pub const MIN_USERNAME_LENGTH: u64 = 4;
pub const MAX_USERNAME_LENGTH: u64 = 255;

/// Surname length bounds (inclusive, in characters)
pub const MIN_SURNAME_LENGTH: u64 = 4;
pub const MAX_SURNAME_LENGTH: u64 = 255;

/// Password length bounds, checked on the plaintext before hashing
pub const MIN_PASSWORD_LENGTH: u64 = 8;
pub const MAX_PASSWORD_LENGTH: u64 = 255;

/// Symbols accepted by the password complexity rule
pub const PASSWORD_SYMBOLS: &str = "@#$%^-&+=";

// =============================================================================
// Field Names
// =============================================================================

pub const FIELD_USERNAME: &str = "username";
pub const FIELD_SURNAME: &str = "surname";
pub const FIELD_PASSWORD: &str = "password";

// =============================================================================
// Messages
// =============================================================================

/// Reported when a required field is missing or null
pub const MSG_NOT_NULL: &str = "Cannot be null";

/// Reported when the password lacks one of the required character classes.
///
/// The symbol class is required too even though the text does not say so;
/// clients match on this exact wording.
pub const MSG_PASSWORD_PATTERN: &str =
    "Password must have at least one uppercase, one lowercase letter and one number";

/// Reported when the username is already registered
pub const MSG_DUPLICATE_USERNAME: &str = "This name is in use";

/// Length violation message for the given inclusive bounds
pub fn size_message(min: u64, max: u64) -> String {
    format!("It must have minimum {} and maximum {} characters", min, max)
}
