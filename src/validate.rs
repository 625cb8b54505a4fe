//! Field rules for a registration attempt.
//!
//! Every field is checked independently and all failures are reported at
//! once. Nothing here touches the network or any state.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Field, RegistrationInput, ValidationErrors};

/// Minimum password length, in UTF-16 code units.
pub const PASSWORD_MIN_LEN: usize = 6;

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Invalid phone number format";

// Browser whitespace: differs from Unicode White_Space by adding U+FEFF and
// dropping U+0085, so `\s` is spelled out.
const JS_SPACE: &str =
    r"\t\n\v\f\r \x{a0}\x{1680}\x{2000}-\x{200a}\x{2028}\x{2029}\x{202f}\x{205f}\x{3000}\x{feff}";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    let part = format!("[^{JS_SPACE}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("valid regex")
});

// Digits are ASCII only; `\d` in the regex crate would also admit other scripts.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?([0-9]{1,3})?[-.●]?\(?[0-9]{3}\)?[-.●]?[0-9]{3}[-.●]?[0-9]{4}$")
        .expect("valid regex")
});

/// Check every field of `input` and collect the messages.
///
/// ```
/// use signup_form::types::{Field, RegistrationInput};
/// use signup_form::validate::validate;
///
/// let input = RegistrationInput {
///     username: "bob".into(),
///     email: "bob@x.com".into(),
///     password: "ab".into(),
///     phone: "+1-555-123-4567".into(),
///     file: None,
/// };
/// let errors = validate(&input);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.get(Field::Password), Some("Password must be at least 6 characters"));
/// ```
pub fn validate(input: &RegistrationInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if is_blank(&input.username) {
        errors.insert(Field::Username, USERNAME_REQUIRED);
    }

    if input.email.is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&input.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if input.password.is_empty() {
        errors.insert(Field::Password, PASSWORD_REQUIRED);
    } else if utf16_len(&input.password) < PASSWORD_MIN_LEN {
        errors.insert(Field::Password, PASSWORD_TOO_SHORT);
    }

    if input.phone.is_empty() {
        errors.insert(Field::Phone, PHONE_REQUIRED);
    } else if !is_valid_phone(&input.phone) {
        errors.insert(Field::Phone, PHONE_INVALID);
    }

    errors
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Loose match for US-style numbers with an optional country code.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

fn is_blank(s: &str) -> bool {
    s.trim_matches(is_js_space).is_empty()
}

fn is_js_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
