//! Identifier-format predicates.
//!
//! Every entry point (status change, assignment, creation) calls these same
//! predicates; the patterns are defined nowhere else.

use once_cell::sync::Lazy;
use regex::Regex;

/// EMAID-shaped contract id: 2 letters, 3 alphanumerics, 9 alphanumerics.
static CONTRACT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9A-Z]{3}[0-9A-Z]{9}$").expect("valid pattern"));

/// Externally displayed card number: four dash-separated groups of four digits.
static VISIBLE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{4}$").expect("valid pattern"));

/// Syntactic e-mail check for request plumbing.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid pattern")
});

/// Returns true if `value` is a well-formed EMAID contract id.
#[must_use]
pub fn contract_id_valid(value: &str) -> bool {
    CONTRACT_ID.is_match(value)
}

/// Returns true if `value` is a well-formed visible card number.
#[must_use]
pub fn visible_number_valid(value: &str) -> bool {
    VISIBLE_NUMBER.is_match(value)
}

/// Returns true if `value` is a syntactically valid e-mail address.
#[must_use]
pub fn email_valid(value: &str) -> bool {
    EMAIL.is_match(value)
}
