//! Field checks applied to registration input before the store is touched.
//!
//! Every rule runs; the caller gets all violations at once, in field order.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use utoipa::ToSchema;

pub const NAME_REQUIRED: &str = "O nome é obrigatório.";
pub const EMAIL_INVALID: &str = "O e-mail é inválido.";
pub const PASSWORD_TOO_SHORT: &str = "A senha deve ter no mínimo 6 caracteres.";

pub const PASSWORD_MIN_CHARS: usize = 6;
const EMAIL_MAX_CHARS: usize = 254;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").ok());

/// One failed rule, shaped like the violations the web client already parses.
#[derive(ToSchema, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    #[serde(rename = "type")]
    kind: String,
    /// Submitted value; never set for the password.
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    msg: String,
    path: String,
    location: String,
}

impl FieldViolation {
    fn body(path: &'static str, value: Option<&str>, msg: &'static str) -> Self {
        Self {
            kind: "field".to_string(),
            value: value.map(str::to_string),
            msg: msg.to_string(),
            path: path.to_string(),
            location: "body".to_string(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    email.chars().count() <= EMAIL_MAX_CHARS
        && EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Check a registration candidate. Empty result means it can be stored.
#[must_use]
pub fn validate(name: &str, email: &str, password: &str) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if name.is_empty() {
        violations.push(FieldViolation::body("nome", Some(name), NAME_REQUIRED));
    }

    if !valid_email(email) {
        violations.push(FieldViolation::body("email", Some(email), EMAIL_INVALID));
    }

    if password.chars().count() < PASSWORD_MIN_CHARS {
        violations.push(FieldViolation::body("senha", None, PASSWORD_TOO_SHORT));
    }

    violations
}
