//! Mode dependent validation of the authentication form.
//!
//! Each mode owns a [`Schema`] described as plain data: the fields it
//! requires, the rules applied to each of them, and an optional matching rule
//! run after the per-field pass. [`validate`] is pure and keeps no state
//! between calls.

use std::collections::btree_map::{self, BTreeMap};
use derive_more::Display;
use validator::{validate_email, validate_length};
use crate::errors::FormError;
use crate::models::{Credentials, FormFields, Payload, RegistrationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Mode {
    #[serde(rename = "signin")]
    SignIn,
    #[serde(rename = "signup")]
    SignUp,
}

impl Mode {
    pub fn schema(self) -> &'static Schema {
        match self {
            Mode::SignIn => &SIGN_IN_SCHEMA,
            Mode::SignUp => &SIGN_UP_SCHEMA,
        }
    }

    pub fn toggled(self) -> Mode {
        match self {
            Mode::SignIn => Mode::SignUp,
            Mode::SignUp => Mode::SignIn,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    #[display(fmt = "fullName")]
    FullName,
    #[display(fmt = "email")]
    Email,
    #[display(fmt = "password")]
    Password,
    #[display(fmt = "confirmPassword")]
    ConfirmPassword,
    #[display(fmt = "profilePic")]
    ProfilePic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// `local@domain` where the domain is a dotted host name and the local
    /// part neither starts nor ends with a dot nor holds two in a row.
    Email,
    /// At least this many Unicode scalar values.
    MinLength(u64),
}

impl Check {
    pub fn passes(self, value: &str) -> bool {
        match self {
            Check::Email => is_email(value),
            Check::MinLength(min) => validate_length(value, Some(min), None, None),
        }
    }
}

fn is_email(value: &str) -> bool {
    let (local, domain) = match value.rsplit_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    // IP literals such as `[127.0.0.1]` are not accepted
    if domain.starts_with('[') {
        return false;
    }
    domain.contains('.') && validate_email(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub check: Check,
    pub message: &'static str,
}

/// Equality between two fields, reported on `field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matching {
    pub field: Field,
    pub other: Field,
    pub message: &'static str,
}

#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [(Field, &'static [Rule])],
    pub matching: Option<Matching>,
}

const EMAIL_RULES: &[Rule] = &[Rule {
    check: Check::Email,
    message: "Enter a valid Email address.",
}];

const PASSWORD_RULES: &[Rule] = &[Rule {
    check: Check::MinLength(8),
    message: "Password must be at least 8 characters.",
}];

const FULL_NAME_RULES: &[Rule] = &[Rule {
    check: Check::MinLength(2),
    message: "Username must be at least 2 characters.",
}];

pub static SIGN_IN_SCHEMA: Schema = Schema {
    fields: &[(Field::Email, EMAIL_RULES), (Field::Password, PASSWORD_RULES)],
    matching: None,
};

pub static SIGN_UP_SCHEMA: Schema = Schema {
    fields: &[
        (Field::FullName, FULL_NAME_RULES),
        (Field::Email, EMAIL_RULES),
        (Field::Password, PASSWORD_RULES),
        (Field::ConfirmPassword, PASSWORD_RULES),
    ],
    matching: Some(Matching {
        field: Field::ConfirmPassword,
        other: Field::Password,
        message: "Passwords do not match.",
    }),
};

/// Error messages grouped by field. Fields without errors are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: Field) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Field, Vec<String>> {
        self.0.iter()
    }

    /// All messages in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(Payload),
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }
}

fn require(fields: &FormFields, field: Field) -> Result<&str, FormError> {
    fields.get(field).ok_or(FormError::MissingField(field))
}

/// Applies the schema of `mode` to `fields`.
///
/// Every rule runs and every violation is collected. The matching rule only
/// runs once both of its fields passed their own rules. A required field that
/// is absent altogether is a [`FormError`], never a validation message.
pub fn validate(mode: Mode, fields: &FormFields) -> Result<ValidationResult, FormError> {
    let schema = mode.schema();
    let mut errors = FieldErrors::default();

    for (field, rules) in schema.fields {
        let value = require(fields, *field)?;
        for rule in rules.iter() {
            if !rule.check.passes(value) {
                errors.push(*field, rule.message);
            }
        }
    }

    if let Some(matching) = schema.matching {
        if !errors.contains(matching.field)
            && !errors.contains(matching.other)
            && require(fields, matching.field)? != require(fields, matching.other)?
        {
            errors.push(matching.field, matching.message);
        }
    }

    if !errors.is_empty() {
        return Ok(ValidationResult::Invalid(errors));
    }

    let payload = match mode {
        Mode::SignIn => Payload::SignIn(Credentials {
            email: require(fields, Field::Email)?.to_owned(),
            password: require(fields, Field::Password)?.to_owned(),
        }),
        Mode::SignUp => Payload::SignUp(RegistrationRequest {
            email: require(fields, Field::Email)?.to_owned(),
            password: require(fields, Field::Password)?.to_owned(),
            full_name: require(fields, Field::FullName)?.to_owned(),
            profile_pic: fields.profile_pic.clone(),
        }),
    };
    Ok(ValidationResult::Valid(payload))
}
