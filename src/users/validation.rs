//! Declared field rules for user creation.
//!
//! Each field carries an ordered list of rules. The first rule a field
//! fails is reported for that field; fields are checked in declaration
//! order (name, email, age), so the aggregate message is deterministic.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::users::types::{CreateUserRequest, NewUser};

/// Lowest accepted age.
pub const AGE_MIN: i64 = 0;
/// Highest accepted age.
pub const AGE_MAX: i64 = 150;

/// A single constraint attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Field must be present and, for text, not blank.
    Required,
    /// Text must look like an email address.
    Email,
    /// Integer must be >= the bound.
    Min(i64),
    /// Integer must be <= the bound.
    Max(i64),
}

const NAME_RULES: &[Rule] = &[Rule::Required];
const EMAIL_RULES: &[Rule] = &[Rule::Required, Rule::Email];
const AGE_RULES: &[Rule] = &[Rule::Required, Rule::Min(AGE_MIN), Rule::Max(AGE_MAX)];

/// One field that failed one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: Rule,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Rule::Required => write!(f, "field {} is required field", self.field),
            Rule::Email | Rule::Min(_) | Rule::Max(_) => {
                write!(f, "field {} is invalid", self.field)
            }
        }
    }
}

/// Every violation found in a request, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join(.0))]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }
}

fn join(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

enum Value<'a> {
    Text(&'a str),
    Int(Option<i64>),
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn passes(rule: Rule, value: &Value<'_>) -> bool {
    match (rule, value) {
        (Rule::Required, Value::Text(text)) => !text.trim().is_empty(),
        (Rule::Required, Value::Int(number)) => number.is_some(),
        (Rule::Email, Value::Text(text)) => email_regex().is_match(text),
        (Rule::Min(bound), Value::Int(Some(number))) => *number >= bound,
        (Rule::Max(bound), Value::Int(Some(number))) => *number <= bound,
        // A rule that does not apply to the value's kind never fails.
        _ => true,
    }
}

fn check(field: &'static str, value: Value<'_>, rules: &[Rule]) -> Option<FieldViolation> {
    rules
        .iter()
        .find(|rule| !passes(**rule, &value))
        .map(|rule| FieldViolation { field, rule: *rule })
}

/// Apply the declared rules to a decoded create request.
pub fn validate(request: &CreateUserRequest) -> Result<NewUser, ValidationErrors> {
    let violations: Vec<FieldViolation> = [
        check("name", Value::Text(&request.name), NAME_RULES),
        check("email", Value::Text(&request.email), EMAIL_RULES),
        check("age", Value::Int(request.age), AGE_RULES),
    ]
    .into_iter()
    .flatten()
    .collect();

    match (violations.is_empty(), request.age) {
        (true, Some(age)) => Ok(NewUser {
            name: request.name.clone(),
            email: request.email.clone(),
            age,
        }),
        _ => Err(ValidationErrors(violations)),
    }
}
