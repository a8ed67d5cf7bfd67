//! Declarative input validation.
//!
//! A [`Schema`] lists the accepted fields of a JSON object. Validation visits
//! every field and reports every violated field (first failing check per
//! field), drops keys the schema does not name, and normalizes accepted
//! values. The sanitized object is what handlers deserialize.

pub mod schemas;

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use ulid::Ulid;

use crate::error::AppError;

/// Separator between violations in the client-facing message.
pub const MESSAGE_SEPARATOR: &str = ", ";

#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy)]
pub enum Presence {
    Required(&'static str),
    Optional,
}

#[derive(Debug, Clone, Copy)]
pub enum Normalize {
    /// Value is used exactly as sent (passwords)
    Keep,
    Trim,
    TrimLowercase,
    /// Canonical ULID case
    Uppercase,
}

#[derive(Debug, Clone, Copy)]
pub enum Check {
    Email(&'static str),
    MinChars(usize, &'static str),
    MaxChars(usize, &'static str),
    /// 26-character Crockford base32 ULID
    Identifier(&'static str),
}

impl Check {
    fn run(&self, value: &str) -> Result<(), &'static str> {
        let ok = match *self {
            Check::Email(_) => EMAIL.is_match(value),
            Check::MinChars(n, _) => value.chars().count() >= n,
            Check::MaxChars(n, _) => value.chars().count() <= n,
            Check::Identifier(_) => Ulid::from_string(value).is_ok(),
        };
        if ok {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    fn message(&self) -> &'static str {
        match *self {
            Check::Email(m) | Check::MinChars(_, m) | Check::MaxChars(_, m) | Check::Identifier(m) => m,
        }
    }
}

/// One accepted string field.
#[derive(Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub presence: Presence,
    pub normalize: Normalize,
    pub checks: &'static [Check],
}

impl FieldRule {
    fn apply(&self, raw: &str) -> Result<String, String> {
        let value = match self.normalize {
            Normalize::Keep => raw.to_string(),
            Normalize::Trim => raw.trim().to_string(),
            Normalize::TrimLowercase => raw.trim().to_lowercase(),
            Normalize::Uppercase => raw.to_ascii_uppercase(),
        };

        if value.is_empty() {
            return Err(format!("\"{}\" is not allowed to be empty", self.name));
        }

        for check in self.checks {
            check.run(&value).map_err(str::to_string)?;
        }
        Ok(value)
    }
}

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldRule],
}

/// Every violation found, in schema field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn message(&self) -> String {
        self.messages.join(MESSAGE_SEPARATOR)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::validation(e.message())
    }
}

/// Validate `payload` against `schema` and return the sanitized object.
pub fn validate(schema: &Schema, payload: &Value) -> Result<Map<String, Value>, ValidationError> {
    let Some(obj) = payload.as_object() else {
        return Err(ValidationError::single("\"value\" must be of type object"));
    };

    let mut sanitized = Map::new();
    let mut messages = Vec::new();

    for rule in schema.fields {
        match obj.get(rule.name) {
            None => {
                if let Presence::Required(message) = rule.presence {
                    messages.push(message.to_string());
                }
            }
            Some(Value::String(raw)) => match rule.apply(raw) {
                Ok(value) => {
                    sanitized.insert(rule.name.to_string(), Value::String(value));
                }
                Err(message) => messages.push(message),
            },
            Some(_) => messages.push(format!("\"{}\" must be a string", rule.name)),
        }
    }

    if messages.is_empty() {
        Ok(sanitized)
    } else {
        Err(ValidationError { messages })
    }
}

/// A request payload bound to a schema.
pub trait Validated: DeserializeOwned {
    const SCHEMA: &'static Schema;
}

/// Validate and deserialize in one step.
pub fn validate_into<T: Validated>(payload: &Value) -> Result<T, AppError> {
    let sanitized = validate(T::SCHEMA, payload)?;
    serde_json::from_value(Value::Object(sanitized)).map_err(|e| {
        AppError::internal(format!(
            "schema {} does not match its payload type: {e}",
            T::SCHEMA.name
        ))
    })
}
