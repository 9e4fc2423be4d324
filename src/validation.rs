//! Declarative payload schemas.
//!
//! A [`Schema`] lists the properties a JSON object may carry and their
//! primitive types. [`Schema::check`] reports every violation at once, and
//! [`parse`] turns a conforming payload into a typed value.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Primitive JSON type expected for a property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// A whole number fitting a 32-bit integer column; `207.0` counts as `207`
    Integer,
}

enum Mismatch {
    Type,
    Range,
}

impl FieldType {
    fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }

    fn check(self, value: &Value) -> Result<(), Mismatch> {
        match self {
            FieldType::String if value.is_string() => Ok(()),
            FieldType::String => Err(Mismatch::Type),
            FieldType::Integer => match whole_number(value) {
                None => Err(Mismatch::Type),
                Some(n) if i32::try_from(n).is_err() => Err(Mismatch::Range),
                Some(_) => Ok(()),
            },
        }
    }
}

fn whole_number(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i128)
        })
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldType,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [Field],
    /// Whether properties outside `fields` are tolerated
    pub additional_properties: bool,
}

impl Schema {
    /// Check a payload, collecting one message per violation
    pub fn check(&self, payload: &Value) -> Result<(), Vec<String>> {
        let Some(object) = payload.as_object() else {
            return Err(vec!["instance is not of a type(s) object".to_string()]);
        };

        let mut errors = Vec::new();
        for field in self.fields {
            match object.get(field.name).map(|value| field.kind.check(value)) {
                None if field.required => {
                    errors.push(format!("instance requires property \"{}\"", field.name));
                }
                Some(Err(Mismatch::Type)) => {
                    errors.push(format!(
                        "instance.{} is not of a type(s) {}",
                        field.name,
                        field.kind.name()
                    ));
                }
                Some(Err(Mismatch::Range)) => {
                    errors.push(format!("instance.{} is out of range", field.name));
                }
                _ => {}
            }
        }

        if !self.additional_properties {
            errors.extend(self.additional(object).map(|name| {
                format!("instance is not allowed to have the additional property \"{}\"", name)
            }));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn additional<'a>(&'a self, object: &'a Map<String, Value>) -> impl Iterator<Item = &'a str> {
        object
            .keys()
            .map(String::as_str)
            .filter(move |key| !self.fields.iter().any(|field| field.name == *key))
    }

    /// Rewrite whole floats of integer fields as integers. Assumes `check` passed.
    fn normalize(&self, payload: &mut Value) {
        let Some(object) = payload.as_object_mut() else {
            return;
        };
        for field in self.fields.iter().filter(|f| f.kind == FieldType::Integer) {
            if let Some(value) = object.get_mut(field.name) {
                if let Some(n) = whole_number(value).and_then(|n| i64::try_from(n).ok()) {
                    *value = Value::from(n);
                }
            }
        }
    }
}

/// Check `payload` against `schema` and deserialize it
pub fn parse<T>(schema: &Schema, mut payload: Value) -> AppResult<T>
where
    T: DeserializeOwned,
{
    schema.check(&payload).map_err(AppError::Validation)?;
    schema.normalize(&mut payload);

    serde_json::from_value(payload).map_err(|e| AppError::Validation(vec![e.to_string()]))
}
