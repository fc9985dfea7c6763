//! Partial updates keyed by field name.
//!
//! A record type opts in by implementing [`Patchable`], which hands out a
//! static table of its declared fields. Each entry pairs the transfer name of
//! the field with a typed setter; the setter variant is the field's type tag
//! and decides how a raw JSON value is coerced before it is written.
//!
//! Field names are matched exactly (case-sensitive). Declared fields whose
//! type has no coercion rule are listed as [`FieldSetter::Unsupported`] so a
//! patch naming them is rejected instead of silently skipped.
//!
//! Nothing here validates bounds or cross-field consistency. Callers must
//! not feed field names from untrusted input without restricting them to
//! [`patchable_fields`] first.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::database::models::FamilyProfile;
use crate::error::PatchError;

pub enum FieldSetter<R> {
    Decimal(fn(&mut R, Option<Decimal>)),
    Integer(fn(&mut R, Option<i32>)),
    Text(fn(&mut R, Option<String>)),
    Boolean(fn(&mut R, Option<bool>)),
    Unsupported(&'static str),
}

pub struct FieldSpec<R> {
    pub name: &'static str,
    /// Whether a JSON `null` may clear the field.
    pub nullable: bool,
    pub setter: FieldSetter<R>,
}

impl<R> FieldSpec<R> {
    pub fn type_name(&self) -> &'static str {
        match self.setter {
            FieldSetter::Decimal(_) => "decimal",
            FieldSetter::Integer(_) => "integer",
            FieldSetter::Text(_) => "text",
            FieldSetter::Boolean(_) => "boolean",
            FieldSetter::Unsupported(type_name) => type_name,
        }
    }
}

pub trait Patchable: Sized + 'static {
    fn fields() -> &'static [FieldSpec<Self>];
}

/// Names of the fields of `R` that a patch can actually write.
pub fn patchable_fields<R: Patchable>() -> impl Iterator<Item = &'static str> {
    R::fields()
        .iter()
        .filter(|f| !matches!(f.setter, FieldSetter::Unsupported(_)))
        .map(|f| f.name)
}

/// Coerce `raw` into the declared type of `field_name` and write it into `record`.
pub fn apply_field<R: Patchable>(record: &mut R, field_name: &str, raw: &Value) -> Result<(), PatchError> {
    let spec = R::fields()
        .iter()
        .find(|f| f.name == field_name)
        .ok_or_else(|| PatchError::FieldNotFound(field_name.to_string()))?;

    match &spec.setter {
        FieldSetter::Decimal(set) => set(record, coerce(spec, raw, parse_decimal)?),
        FieldSetter::Integer(set) => set(record, coerce(spec, raw, parse_integer)?),
        FieldSetter::Text(set) => set(record, coerce(spec, raw, parse_text)?),
        FieldSetter::Boolean(set) => set(record, coerce(spec, raw, parse_boolean)?),
        FieldSetter::Unsupported(type_name) => {
            return Err(PatchError::UnsupportedField {
                field: spec.name.to_string(),
                type_name: *type_name,
            })
        }
    }

    Ok(())
}

/// Apply every entry of `updates` in turn, stopping at the first failure.
///
/// On error `record` may be partially modified; callers persist it only on `Ok`.
pub fn apply_patch<R: Patchable>(record: &mut R, updates: &Map<String, Value>) -> Result<(), PatchError> {
    for (field_name, raw) in updates {
        apply_field(record, field_name, raw)?;
    }
    Ok(())
}

fn coerce<R, T>(
    spec: &FieldSpec<R>,
    raw: &Value,
    parse: fn(&Value) -> Result<T, String>,
) -> Result<Option<T>, PatchError> {
    let failure = |reason: String| PatchError::Coercion {
        field: spec.name.to_string(),
        expected: spec.type_name(),
        value: raw.to_string(),
        reason,
    };

    if raw.is_null() {
        return if spec.nullable {
            Ok(None)
        } else {
            Err(failure("field cannot be null".to_string()))
        };
    }

    parse(raw).map(Some).map_err(failure)
}

// String contents for JSON strings, JSON text for everything else.
fn textual(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_decimal(raw: &Value) -> Result<Decimal, String> {
    match raw {
        Value::Number(_) | Value::String(_) => {
            let text = textual(raw);
            Decimal::from_str_exact(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|e| e.to_string())
        }
        _ => Err("not a numeric value".to_string()),
    }
}

fn parse_integer(raw: &Value) -> Result<i32, String> {
    textual(raw).parse::<i32>().map_err(|e| e.to_string())
}

fn parse_text(raw: &Value) -> Result<String, String> {
    Ok(textual(raw))
}

fn parse_boolean(raw: &Value) -> Result<bool, String> {
    if let Value::Bool(b) = raw {
        return Ok(*b);
    }

    let text = textual(raw);
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("expected true or false".to_string())
    }
}

static FAMILY_PROFILE_FIELDS: [FieldSpec<FamilyProfile>; 9] = [
    FieldSpec { name: "id", nullable: false, setter: FieldSetter::Unsupported("identifier") },
    FieldSpec { name: "userId", nullable: true, setter: FieldSetter::Unsupported("user reference") },
    FieldSpec {
        name: "familySize",
        nullable: false,
        setter: FieldSetter::Integer(|p, v| p.family_size = v),
    },
    FieldSpec {
        name: "monthlyIncome",
        nullable: true,
        setter: FieldSetter::Decimal(|p, v| p.monthly_income = v),
    },
    FieldSpec {
        name: "monthlyExpenses",
        nullable: true,
        setter: FieldSetter::Decimal(|p, v| p.monthly_expenses = v),
    },
    FieldSpec {
        name: "location",
        nullable: true,
        setter: FieldSetter::Text(|p, v| p.location = v),
    },
    FieldSpec {
        name: "riskTolerance",
        nullable: true,
        setter: FieldSetter::Unsupported("enumerated category"),
    },
    FieldSpec { name: "createdAt", nullable: false, setter: FieldSetter::Unsupported("timestamp") },
    FieldSpec { name: "updatedAt", nullable: false, setter: FieldSetter::Unsupported("timestamp") },
];

impl Patchable for FamilyProfile {
    fn fields() -> &'static [FieldSpec<Self>] {
        &FAMILY_PROFILE_FIELDS
    }
}
