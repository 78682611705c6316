//! Field schema for the primary inputs
//!
//! Every settable field is listed once in [`FIELD_SCHEMA`] together with its
//! declared kind and its domain check. Name lookup, coercion of raw values and
//! validation all go through this table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::PrimaryInputs;

/// A primary input of the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CompanyName,
    Industry,
    Employees,
    RevenueGrowthRate,
    TotalInvestment,
}

/// Declared type of a primary input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
}

/// Schema entry: wire name, declared kind and domain check of one field.
pub struct FieldSpec {
    pub field: Field,
    pub name: &'static str,
    pub kind: FieldKind,
    check: fn(&PrimaryInputs) -> Option<&'static str>,
}

impl FieldSpec {
    /// Returns a warning if the current value lies outside the field's domain.
    pub fn check(&self, inputs: &PrimaryInputs) -> Option<&'static str> {
        (self.check)(inputs)
    }
}

pub static FIELD_SCHEMA: [FieldSpec; 5] = [
    FieldSpec {
        field: Field::CompanyName,
        name: "companyName",
        kind: FieldKind::Text,
        check: check_company_name,
    },
    FieldSpec {
        field: Field::Industry,
        name: "industry",
        kind: FieldKind::Text,
        check: check_industry,
    },
    FieldSpec {
        field: Field::Employees,
        name: "employees",
        kind: FieldKind::Integer,
        check: check_employees,
    },
    FieldSpec {
        field: Field::RevenueGrowthRate,
        name: "revenueGrowthRate",
        kind: FieldKind::Decimal,
        check: check_unrestricted,
    },
    FieldSpec {
        field: Field::TotalInvestment,
        name: "totalInvestment",
        kind: FieldKind::Integer,
        check: check_total_investment,
    },
];

fn check_company_name(inputs: &PrimaryInputs) -> Option<&'static str> {
    inputs
        .company_name
        .trim()
        .is_empty()
        .then_some("Company name must not be empty")
}

fn check_industry(inputs: &PrimaryInputs) -> Option<&'static str> {
    inputs
        .industry
        .trim()
        .is_empty()
        .then_some("Industry must not be empty")
}

fn check_employees(inputs: &PrimaryInputs) -> Option<&'static str> {
    (inputs.employees < 0).then_some("Number of employees must not be negative")
}

fn check_unrestricted(_: &PrimaryInputs) -> Option<&'static str> {
    None
}

fn check_total_investment(inputs: &PrimaryInputs) -> Option<&'static str> {
    (inputs.total_investment <= 0).then_some("Total investment must be greater than zero")
}

impl Field {
    /// Resolve a wire name (e.g. `"employees"`) to a field.
    pub fn from_name(name: &str) -> Option<Self> {
        FIELD_SCHEMA
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.field)
    }

    pub fn spec(self) -> &'static FieldSpec {
        match self {
            Field::CompanyName => &FIELD_SCHEMA[0],
            Field::Industry => &FIELD_SCHEMA[1],
            Field::Employees => &FIELD_SCHEMA[2],
            Field::RevenueGrowthRate => &FIELD_SCHEMA[3],
            Field::TotalInvestment => &FIELD_SCHEMA[4],
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a field name is not one of the primary inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

/// An untyped value as it arrives from a form input or the assistant.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(RawValue::Null, RawValue::Number),
            serde_json::Value::String(s) => RawValue::Text(s),
            other => RawValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

/// A value coerced to the declared kind of its field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl FieldKind {
    /// Coerce a raw value to this kind.
    ///
    /// Numeric kinds never fail: text that does not parse as a finite number
    /// becomes 0, fractional values are truncated for integer fields.
    pub fn coerce(self, raw: RawValue) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(match raw {
                RawValue::Null => String::new(),
                RawValue::Bool(b) => b.to_string(),
                RawValue::Number(n) => n.to_string(),
                RawValue::Text(s) => s,
            }),
            FieldKind::Integer => FieldValue::Integer(numeric(&raw).trunc() as i64),
            FieldKind::Decimal => FieldValue::Decimal(numeric(&raw)),
        }
    }
}

fn numeric(raw: &RawValue) -> f64 {
    let value = match raw {
        RawValue::Null => 0.0,
        RawValue::Bool(b) => f64::from(u8::from(*b)),
        RawValue::Number(n) => *n,
        RawValue::Text(s) => match s.trim() {
            "" => 0.0,
            text => text.parse::<f64>().unwrap_or_else(|_| {
                log::warn!("non-numeric input '{text}' coerced to 0");
                0.0
            }),
        },
    };

    if value.is_finite() { value } else { 0.0 }
}

/// A validated update: a recognized field and a value of its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub field: Field,
    pub value: FieldValue,
}

impl FieldUpdate {
    /// Resolve `name` against the schema and coerce `raw` to the field's kind.
    pub fn parse(name: &str, raw: impl Into<RawValue>) -> Result<Self, UnknownField> {
        let field = Field::from_name(name).ok_or_else(|| UnknownField(name.to_string()))?;

        Ok(Self {
            field,
            value: field.kind().coerce(raw.into()),
        })
    }
}
