use serde::{Deserialize, Serialize};

use crate::schema::{Field, FieldUpdate, FieldValue};

/// Primary inputs: the roots of the derivation graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryInputs {
    pub company_name: String,
    pub industry: String,
    pub employees: i64,
    /// Percent, e.g. `8.0` for 8 %
    pub revenue_growth_rate: f64,
    pub total_investment: i64,
}

impl Default for PrimaryInputs {
    fn default() -> Self {
        Self {
            company_name: "Tech Solutions Inc.".to_string(),
            industry: "Software Development".to_string(),
            employees: 120,
            revenue_growth_rate: 8.0,
            total_investment: 2_000_000,
        }
    }
}

impl PrimaryInputs {
    /// Typed setter for a validated update.
    ///
    /// The value is already coerced to the field's declared kind; a value of
    /// another kind is converted numerically.
    pub fn assign(&mut self, update: FieldUpdate) {
        let FieldUpdate { field, value } = update;

        match field {
            Field::CompanyName => self.company_name = value.into_text(),
            Field::Industry => self.industry = value.into_text(),
            Field::Employees => self.employees = value.as_integer(),
            Field::RevenueGrowthRate => self.revenue_growth_rate = value.as_decimal(),
            Field::TotalInvestment => self.total_investment = value.as_integer(),
        }
    }
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Decimal(n) => n.to_string(),
        }
    }

    fn as_integer(&self) -> i64 {
        match self {
            FieldValue::Integer(n) => *n,
            FieldValue::Decimal(n) => n.trunc() as i64,
            FieldValue::Text(_) => 0,
        }
    }

    fn as_decimal(&self) -> f64 {
        match self {
            FieldValue::Decimal(n) => *n,
            FieldValue::Integer(n) => *n as f64,
            FieldValue::Text(_) => 0.0,
        }
    }
}
