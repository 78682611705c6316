use serde::{Deserialize, Serialize};

/// Outputs computed from the primary inputs; never set directly
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedOutputs {
    pub annual_revenue: f64,
    pub profit_margin: f64,
    pub roi_percentage: f64,
}

/// One year of the revenue trend, revenue in millions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenuePoint {
    pub year: i32,
    pub revenue: f64,
}

/// One quarter of the profit margin trend, margin in percent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarginPoint {
    pub quarter: String,
    pub margin: f64,
}

/// Chart series projected from inputs and outputs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDatasets {
    pub revenue_series: Vec<RevenuePoint>,
    pub margin_series: Vec<MarginPoint>,
}
