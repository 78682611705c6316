use serde::{Deserialize, Serialize};

use super::outputs::{MarginPoint, RevenuePoint};

pub const HELP_TEXT: &str = "ROI is calculated as (Net Profit / Investment) * 100";
pub const REVENUE_CHART_TITLE: &str = "Revenue over last 5 years";
pub const MARGIN_CHART_TITLE: &str = "Profit margin trend";

/// Snapshot of everything the dashboard shows, as sent to the assistant
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiContext {
    pub text_data: TextData,
    pub visual_data: VisualData,
}

/// Inputs, outputs and help text
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextData {
    pub company_name: String,
    pub industry: String,
    pub employees: i64,
    pub annual_revenue: f64,
    pub revenue_growth_rate: f64,
    pub profit_margin: f64,
    pub total_investment: i64,
    pub roi_percentage: f64,
    pub help_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualData {
    pub revenue_chart: RevenueChart,
    pub profit_margin_chart: MarginChart,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    LineChart,
    BarChart,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenueChart {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub data: Vec<RevenuePoint>,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarginChart {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub data: Vec<MarginPoint>,
    pub description: String,
}

impl RevenueChart {
    pub fn new(data: Vec<RevenuePoint>) -> Self {
        let description = match (data.first(), data.last()) {
            (Some(first), Some(last)) => format!(
                "Line chart showing revenue growth from ${}M to ${}M",
                first.revenue, last.revenue
            ),
            _ => "Line chart showing revenue growth".to_string(),
        };

        Self {
            kind: ChartKind::LineChart,
            title: REVENUE_CHART_TITLE.to_string(),
            data,
            description,
        }
    }
}

impl MarginChart {
    pub fn new(data: Vec<MarginPoint>) -> Self {
        let quarters = data
            .iter()
            .map(|point| format!("{}: {}%", point.quarter, point.margin))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            kind: ChartKind::BarChart,
            title: MARGIN_CHART_TITLE.to_string(),
            data,
            description: format!("Bar chart showing quarterly profit margins: {quarters}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_kind_serializes_as_wire_type() {
        let chart = MarginChart::new(vec![]);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["type"], "bar_chart");
        assert_eq!(
            serde_json::to_value(ChartKind::LineChart).unwrap(),
            "line_chart"
        );
    }

    #[test]
    fn revenue_description_names_first_and_last_point() {
        let chart = RevenueChart::new(vec![
            RevenuePoint {
                year: 2021,
                revenue: 6.8,
            },
            RevenuePoint {
                year: 2025,
                revenue: 11.6,
            },
        ]);

        assert_eq!(
            chart.description,
            "Line chart showing revenue growth from $6.8M to $11.6M"
        );
    }

    #[test]
    fn margin_description_lists_quarters_without_trailing_zeros() {
        let chart = MarginChart::new(vec![
            MarginPoint {
                quarter: "Q1".to_string(),
                margin: 12.0,
            },
            MarginPoint {
                quarter: "Q2".to_string(),
                margin: 14.5,
            },
        ]);

        assert_eq!(
            chart.description,
            "Bar chart showing quarterly profit margins: Q1: 12%, Q2: 14.5%"
        );
    }

    #[test]
    fn context_uses_camel_case_wire_names() {
        let json = serde_json::to_value(UiContext::default()).unwrap();
        assert!(json["textData"]["companyName"].is_string());
        assert!(json["textData"]["roiPercentage"].is_number());
        assert!(json["visualData"]["profitMarginChart"].is_object());
    }
}
