use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::derivation::{derive_charts, derive_outputs};
use crate::schema::{FIELD_SCHEMA, Field, FieldUpdate, RawValue, UnknownField};
use crate::types::*;

/// Calendar year used for chart labels until the shell reports the real one.
pub const DEFAULT_YEAR: i32 = 2025;

/// Number of dispatcher diagnostics kept for display.
const MAX_DIAGNOSTICS: usize = 20;

/// Application Model - the complete state
///
/// Primary inputs are only reachable through [`Model::set_field`] and
/// [`Model::apply_updates`]; both recompute the derived outputs and chart
/// datasets before returning, so every reader sees a consistent state.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    inputs: PrimaryInputs,
    outputs: DerivedOutputs,
    charts: ChartDatasets,
    current_year: i32,

    // Chat state
    pub transcript: Vec<ChatMessage>,
    pub pending_replies: u32,

    // Skipped assistant updates, most recent last
    pub diagnostics: Vec<String>,
}

impl Default for Model {
    fn default() -> Self {
        let mut model = Self {
            inputs: PrimaryInputs::default(),
            outputs: DerivedOutputs::default(),
            charts: ChartDatasets::default(),
            current_year: DEFAULT_YEAR,
            transcript: vec![ChatMessage {
                id: 1,
                role: ChatRole::Bot,
                content: GREETING.to_string(),
                confidence: None,
            }],
            pending_replies: 0,
            diagnostics: Vec::new(),
        };
        model.recompute();
        model
    }
}

impl Model {
    pub fn inputs(&self) -> &PrimaryInputs {
        &self.inputs
    }

    pub fn outputs(&self) -> &DerivedOutputs {
        &self.outputs
    }

    pub fn charts(&self) -> &ChartDatasets {
        &self.charts
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Set the year the revenue series ends at.
    pub fn set_current_year(&mut self, year: i32) {
        self.current_year = year;
        self.recompute();
    }

    /// Single mutation entry point for one primary input.
    ///
    /// Numeric fields never fail to parse; malformed text becomes 0. Names
    /// outside the schema leave the model untouched.
    pub fn set_field(
        &mut self,
        name: &str,
        raw: impl Into<RawValue>,
    ) -> Result<Field, UnknownField> {
        let update = FieldUpdate::parse(name, raw)?;
        let field = update.field;
        self.apply_updates([update]);
        Ok(field)
    }

    /// Apply validated updates in order, then recompute once.
    pub fn apply_updates(&mut self, updates: impl IntoIterator<Item = FieldUpdate>) {
        for update in updates {
            self.inputs.assign(update);
        }
        self.recompute();
    }

    /// Rebuild derived outputs and chart datasets from the current inputs.
    pub fn recompute(&mut self) {
        self.outputs = derive_outputs(&self.inputs);
        self.charts = derive_charts(&self.inputs, &self.outputs, self.current_year);
    }

    /// Immutable UI context: inputs, outputs, chart datasets and help text.
    pub fn snapshot(&self) -> UiContext {
        let inputs = &self.inputs;
        let outputs = &self.outputs;

        UiContext {
            text_data: TextData {
                company_name: inputs.company_name.clone(),
                industry: inputs.industry.clone(),
                employees: inputs.employees,
                annual_revenue: outputs.annual_revenue,
                revenue_growth_rate: inputs.revenue_growth_rate,
                profit_margin: outputs.profit_margin,
                total_investment: inputs.total_investment,
                roi_percentage: outputs.roi_percentage,
                help_text: HELP_TEXT.to_string(),
            },
            visual_data: VisualData {
                revenue_chart: RevenueChart::new(self.charts.revenue_series.clone()),
                profit_margin_chart: MarginChart::new(self.charts.margin_series.clone()),
            },
        }
    }

    /// Domain warnings keyed by field name. Warnings never block a mutation.
    pub fn field_errors(&self) -> HashMap<String, String> {
        FIELD_SCHEMA
            .iter()
            .filter_map(|spec| {
                spec.check(&self.inputs)
                    .map(|message| (spec.name.to_string(), message.to_string()))
            })
            .collect()
    }

    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn push_message(&mut self, role: ChatRole, content: String, confidence: Option<f64>) {
        let id = self.transcript.last().map_or(1, |message| message.id + 1);
        self.transcript.push(ChatMessage {
            id,
            role,
            content,
            confidence,
        });
    }

    /// Record a diagnostic, dropping the oldest beyond the display limit.
    pub fn record_diagnostic(&mut self, diagnostic: String) {
        self.diagnostics.push(diagnostic);
        if self.diagnostics.len() > MAX_DIAGNOSTICS {
            let excess = self.diagnostics.len() - MAX_DIAGNOSTICS;
            self.diagnostics.drain(..excess);
        }
    }

    /// Build the view model handed to the shell.
    pub fn view(&self) -> ViewModel {
        ViewModel {
            context: self.snapshot(),
            transcript: self.transcript.clone(),
            is_typing: self.is_typing(),
            field_errors: self.field_errors(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

/// What the shell renders
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub context: UiContext,
    pub transcript: Vec<ChatMessage>,
    pub is_typing: bool,
    pub field_errors: HashMap<String, String>,
    pub diagnostics: Vec<String>,
}
