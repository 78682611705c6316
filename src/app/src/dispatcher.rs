//! Update dispatcher for assistant-proposed field updates
//!
//! A batch arrives as untrusted `(field, value)` pairs. Each pair is resolved
//! against the field schema; pairs naming an unknown field are skipped with a
//! diagnostic and the rest of the batch still applies. Accepted updates are
//! applied in order, so a later pair for the same field wins, and the model
//! recomputes once after the whole batch.

use log::{debug, warn};

use crate::model::Model;
use crate::schema::{Field, FieldUpdate, RawValue};

/// Outcome of dispatching one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Fields written, in application order
    pub applied: Vec<Field>,
    /// Names that did not resolve to a primary input
    pub skipped: Vec<String>,
}

impl DispatchReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.skipped.is_empty()
    }
}

/// Split a batch into validated updates and the names that were rejected.
pub fn validate<I>(batch: I) -> (Vec<FieldUpdate>, Vec<String>)
where
    I: IntoIterator<Item = (String, RawValue)>,
{
    let mut accepted = Vec::new();
    let mut skipped = Vec::new();

    for (name, value) in batch {
        match FieldUpdate::parse(&name, value) {
            Ok(update) => accepted.push(update),
            Err(_) => skipped.push(name),
        }
    }

    (accepted, skipped)
}

/// Validate and apply a batch. An absent or empty batch leaves the model
/// untouched.
pub fn dispatch(model: &mut Model, batch: Option<Vec<(String, RawValue)>>) -> DispatchReport {
    let Some(batch) = batch.filter(|batch| !batch.is_empty()) else {
        return DispatchReport::default();
    };

    let (accepted, skipped) = validate(batch);

    for name in &skipped {
        warn!("skipping update for unknown field '{name}'");
        model.record_diagnostic(format!("Skipped update for unknown field '{name}'"));
    }

    let applied: Vec<Field> = accepted.iter().map(|update| update.field).collect();

    if !accepted.is_empty() {
        debug!("applying assistant updates: {applied:?}");
        model.apply_updates(accepted);
    }

    DispatchReport { applied, skipped }
}
