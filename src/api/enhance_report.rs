use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinderKind {
    Picker,
    Chart,
}

/// Element left unbound under `BindFailurePolicy::SkipElement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedElement {
    pub binder: BinderKind,
    pub node: usize,
    pub element: String,
    pub reason: String,
}

/// Summary of one `on_load` pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceReport {
    pub confirm_bound: usize,
    pub pickers_bound: usize,
    /// Pickers whose pre-filled `value` does not parse under their date format.
    pub picker_value_mismatches: usize,
    /// Chart ids in binding order.
    pub charts_bound: Vec<String>,
    pub skipped: Vec<SkippedElement>,
}

impl EnhanceReport {
    #[must_use]
    pub fn skipped_for(&self, binder: BinderKind) -> usize {
        self.skipped
            .iter()
            .filter(|entry| entry.binder == binder)
            .count()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.picker_value_mismatches == 0
    }
}
