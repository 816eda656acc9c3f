use crate::core::{ChartDescriptor, NodeId, PickerConfig};
use crate::error::{EnhanceError, EnhanceResult};
use crate::render::{ChartBackend, PickerBackend};

/// Headless picker backend that records every initialization.
///
/// It still validates the configured date format so tests catch formats a
/// real picker could not use.
#[derive(Debug, Default)]
pub struct NullPickerBackend {
    pub initialized: Vec<(NodeId, PickerConfig)>,
}

impl PickerBackend for NullPickerBackend {
    fn init(&mut self, element: NodeId, config: &PickerConfig) -> EnhanceResult<()> {
        if config.date_format.trim().is_empty() {
            return Err(EnhanceError::Backend {
                backend: "picker",
                message: "dateFormat must not be empty".to_owned(),
            });
        }
        self.initialized.push((element, config.clone()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullChartHandle {
    pub id: String,
    pub serial: usize,
}

/// Headless chart backend that records created and destroyed charts.
///
/// Rejects an empty chart type, as a real charting library would.
#[derive(Debug, Default)]
pub struct NullChartBackend {
    pub created: Vec<(String, ChartDescriptor)>,
    pub destroyed: Vec<String>,
}

impl ChartBackend for NullChartBackend {
    type Handle = NullChartHandle;

    fn create(&mut self, id: &str, descriptor: &ChartDescriptor) -> EnhanceResult<Self::Handle> {
        if descriptor.kind.trim().is_empty() {
            return Err(EnhanceError::Backend {
                backend: "chart",
                message: format!("chart `{id}` has no type"),
            });
        }
        let handle = NullChartHandle {
            id: id.to_owned(),
            serial: self.created.len(),
        };
        self.created.push((id.to_owned(), descriptor.clone()));
        Ok(handle)
    }

    fn destroy(&mut self, handle: Self::Handle) {
        self.destroyed.push(handle.id);
    }
}
