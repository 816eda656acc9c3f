mod null_backend;

pub use null_backend::{NullChartBackend, NullChartHandle, NullPickerBackend};

use crate::core::{ChartDescriptor, NodeId, PickerConfig};
use crate::error::EnhanceResult;

/// Contract implemented by the date/time-picker widget library.
///
/// The backend owns calendar rendering and value parsing; the enhancer only
/// hands over the element and its resolved configuration.
pub trait PickerBackend {
    fn init(&mut self, element: NodeId, config: &PickerConfig) -> EnhanceResult<()>;
}

/// Contract implemented by the charting library.
///
/// `create` receives the element id assigned by the chart binder and returns a
/// handle the enhancer keeps alive until teardown.
pub trait ChartBackend {
    type Handle;

    fn create(&mut self, id: &str, descriptor: &ChartDescriptor) -> EnhanceResult<Self::Handle>;

    fn destroy(&mut self, _handle: Self::Handle) {}
}
