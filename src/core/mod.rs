pub mod chart_descriptor;
pub mod date_format;
pub mod document;
pub mod markers;
pub mod markup;
pub mod picker_config;

pub use chart_descriptor::{ChartDescriptor, ChartOptions, DatasetSpec, decode_structured_attribute};
pub use date_format::DateFormat;
pub use document::{Descendants, Document, Element, Node, NodeId, NodeKind};
pub use markers::MarkerAttributes;
pub use picker_config::{DEFAULT_DATE_FORMAT, DEFAULT_DATE_TIME_FORMAT, PickerConfig, PickerFlags};
