//! page-enhancer: declarative progressive enhancement for server-rendered markup.
//!
//! Elements opt into behaviors through `data-*` marker attributes: a confirm
//! prompt guarding their primary action, a date/time picker, or a chart.
//! The crate scans a parsed document once per page load and hands each
//! matching element to a host-provided backend.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{EnhanceReport, EnhancerConfig, PageEnhancer};
pub use error::{EnhanceError, EnhanceResult};
