mod chart_binder;
mod chart_registry;
mod confirm_binder;
mod enhance_report;
mod enhancer_config;
mod picker_binder;

pub use chart_registry::{ChartEntry, ChartRegistry};
pub use enhance_report::{BinderKind, EnhanceReport, SkippedElement};
pub use enhancer_config::{
    BindFailurePolicy, ChartBehavior, ConfirmBehavior, DEFAULT_CHART_ID_PREFIX, EnhancerConfig,
    PickerBehavior,
};

use tracing::{debug, trace, warn};

use crate::core::{DateFormat, Document, NodeId};
use crate::error::{EnhanceError, EnhanceResult};
use crate::render::{ChartBackend, PickerBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    TornDown,
}

/// Binds declarative behaviors to a loaded page.
///
/// One enhancer serves one page: `on_load` runs the confirm, picker and chart
/// binders exactly once, and `teardown` releases the retained chart handles.
pub struct PageEnhancer<P: PickerBackend, C: ChartBackend> {
    config: EnhancerConfig,
    date_format: DateFormat,
    date_time_format: DateFormat,
    picker: P,
    charts: C,
    registry: ChartRegistry<C::Handle>,
    state: LoadState,
}

impl<P: PickerBackend, C: ChartBackend> PageEnhancer<P, C> {
    pub fn new(config: EnhancerConfig, picker: P, charts: C) -> EnhanceResult<Self> {
        config.validate()?;
        let (date_format, date_time_format) = config.picker_formats()?;
        Ok(Self {
            config,
            date_format,
            date_time_format,
            picker,
            charts,
            registry: ChartRegistry::new(),
            state: LoadState::Pending,
        })
    }

    /// Runs the confirm, picker and chart binders, in that order.
    ///
    /// A page loads once: later calls fail with `AlreadyLoaded`, even when the
    /// first pass aborted part-way.
    pub fn on_load(&mut self, document: &mut Document) -> EnhanceResult<EnhanceReport> {
        if self.state != LoadState::Pending {
            return Err(EnhanceError::AlreadyLoaded);
        }
        self.state = LoadState::Loaded;

        let mut report = EnhanceReport::default();
        self.bind_confirm_handlers(document, &mut report)?;
        self.bind_pickers(document, &mut report)?;
        self.bind_charts(document, &mut report)?;

        debug!(
            confirm = report.confirm_bound,
            pickers = report.pickers_bound,
            charts = report.charts_bound.len(),
            skipped = report.skipped.len(),
            "page enhanced"
        );
        Ok(report)
    }

    /// Disposes every retained chart in registration order. Returns how many
    /// were disposed; repeated calls dispose nothing.
    pub fn teardown(&mut self) -> usize {
        let entries = self.registry.dispose_all();
        let count = entries.len();
        for entry in entries {
            trace!(id = %entry.id, "destroy chart");
            self.charts.destroy(entry.handle);
        }
        if self.state == LoadState::Loaded {
            debug!(disposed = count, "page torn down");
        }
        self.state = LoadState::TornDown;
        count
    }

    #[must_use]
    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub fn registry(&self) -> &ChartRegistry<C::Handle> {
        &self.registry
    }

    #[must_use]
    pub fn picker_backend(&self) -> &P {
        &self.picker
    }

    #[must_use]
    pub fn chart_backend(&self) -> &C {
        &self.charts
    }

    fn handle_bind_failure(
        &self,
        binder: BinderKind,
        document: &Document,
        node: NodeId,
        err: EnhanceError,
        report: &mut EnhanceReport,
    ) -> EnhanceResult<()> {
        match self.config.failure_policy {
            BindFailurePolicy::Abort => Err(err),
            BindFailurePolicy::SkipElement => {
                let element = document.element(node).map_or_else(
                    |_| format!("node {}", node.index()),
                    |element| element.display_name(),
                );
                warn!(
                    error = %err,
                    binder = ?binder,
                    element = %element,
                    "skipping element that failed to bind"
                );
                report.skipped.push(SkippedElement {
                    binder,
                    node: node.index(),
                    element,
                    reason: err.to_string(),
                });
                Ok(())
            }
        }
    }
}
