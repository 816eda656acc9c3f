use tracing::{debug, trace, warn};

use crate::core::{ChartDescriptor, Document, NodeId};
use crate::error::EnhanceResult;
use crate::render::{ChartBackend, PickerBackend};

use super::{BinderKind, EnhanceReport, PageEnhancer};

impl<P: PickerBackend, C: ChartBackend> PageEnhancer<P, C> {
    /// Assigns `<prefix><n>` ids to chart-marked elements in document order and
    /// creates a chart for each.
    ///
    /// The counter advances for every marked element, including ones that
    /// fail to decode, so ids never depend on attribute values.
    pub(super) fn bind_charts(
        &mut self,
        document: &mut Document,
        report: &mut EnhanceReport,
    ) -> EnhanceResult<()> {
        let nodes = document.elements_with_attribute(&self.config.markers.chart);
        debug!(count = nodes.len(), "bind charts");

        let mut ids_in_use = document.element_ids();
        for (index, node) in nodes.into_iter().enumerate() {
            let id = format!("{}{index}", self.config.chart.id_prefix);
            if let Some(existing) = ids_in_use.get(&id) {
                if *existing != node {
                    warn!(id = %id, "chart id already used by another element");
                }
            }
            if let Some(previous) = document.element(node)?.id() {
                if ids_in_use.get(previous) == Some(&node) {
                    ids_in_use.shift_remove(previous);
                }
            }
            ids_in_use.insert(id.clone(), node);
            document.set_attribute(node, "id", id.as_str())?;

            match self.create_chart(document, node, &id) {
                Ok(handle) => {
                    self.registry.push(id.as_str(), handle);
                    report.charts_bound.push(id);
                }
                Err(err) => {
                    self.handle_bind_failure(BinderKind::Chart, document, node, err, report)?;
                }
            }
        }
        Ok(())
    }

    fn create_chart(
        &mut self,
        document: &Document,
        node: NodeId,
        id: &str,
    ) -> EnhanceResult<C::Handle> {
        let descriptor = ChartDescriptor::from_element(document.element(node)?, &self.config.markers)?;
        trace!(
            id,
            kind = %descriptor.kind,
            labels = descriptor.labels.len(),
            datasets = descriptor.datasets.len(),
            "create chart"
        );
        self.charts.create(id, &descriptor)
    }
}
