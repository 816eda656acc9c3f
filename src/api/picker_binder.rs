use tracing::{debug, trace, warn};

use crate::core::{Document, NodeId, PickerConfig, PickerFlags};
use crate::error::EnhanceResult;
use crate::render::{ChartBackend, PickerBackend};

use super::{BinderKind, EnhanceReport, PageEnhancer};

impl<P: PickerBackend, C: ChartBackend> PageEnhancer<P, C> {
    /// Initializes a picker for every picker-marked element.
    pub(super) fn bind_pickers(
        &mut self,
        document: &Document,
        report: &mut EnhanceReport,
    ) -> EnhanceResult<()> {
        let nodes = document.elements_with_attribute(&self.config.markers.picker);
        debug!(count = nodes.len(), "bind date pickers");

        for node in nodes {
            match self.bind_picker(document, node) {
                Ok(value_matches) => {
                    report.pickers_bound += 1;
                    if !value_matches {
                        report.picker_value_mismatches += 1;
                    }
                }
                Err(err) => {
                    self.handle_bind_failure(BinderKind::Picker, document, node, err, report)?;
                }
            }
        }
        Ok(())
    }

    /// Returns whether the element's pre-filled value (if any) fits the
    /// resolved date format.
    fn bind_picker(&mut self, document: &Document, node: NodeId) -> EnhanceResult<bool> {
        let element = document.element(node)?;
        let flags = PickerFlags::from_element(element, &self.config.markers);
        let behavior = &self.config.picker;
        let config = PickerConfig::resolve(
            flags,
            &behavior.date_format,
            &behavior.date_time_format,
            behavior.time_24h_requires_time,
        );

        let format = if flags.enable_time {
            &self.date_time_format
        } else {
            &self.date_format
        };
        let value_matches = match element.attribute("value").map(str::trim) {
            Some(value) if !value.is_empty() && !format.matches(value) => {
                warn!(
                    element = %element.display_name(),
                    value,
                    date_format = format.source(),
                    "pre-filled picker value does not match its date format"
                );
                false
            }
            _ => true,
        };

        trace!(
            node = node.index(),
            date_format = %config.date_format,
            enable_time = flags.enable_time,
            time_24h = flags.time_24h,
            "init date picker"
        );
        self.picker.init(node, &config)?;
        Ok(value_matches)
    }
}
