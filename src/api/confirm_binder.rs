use tracing::{debug, trace, warn};

use crate::core::Document;
use crate::error::EnhanceResult;
use crate::interaction::{ConfirmGuard, HandlerBinding};
use crate::render::{ChartBackend, PickerBackend};

use super::{EnhanceReport, PageEnhancer};

impl<P: PickerBackend, C: ChartBackend> PageEnhancer<P, C> {
    /// Guards the primary action of every confirm-marked element with a prompt.
    pub(super) fn bind_confirm_handlers(
        &self,
        document: &mut Document,
        report: &mut EnhanceReport,
    ) -> EnhanceResult<()> {
        let confirm = &self.config.confirm;
        let nodes = document.elements_with_attribute(&self.config.markers.confirm);
        debug!(
            count = nodes.len(),
            binding = ?confirm.binding,
            "bind confirm handlers"
        );

        for node in nodes {
            if confirm.binding == HandlerBinding::ReplaceSlot
                && document.element(node)?.has_slot_handler()
            {
                warn!(
                    element = %document.element(node)?.display_name(),
                    "confirm guard replaces an existing slot handler"
                );
            }
            document.bind_action_handler(
                node,
                confirm.binding,
                Box::new(ConfirmGuard::new(confirm.message.as_str())),
            )?;
            trace!(node = node.index(), "confirm guard bound");
            report.confirm_bound += 1;
        }
        Ok(())
    }
}
