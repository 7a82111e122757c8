//! Alert auto-dismissal

use fos_dom::NodeId;

use crate::behaviors::Task;
use crate::event_loop::TimerHandle;
use crate::page::Page;

impl Page {
    /// Schedule every non-permanent alert under `root` for dismissal
    pub(crate) fn init_alerts(&mut self, root: NodeId) -> usize {
        let selector = self.config.alert_selector();
        let alerts = match self.document.tree().query_selector_all(root, &selector) {
            Ok(alerts) => alerts,
            Err(err) => {
                tracing::warn!("Invalid alert selector {:?}: {}", selector, err);
                return 0;
            }
        };

        let delay = self.config.alert_dismiss_delay_ms;
        let mut scheduled = 0;
        for alert in alerts {
            if self.alert_timers.contains_key(&alert) {
                continue;
            }
            let handle = self.event_loop.set_timeout(Task::DismissAlert { alert }, delay);
            self.alert_timers.insert(alert, handle);
            scheduled += 1;
        }
        scheduled
    }

    /// Timer fired: close the alert unless something already removed it
    pub(crate) fn dismiss_alert(&mut self, alert: NodeId) {
        self.alert_timers.remove(&alert);
        if !self.document.tree().is_connected(alert) {
            tracing::trace!(alert = %alert, "alert already removed");
            return;
        }

        let closed = self
            .toolkit
            .create_dismissible_alert(&self.document, alert)
            .and_then(|mut widget| widget.close(&mut self.document));
        match closed {
            Ok(()) => tracing::trace!(alert = %alert, "alert dismissed"),
            Err(err) => tracing::debug!("Alert {} not closed: {}", alert, err),
        }
    }

    /// Pending dismissal for an alert, if any
    pub fn alert_dismissal(&self, alert: NodeId) -> Option<&TimerHandle> {
        self.alert_timers.get(&alert)
    }

    /// Keep an alert on screen; returns whether a dismissal was pending
    pub fn cancel_alert_dismissal(&mut self, alert: NodeId) -> bool {
        match self.alert_timers.remove(&alert) {
            Some(handle) => {
                let pending = handle.is_active();
                handle.cancel();
                pending
            }
            None => false,
        }
    }
}
