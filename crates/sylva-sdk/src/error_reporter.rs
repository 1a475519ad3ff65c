// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Rate-limited alerts for uncaught faults.
//!
//! While attached, the [`ErrorReporter`] owns the host's fault handler. Each
//! activation gets its own [`AlertBudget`]: at most [`MAX_ALERTS`] faults are
//! shown to the user, the rest are dropped. Detaching discards the budget, so
//! the next activation starts from zero.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sylva_core::platform::{AlertSink, FaultHandler, HostEnvironment, HostFault};

/// Maximum number of alerts shown per activation.
pub const MAX_ALERTS: usize = 5;

/// First line of every fault alert.
pub const ALERT_BANNER: &str =
    "An error occurred, please send a screenshot of this message to the developer";

/// Builds the text of a fault alert.
pub fn format_alert(fault: &HostFault, stack: &str) -> String {
    format!("{ALERT_BANNER}\n{}\n{stack}", fault.message)
}

/// The alert counter of one activation.
#[derive(Debug, Default)]
pub struct AlertBudget {
    faults: AtomicUsize,
}

impl AlertBudget {
    /// Creates an untouched budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Faults received so far, alerted or not.
    pub fn faults_seen(&self) -> usize {
        self.faults.load(Ordering::SeqCst)
    }

    /// Returns `true` once no more alerts will be shown.
    pub fn is_exhausted(&self) -> bool {
        self.faults_seen() >= MAX_ALERTS
    }
}

impl FaultHandler for AlertBudget {
    fn on_fault(&self, fault: &HostFault, alerts: &dyn AlertSink) {
        // Every fault consumes budget, even one without a stack.
        let seen = self.faults.fetch_add(1, Ordering::SeqCst);
        if seen >= MAX_ALERTS {
            log::trace!("Alert budget exhausted, dropping fault: {fault}");
            return;
        }
        match &fault.stack {
            Some(stack) => alerts.alert(&format_alert(fault, stack)),
            None => log::debug!("Not alerting fault without a stack: {fault}"),
        }
    }
}

/// Installs and removes the alerting fault handler.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    budget: Option<Arc<AlertBudget>>,
}

impl ErrorReporter {
    /// Creates a detached reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a handler with a fresh budget on `host`, replacing any
    /// handler already installed.
    pub fn attach(&mut self, host: &dyn HostEnvironment) {
        let budget = Arc::new(AlertBudget::new());
        host.set_fault_handler(Some(budget.clone()));
        self.budget = Some(budget);
        log::debug!("Global error alerts enabled.");
    }

    /// Removes the handler from `host` and discards the budget.
    pub fn detach(&mut self, host: &dyn HostEnvironment) {
        host.set_fault_handler(None);
        if self.budget.take().is_some() {
            log::debug!("Global error alerts disabled.");
        }
    }

    /// Returns `true` while a handler is installed.
    pub fn is_attached(&self) -> bool {
        self.budget.is_some()
    }

    /// The budget of the current activation.
    pub fn budget(&self) -> Option<&AlertBudget> {
        self.budget.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylva_infra::HeadlessHost;

    fn fault(n: usize) -> HostFault {
        HostFault::new(format!("fault {n}")).with_stack("at main")
    }

    #[test]
    fn alert_text_has_banner_message_and_stack() {
        let text = format_alert(&fault(1), "at main");
        assert_eq!(
            text,
            "An error occurred, please send a screenshot of this message to the developer\nfault 1\nat main"
        );
    }

    #[test]
    fn budget_caps_alerts_per_activation() {
        let host = HeadlessHost::default();
        let mut reporter = ErrorReporter::new();
        reporter.attach(&host);

        for n in 0..7 {
            host.raise_fault(fault(n));
        }
        assert_eq!(host.alerts().len(), 5);
        assert!(reporter.budget().is_some_and(AlertBudget::is_exhausted));

        reporter.detach(&host);
        reporter.attach(&host);
        host.raise_fault(fault(7));
        host.raise_fault(fault(8));
        assert_eq!(host.alerts().len(), 7);
    }

    #[test]
    fn faults_without_stack_consume_budget_silently() {
        let host = HeadlessHost::default();
        let mut reporter = ErrorReporter::new();
        reporter.attach(&host);

        for _ in 0..5 {
            host.raise_fault(HostFault::new("no stack"));
        }
        host.raise_fault(fault(1));

        assert!(host.alerts().is_empty());
        assert_eq!(reporter.budget().map(AlertBudget::faults_seen), Some(6));
    }

    #[test]
    fn detached_reporter_leaves_default_handling() {
        let host = HeadlessHost::default();
        let mut reporter = ErrorReporter::new();
        reporter.attach(&host);
        reporter.detach(&host);

        host.raise_fault(fault(1));
        assert!(!reporter.is_attached());
        assert!(host.alerts().is_empty());
        assert_eq!(host.unhandled_faults().len(), 1);
    }
}
