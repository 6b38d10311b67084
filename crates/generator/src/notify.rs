use std::sync::Mutex;

use tracing::{info, warn};

/// User-facing notification surface. Messages are advisory only; nothing in
/// the generation logic depends on them.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn validation_failure(&self, message: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(event_name = "generator.notify.success", "{message}");
    }

    fn validation_failure(&self, message: &str) {
        warn!(event_name = "generator.notify.validation", "{message}");
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Validation(String),
}

/// Captures notifications for assertions in tests and smoke tooling.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    events: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(notification);
        }
    }
}

impl Notifier for MemoryNotifier {
    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn validation_failure(&self, message: &str) {
        self.push(Notification::Validation(message.to_string()));
    }
}
