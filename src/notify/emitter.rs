use std::sync::Mutex;

use event_emitter_rs::EventEmitter;

use super::Notify;

/// Notifier backed by an `EventEmitter`, for consumers that already route
/// UI feedback through emitter listeners (toast layers, status bars).
///
/// # Example
///
/// ```ignore
/// use curator::EmitterNotifier;
///
/// let notifier = EmitterNotifier::new();
/// notifier.on_success(|message| println!("ok: {}", message));
/// notifier.on_error(|message| eprintln!("failed: {}", message));
/// ```
pub struct EmitterNotifier {
    emitter: Mutex<EventEmitter>,
}

impl EmitterNotifier {
    /// Event name fired for successes.
    pub const SUCCESS: &'static str = "success";
    /// Event name fired for errors.
    pub const ERROR: &'static str = "error";

    pub fn new() -> Self {
        EmitterNotifier {
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Register a listener for success notifications.
    pub fn on_success<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.on(Self::SUCCESS, listener);
        }
    }

    /// Register a listener for error notifications.
    pub fn on_error<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.on(Self::ERROR, listener);
        }
    }
}

impl Default for EmitterNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notify for EmitterNotifier {
    fn success(&self, message: &str) {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.emit(Self::SUCCESS, message.to_string());
        }
    }

    fn error(&self, message: &str) {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.emit(Self::ERROR, message.to_string());
        }
    }
}
