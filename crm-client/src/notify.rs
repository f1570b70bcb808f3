/// Where failed mutations are reported
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Logs through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Prints to stderr, for the terminal front-end
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}
