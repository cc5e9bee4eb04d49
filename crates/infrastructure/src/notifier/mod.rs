mod logging_notifier;
mod webhook_notifier;

pub use logging_notifier::LoggingNotifier;
pub use webhook_notifier::WebhookNotifier;
