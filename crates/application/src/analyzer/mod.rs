mod cdn_detector;
mod change_classifier;
mod coordinated_change_detector;
mod dampening_calculator;
mod load_balancer_analyzer;
mod notification_builder;
mod temporal_analyzer;

pub use cdn_detector::detect_cdn;
pub use change_classifier::classify_change;
pub use coordinated_change_detector::detect_coordination;
pub use dampening_calculator::{calculate_dampening, DampeningInputs, DampeningOutcome};
pub use load_balancer_analyzer::analyze_load_balancer;
pub use notification_builder::{build_auto_suppression_notice, build_notification, NotificationInputs};
pub use temporal_analyzer::temporal_context;
