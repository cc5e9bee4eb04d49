//! DNS Sentinel Domain Layer
pub mod bot_status;
pub mod cdn;
pub mod change;
pub mod config;
pub mod coordination;
pub mod dampening;
pub mod errors;
pub mod fqdn;
pub mod global_change_bucket;
pub mod load_balancer;
pub mod monitored_state;
pub mod notification;
pub mod temporal;

pub use bot_status::BotStatus;
pub use cdn::CdnInfo;
pub use change::{ChangeContext, ChangeType, Severity};
pub use coordination::CoordinationResult;
pub use dampening::{DampeningResult, NotifyDecision};
pub use errors::DomainError;
pub use fqdn::{DomainProvenance, Fqdn};
pub use global_change_bucket::GlobalChangeEntry;
pub use load_balancer::{LbPattern, LbResult};
pub use monitored_state::{DomainState, IpHistoryEntry, MonitoredState, SortedIpSet};
pub use notification::{Notification, NotificationField, NotificationKind, SeverityColor};
pub use temporal::{TemporalContext, TimePattern};
