mod add_dynamic;
mod clear_dampening;
mod get_dampening;
mod get_status;
mod list_domains;
mod remove_dynamic;
mod remove_subtree;

pub use add_dynamic::{add_dynamic, AddDynamicOutcome};
pub use clear_dampening::clear_dampening;
pub use get_dampening::{get_dampening, DampeningStatus};
pub use get_status::{get_status, DomainStatus};
pub use list_domains::{list_domains, DomainList};
pub use remove_dynamic::{remove_dynamic, RemoveDynamicOutcome};
pub use remove_subtree::{remove_subtree, RemoveSubtreeOutcome};
