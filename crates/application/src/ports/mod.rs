mod notifier;
mod resolver;
mod store;

pub use notifier::Notifier;
pub use resolver::{ARecord, ResolveResult, Resolver, SoaRecord};
pub use store::Store;
