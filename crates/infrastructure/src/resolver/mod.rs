mod doh_resolver;

pub use doh_resolver::DohResolver;
