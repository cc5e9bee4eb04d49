//! DNS Sentinel Application Layer
//!
//! Hosts the intelligent change analyzer pipeline as stateless functions
//! (`analyzer`), the ports other layers adapt (`ports`), the typed store
//! view (`repo`), and the use cases that drive them (`use_cases`).

pub mod analyzer;
pub mod ports;
pub mod repo;
pub mod use_cases;
