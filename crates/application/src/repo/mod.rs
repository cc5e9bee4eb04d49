mod domain_state_repo;

pub use domain_state_repo::DomainStateRepo;
