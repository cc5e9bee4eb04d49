mod sentinel_job;

pub use sentinel_job::SentinelJob;
