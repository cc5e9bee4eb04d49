use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use dns_sentinel_domain::config::SchedulerConfig;
use dns_sentinel_domain::Fqdn;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use dns_sentinel_application::use_cases::Observer;

/// Drives one tick of spec §4.11: union the static and dynamic domain
/// lists, fan `Observer::check` out across them with bounded
/// concurrency, then publish bot status.
pub struct SentinelJob {
    observer: Arc<Observer>,
    repo: Arc<dns_sentinel_application::repo::DomainStateRepo>,
    static_domains: Vec<Fqdn>,
    config: SchedulerConfig,
    shutdown: Option<CancellationToken>,
}

impl SentinelJob {
    pub fn new(
        observer: Arc<Observer>,
        repo: Arc<dns_sentinel_application::repo::DomainStateRepo>,
        static_domains: Vec<Fqdn>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            observer,
            repo,
            static_domains,
            config,
            shutdown: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(tick_secs = self.config.tick_secs, "starting sentinel scheduler");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.config.tick_secs));
            interval.tick().await;
            loop {
                if let Some(token) = &self.shutdown {
                    tokio::select! {
                        _ = interval.tick() => {}
                        _ = token.cancelled() => {
                            info!("sentinel scheduler shutting down");
                            return;
                        }
                    }
                } else {
                    interval.tick().await;
                }

                if let Err(err) = self.run_tick().await {
                    error!(error = %err, "sentinel scheduler tick failed");
                }
            }
        });
    }

    #[instrument(skip(self))]
    async fn run_tick(&self) -> Result<(), dns_sentinel_domain::DomainError> {
        self.maybe_announce_deployment().await?;

        let domains = self.all_domains().await?;
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));

        let checks = domains.iter().map(|fqdn| {
            let observer = Arc::clone(&self.observer);
            let semaphore = Arc::clone(&semaphore);
            let fqdn = fqdn.clone();
            async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                if let Err(err) = observer.check(&fqdn).await {
                    warn!(domain = %fqdn.as_str(), error = %err, "domain check failed");
                }
            }
        });
        join_all(checks).await;

        self.observer.publish_bot_status(domains.len()).await?;
        Ok(())
    }

    async fn all_domains(&self) -> Result<Vec<Fqdn>, dns_sentinel_domain::DomainError> {
        let dynamic = self.repo.dynamic_domains().await?;
        let mut seen: HashSet<Fqdn> = HashSet::new();
        let mut all = Vec::with_capacity(self.static_domains.len() + dynamic.len());
        for fqdn in self.static_domains.iter().chain(dynamic.iter()) {
            if seen.insert(fqdn.clone()) {
                all.push(fqdn.clone());
            }
        }
        Ok(all)
    }

    async fn maybe_announce_deployment(&self) -> Result<(), dns_sentinel_domain::DomainError> {
        let current = self.repo.version_id().await?;
        if current.as_deref() != Some(self.config.deployment_version.as_str()) {
            self.repo.set_version_id(&self.config.deployment_version).await?;
            if current.is_some() {
                self.observer.emit_deployment_notice(&self.config.deployment_version).await;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dns_sentinel_application::ports::{ARecord, Notifier, ResolveResult, Resolver};
    use dns_sentinel_application::repo::DomainStateRepo;
    use dns_sentinel_domain::{DomainError, Notification};
    use dns_sentinel_infrastructure::store::MemoryStore;
    use std::sync::Mutex;

    struct StubResolver;

    #[async_trait]
    impl Resolver for StubResolver {
        async fn resolve(&self, _fqdn: &Fqdn) -> Result<ResolveResult, DomainError> {
            Ok(ResolveResult {
                a_records: vec![ARecord { ip: "10.0.0.1".to_string(), ttl: 3600 }],
                soa: None,
                status: 0,
                no_authority: false,
                comments: Vec::new(),
            })
        }
    }

    struct RecordingNotifier {
        emitted: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self { emitted: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn emit(&self, notification: &Notification) -> Result<(), DomainError> {
            self.emitted.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    fn job(
        static_domains: Vec<Fqdn>,
        config: SchedulerConfig,
    ) -> (Arc<SentinelJob>, Arc<RecordingNotifier>, Arc<DomainStateRepo>) {
        let store = Arc::new(MemoryStore::new());
        let repo = Arc::new(DomainStateRepo::new(store));
        let resolver = Arc::new(StubResolver);
        let notifier = Arc::new(RecordingNotifier::new());
        let observer = Arc::new(Observer::new(repo.clone(), resolver, notifier.clone()));
        let job = Arc::new(SentinelJob::new(observer, repo.clone(), static_domains, config));
        (job, notifier, repo)
    }

    fn config() -> SchedulerConfig {
        SchedulerConfig {
            tick_secs: 60,
            concurrency: 4,
            deployment_version: "v1".to_string(),
        }
    }

    #[tokio::test]
    async fn tick_checks_union_of_static_and_dynamic_domains_without_duplicates() {
        let a = Fqdn::parse("a.example.com").unwrap();
        let b = Fqdn::parse("b.example.com").unwrap();
        let (job, _notifier, repo) = job(vec![a.clone(), b.clone()], config());
        repo.set_dynamic_domains(&[b.clone(), Fqdn::parse("c.example.com").unwrap()])
            .await
            .unwrap();

        let domains = job.all_domains().await.unwrap();
        assert_eq!(domains.len(), 3);

        job.run_tick().await.unwrap();
        let state = repo.load(&a).await.unwrap();
        assert_eq!(state.last_ips.to_csv(), "10.0.0.1");
    }

    #[tokio::test]
    async fn first_tick_records_version_silently() {
        let (job, notifier, repo) = job(Vec::new(), config());
        job.run_tick().await.unwrap();
        assert_eq!(repo.version_id().await.unwrap().as_deref(), Some("v1"));
        assert!(notifier.emitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deployment_version_change_emits_one_notice() {
        let (job, notifier, repo) = job(Vec::new(), config());
        repo.set_version_id("v0").await.unwrap();

        job.run_tick().await.unwrap();

        let emitted = notifier.emitted.lock().unwrap();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].title, "New Deployment Detected");
    }
}
