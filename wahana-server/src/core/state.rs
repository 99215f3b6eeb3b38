//! Shared server state

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use super::config::Config;
use super::tasks::{BackgroundTasks, TaskKind};
use crate::db::DbService;
use crate::notify::{LogNotifier, NotifyService};
use crate::payment::gateway::{DisabledGateway, HostedGateway, PaymentGateway};

/// Shared application state, cheap to clone into handlers
#[derive(Clone)]
pub struct ServerState {
    pub pool: SqlitePool,
    pub gateway: Arc<dyn PaymentGateway>,
    pub notify: NotifyService,
    tasks: Arc<Mutex<Option<BackgroundTasks>>>,
}

impl ServerState {
    /// Connect the database, build services and start background workers
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::connect(&config.database_url).await?;

        let gateway: Arc<dyn PaymentGateway> = match &config.gateway_secret_key {
            Some(secret) => Arc::new(HostedGateway::new(
                config.gateway_api_url.clone(),
                secret.clone(),
                config.public_base_url.clone(),
            )),
            None => {
                tracing::warn!("GATEWAY_SECRET_KEY not set, hosted payments disabled");
                Arc::new(DisabledGateway)
            }
        };

        let mut tasks = BackgroundTasks::new();

        let (notify, notify_worker) =
            NotifyService::start(Arc::new(LogNotifier), tasks.shutdown_token());
        tasks.spawn("notify_worker", TaskKind::Worker, notify_worker);

        let sweep_pool = db.pool().clone();
        let sweep_notify = notify.clone();
        let sweep_token = tasks.shutdown_token();
        tasks.spawn("expiry_sweep", TaskKind::Periodic, async move {
            crate::orders::expiry::run_sweep_loop(sweep_pool, sweep_notify, sweep_token).await;
        });

        Ok(Self {
            pool: db.into_pool(),
            gateway,
            notify,
            tasks: Arc::new(Mutex::new(Some(tasks))),
        })
    }

    /// Build a state over an existing pool with no gateway and no background
    /// workers, for tests
    pub fn for_tests(pool: SqlitePool) -> Self {
        let (notify, worker) = NotifyService::start(
            Arc::new(LogNotifier),
            tokio_util::sync::CancellationToken::new(),
        );
        tokio::spawn(worker);
        Self {
            pool,
            gateway: Arc::new(DisabledGateway),
            notify,
            tasks: Arc::new(Mutex::new(None)),
        }
    }

    /// Stop background workers, draining pending notifications
    pub async fn shutdown(&self) {
        if let Some(tasks) = self.tasks.lock().await.take() {
            tasks.shutdown().await;
        }
    }
}
