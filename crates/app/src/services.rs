//! Shared service graph built once at startup.

use std::sync::Arc;

use anyhow::Context;
use orgdir_auth::CredentialStore;
use orgdir_directory::{
    CompanyDirectory, EmployeeRepository, FixedColorScheme, HeadlessRoot, ThemeApplier, ThemeBus,
    ThemePreference,
};
use orgdir_storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, Latency, TokioLatency};

use crate::config::{AppConfig, StorageBackend};
use crate::router::Router;

/// Every store the presentation layer talks to, sharing one storage backend.
pub struct AppServices {
    pub storage: Arc<dyn KeyValueStore>,
    pub companies: CompanyDirectory,
    pub credentials: Arc<CredentialStore>,
    pub employees: Arc<EmployeeRepository>,
    pub theme_bus: Arc<ThemeBus>,
    pub theme: Arc<ThemePreference>,
    pub theme_applier: Arc<ThemeApplier>,
    pub root: Arc<HeadlessRoot>,
    pub router: Router<Arc<CredentialStore>>,
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("employees", &self.employees)
            .field("credentials", &self.credentials)
            .field("theme", &self.theme)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

impl AppServices {
    /// Initialize logging, then build the services. Intended for binaries.
    pub fn bootstrap(config: &AppConfig) -> anyhow::Result<Self> {
        orgdir_observability::init();
        Self::build(config)
    }

    pub fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn KeyValueStore> = match &config.storage {
            StorageBackend::Memory => InMemoryKeyValueStore::arc(),
            StorageBackend::File(dir) => Arc::new(
                FileKeyValueStore::open(dir)
                    .with_context(|| format!("failed to open data directory {}", dir.display()))?,
            ),
        };
        Self::with_storage(storage, config)
    }

    /// Build over an existing backend (shared between several instances in tests).
    pub fn with_storage(storage: Arc<dyn KeyValueStore>, config: &AppConfig) -> anyhow::Result<Self> {
        Self::with_latency(storage, Arc::new(TokioLatency), config)
    }

    /// Build over an existing backend with an explicit repository clock.
    pub fn with_latency(
        storage: Arc<dyn KeyValueStore>,
        latency: Arc<dyn Latency>,
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        let employees = EmployeeRepository::open(storage.clone(), latency, config.latency)
            .context("failed to open employee repository")?;
        let credentials = Arc::new(CredentialStore::new(storage.clone()));

        // The applier must subscribe before the preference publishes its initial value.
        let theme_bus = Arc::new(ThemeBus::new());
        let root = Arc::new(HeadlessRoot::new());
        let theme_applier = ThemeApplier::subscribe(&theme_bus, storage.clone(), root.clone());
        let theme = ThemePreference::initialize(
            &*storage,
            &FixedColorScheme(config.prefers_dark),
            theme_bus.clone(),
        );
        theme_applier.apply_pending();

        let router = Router::new(credentials.clone());

        let backend = match config.storage {
            StorageBackend::Memory => "memory",
            StorageBackend::File(_) => "file",
        };
        tracing::info!(backend, dark = theme.is_dark_mode(), "services ready");

        Ok(Self {
            storage,
            companies: CompanyDirectory::new(),
            credentials,
            employees: Arc::new(employees),
            theme_bus,
            theme: Arc::new(theme),
            theme_applier: Arc::new(theme_applier),
            root,
            router,
        })
    }

    /// Change the dark-mode flag and apply it immediately.
    pub fn set_dark_mode(&self, dark: bool) {
        self.theme.set_dark_mode(dark);
        self.theme_applier.apply_pending();
    }
}
