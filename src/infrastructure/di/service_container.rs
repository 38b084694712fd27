//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{
    CatalogService, DomainService, DropletService, ImageService, KeyService,
};
use crate::config::Settings;
use crate::domain::Credentials;
use crate::infrastructure::client::ApiClient;
use crate::infrastructure::traits::{
    CommandRunner, FileSystem, HttpTransport, Prompter, RealCommandRunner, RealFileSystem,
    ReqwestTransport, StdinPrompter,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Interactive prompt abstraction
    pub prompter: Arc<dyn Prompter>,

    pub droplets: DropletService,
    pub domains: DomainService,
    pub keys: KeyService,
    pub images: ImageService,
    pub catalog: CatalogService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, credentials: Credentials) -> Self {
        Self::with_deps(
            settings,
            credentials,
            Arc::new(ReqwestTransport::new()),
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
            Arc::new(StdinPrompter),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        credentials: Credentials,
        transport: Arc<dyn HttpTransport>,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let client = Arc::new(ApiClient::new(
            settings.base_url.clone(),
            credentials,
            transport,
        ));
        let settings = Arc::new(settings);

        Self {
            droplets: DropletService::new(Arc::clone(&client)),
            domains: DomainService::new(Arc::clone(&client)),
            keys: KeyService::new(Arc::clone(&client)),
            images: ImageService::new(Arc::clone(&client)),
            catalog: CatalogService::new(client),
            settings,
            fs,
            cmd,
            prompter,
        }
    }
}
