//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::catalog::{self, DomainCatalog};
use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::generator::Generator;
use crate::layout::LayoutEngine;

/// Root application context for dependency injection.
///
/// The Context holds all shared dependencies and uses `#[derive(Context)]`
/// to generate `FromRef` implementations for each field, enabling
/// compile-time dependency resolution.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Application configuration.
    pub config: Arc<Config>,
    /// The active domain's vocabulary.
    pub catalog: Arc<DomainCatalog>,
    /// The expansion proposal source.
    pub generator: Arc<dyn Generator>,
    /// Layout engine tuned from the configuration.
    pub layout: LayoutEngine,
}

impl Context {
    /// Creates a context from the layered configuration on disk.
    pub fn from_env(generator: Arc<dyn Generator>) -> Result<Self, AppError> {
        Self::new(Config::load()?, generator)
    }

    /// Creates a context for the configured domain and the given generator.
    pub fn new(config: Config, generator: Arc<dyn Generator>) -> Result<Self, AppError> {
        let catalog = catalog::builtin(&config.domain.name)
            .ok_or_else(|| AppError::DomainNotFound(config.domain.name.clone()))?;
        let layout = LayoutEngine::new(config.layout.clone());
        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            generator,
            layout,
        })
    }
}
