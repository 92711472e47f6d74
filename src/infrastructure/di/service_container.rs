//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::ContentService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Document checking
    pub content: ContentService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, project_root: PathBuf) -> Self {
        Self::with_deps(settings, project_root, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, project_root: PathBuf, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let content = ContentService::new(fs.clone(), settings.clone(), project_root);

        Self {
            settings,
            fs,
            content,
        }
    }
}
