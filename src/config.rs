//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/recipe-lint/recipe-lint.toml`
//! 3. Project config: `<project_dir>/.recipe-lint.toml`
//! 4. Environment variables: `RECIPE_LINT_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub content_dir: Option<PathBuf>,
    pub recipes_dir: Option<PathBuf>,
    pub document_file_name: Option<String>,
    pub interactive_example_macro: Option<String>,
    pub admonition_classes: Option<Vec<String>>,
}

/// Unified configuration for recipe-lint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root walked for documents, relative to the project directory
    pub content_dir: PathBuf,
    /// Directory holding `<recipe>.yaml` files, relative to the project directory
    pub recipes_dir: PathBuf,
    /// File name identifying a document
    pub document_file_name: String,
    /// Macro that embeds an interactive example
    pub interactive_example_macro: String,
    /// Classes marking an element as an admonition
    pub admonition_classes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            recipes_dir: PathBuf::from("recipes"),
            document_file_name: "docs.md".into(),
            interactive_example_macro: "EmbedInteractiveExample".into(),
            admonition_classes: vec!["note".into(), "warning".into(), "notecard".into()],
        }
    }
}

/// Get the XDG config directory for recipe-lint.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "recipe-lint").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("recipe-lint.toml"))
}

/// Get the path to the project config file.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".recipe-lint.toml")
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
    /// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // Convert to sorted Vec for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.content_dir = PathBuf::from(expand_env_vars(&self.content_dir.to_string_lossy()));
        self.recipes_dir = PathBuf::from(expand_env_vars(&self.recipes_dir.to_string_lossy()));
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            admonition_classes: global
                .admonition_classes
                .clone()
                .unwrap_or_else(|| self.admonition_classes.clone()),
            ..self.overlay_scalars(global)
        }
    }

    /// Merge project config onto self with UNION semantics for arrays.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            admonition_classes: overlay
                .admonition_classes
                .as_ref()
                .map(|o| Self::merge_array(&self.admonition_classes, o))
                .unwrap_or_else(|| self.admonition_classes.clone()),
            ..self.overlay_scalars(overlay)
        }
    }

    /// Scalar options: overlay wins if Some, otherwise keep self.
    fn overlay_scalars(&self, overlay: &RawSettings) -> Self {
        Self {
            content_dir: overlay
                .content_dir
                .clone()
                .unwrap_or_else(|| self.content_dir.clone()),
            recipes_dir: overlay
                .recipes_dir
                .clone()
                .unwrap_or_else(|| self.recipes_dir.clone()),
            document_file_name: overlay
                .document_file_name
                .clone()
                .unwrap_or_else(|| self.document_file_name.clone()),
            interactive_example_macro: overlay
                .interactive_example_macro
                .clone()
                .unwrap_or_else(|| self.interactive_example_macro.clone()),
            admonition_classes: self.admonition_classes.clone(),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for the local config
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Project: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(project) = project_dir {
            let local_path = project_config_path(project);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply RECIPE_LINT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("RECIPE_LINT")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("admonition_classes")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("content_dir") {
            settings.content_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("recipes_dir") {
            settings.recipes_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("document_file_name") {
            settings.document_file_name = val;
        }
        if let Ok(val) = config.get_string("interactive_example_macro") {
            settings.interactive_example_macro = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("admonition_classes") {
            settings.admonition_classes = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
