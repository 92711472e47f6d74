//! Content service
//!
//! Finds documents under the content directory, pairs each with the recipe
//! named in its front matter and runs the recipe interpreter over it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::handlers::{HandlerContext, HandlerRegistry};
use crate::application::services::RecipeInterpreter;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt, MacroClassifier, Reporter};
use crate::config::Settings;
use crate::domain::{Document, Finding, Metadata, Recipe, Severity};
use crate::infrastructure::frontmatter::{parse_metadata, split_front_matter};
use crate::infrastructure::markdown::parse_prose;
use crate::infrastructure::recipe_file::{parse_recipe, RECIPE_EXTENSION};
use crate::infrastructure::traits::FileSystem;
use crate::util::path::is_named;

/// Findings for one checked document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
}

impl DocumentReport {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// True when any finding has fail severity.
    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Fail)
    }
}

/// Service checking documents against their recipes.
pub struct ContentService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    project_root: PathBuf,
    registry: HandlerRegistry,
    classifier: MacroClassifier,
}

impl ContentService {
    /// Create a content service rooted at `project_root`.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>, project_root: PathBuf) -> Self {
        let classifier = MacroClassifier::new(settings.admonition_classes.clone());
        Self {
            fs,
            settings,
            project_root,
            registry: HandlerRegistry::builtin(),
            classifier,
        }
    }

    /// Replace the handler registry.
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn content_dir(&self) -> PathBuf {
        self.project_root.join(&self.settings.content_dir)
    }

    pub fn recipes_dir(&self) -> PathBuf {
        self.project_root.join(&self.settings.recipes_dir)
    }

    /// All documents below the content directory, sorted by path.
    #[instrument(level = "debug", skip(self))]
    pub fn discover(&self) -> ApplicationResult<Vec<PathBuf>> {
        let dir = self.content_dir();
        if !self.fs.is_dir(&dir) {
            return Err(ApplicationError::ContentDirNotFound(dir));
        }

        let mut documents: Vec<PathBuf> = walkdir::WalkDir::new(&dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| is_named(e.path(), &self.settings.document_file_name))
            .map(|e| e.into_path())
            .collect();
        documents.sort();

        info!("discovered {} documents in {}", documents.len(), dir.display());
        Ok(documents)
    }

    /// Load `<recipes_dir>/<name>.yaml`.
    pub fn load_recipe(&self, name: &str) -> ApplicationResult<Recipe> {
        let path = self
            .recipes_dir()
            .join(format!("{}.{}", name, RECIPE_EXTENSION));
        if !self.fs.is_file(&path) {
            return Err(ApplicationError::RecipeNotFound(path));
        }
        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read recipe", &path)?;
        parse_recipe(&content).with_path_context("parse recipe", &path)
    }

    /// Load a document; malformed front matter is an error.
    pub fn load_document(&self, path: &Path) -> ApplicationResult<Document> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;
        let (doc, error) = parse_document(&content);
        match error {
            Some(e) => Err(e).with_path_context("parse front matter", path),
            None => Ok(doc),
        }
    }

    /// Check one document against the recipe its front matter names.
    #[instrument(level = "debug", skip(self))]
    pub fn check_document(&self, path: &Path) -> ApplicationResult<DocumentReport> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;
        let (doc, front_matter_error) = parse_document(&content);

        let mut reporter = Reporter::new();
        if let Some(e) = front_matter_error {
            reporter.fail(
                &doc.prose,
                format!("Invalid front matter: {}", e),
                "invalid-front-matter",
            );
        }

        match doc.recipe_name() {
            None => reporter.fail(&doc.prose, "Document does not name a recipe", "missing-recipe"),
            Some(name) => match self.load_recipe(name) {
                Ok(recipe) => {
                    self.check_related_content(&doc, &recipe, &mut reporter);
                    self.interpreter().check(&doc, &recipe, &mut reporter);
                }
                Err(ApplicationError::RecipeNotFound(recipe_path)) => reporter.fail(
                    &doc.prose,
                    format!("Recipe not found: {}", recipe_path.display()),
                    "recipe-not-found",
                ),
                Err(ApplicationError::OperationFailed { context, source }) => reporter.fail(
                    &doc.prose,
                    format!("Invalid recipe: {}: {}", context, source),
                    "invalid-recipe",
                ),
                Err(e) => return Err(e),
            },
        }

        debug!("{}: {} findings", path.display(), reporter.len());
        Ok(DocumentReport {
            path: path.to_path_buf(),
            findings: reporter.into_findings(),
        })
    }

    /// Check documents in parallel; reports keep the order of `paths`.
    #[instrument(level = "debug", skip_all, fields(documents = paths.len()))]
    pub fn check_all(&self, paths: &[PathBuf]) -> ApplicationResult<Vec<DocumentReport>> {
        paths
            .par_iter()
            .map(|path| self.check_document(path))
            .collect()
    }

    fn interpreter(&self) -> RecipeInterpreter<'_> {
        RecipeInterpreter::new(
            &self.registry,
            HandlerContext {
                classifier: &self.classifier,
                interactive_example_macro: &self.settings.interactive_example_macro,
            },
        )
    }

    fn check_related_content(&self, doc: &Document, recipe: &Recipe, reporter: &mut Reporter) {
        let related = self.project_root.join(&recipe.related_content_path);
        if !self.fs.exists(&related) {
            reporter.fail(
                &doc.prose,
                format!("Related content not found: {}", recipe.related_content_path.display()),
                "related-content-missing",
            );
        }
    }
}

/// Split and parse a document file. A front matter parse error is returned
/// alongside a document with empty metadata.
fn parse_document(content: &str) -> (Document, Option<serde_yaml::Error>) {
    let (front_matter, prose) = split_front_matter(content);
    let prose = parse_prose(prose);
    match front_matter.map(parse_metadata).transpose() {
        Ok(metadata) => (Document::new(metadata.unwrap_or_default(), prose), None),
        Err(e) => (Document::new(Metadata::new(), prose), Some(e)),
    }
}
