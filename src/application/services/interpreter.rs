//! Recipe interpreter
//!
//! Walks a recipe's ingredient list depth-first and checks each leaf against
//! one document: `meta` leaves against the front matter, `prose` leaves via
//! the handler registry. Schema errors are reported and skipped so one bad
//! entry never hides the rest of the pass.

use tracing::{debug, instrument, warn};

use crate::application::handlers::{HandlerContext, HandlerRegistry};
use crate::application::Reporter;
use crate::domain::{Document, DomainError, Family, Ingredient, IngredientRef, Recipe, Severity};

pub struct RecipeInterpreter<'r> {
    registry: &'r HandlerRegistry,
    context: HandlerContext<'r>,
}

impl<'r> RecipeInterpreter<'r> {
    pub fn new(registry: &'r HandlerRegistry, context: HandlerContext<'r>) -> Self {
        Self { registry, context }
    }

    /// Check `doc` against every ingredient of `recipe`.
    #[instrument(level = "debug", skip_all, fields(ingredients = recipe.body.len()))]
    pub fn check(&self, doc: &Document, recipe: &Recipe, reporter: &mut Reporter) {
        self.test_ingredients(doc, &recipe.body, reporter);
    }

    /// Depth-first walk over `ingredients`; groups are transparent.
    pub fn test_ingredients(&self, doc: &Document, ingredients: &[Ingredient], reporter: &mut Reporter) {
        for ingredient in ingredients {
            match ingredient {
                Ingredient::Leaf(spec) => match IngredientRef::parse(spec) {
                    Ok(leaf) => self.test_leaf(doc, &leaf, reporter),
                    Err(e) => self.schema_error(doc, e, reporter),
                },
                Ingredient::Group(group) => {
                    let mut entries = group.iter();
                    match (entries.next(), entries.next()) {
                        (Some((label, body)), None) => {
                            debug!("group: {}", label);
                            self.test_ingredients(doc, body, reporter);
                        }
                        _ => {
                            let e = DomainError::MalformedGroup {
                                keys: group.len(),
                                labels: group.keys().cloned().collect(),
                            };
                            self.schema_error(doc, e, reporter);
                        }
                    }
                }
                Ingredient::Invalid(value) => {
                    let e = DomainError::InvalidEntry(format!("{:?}", value));
                    self.schema_error(doc, e, reporter);
                }
            }
        }
    }

    fn test_leaf(&self, doc: &Document, leaf: &IngredientRef, reporter: &mut Reporter) {
        match leaf.family {
            Family::Meta => self.test_meta_ingredient(doc, leaf, reporter),
            Family::Prose => self.test_prose_ingredient(doc, leaf, reporter),
        }
    }

    /// Front matter ingredient: mandatory ones must be present and non-null.
    fn test_meta_ingredient(&self, doc: &Document, leaf: &IngredientRef, reporter: &mut Reporter) {
        let present = doc
            .metadata
            .get(&leaf.name)
            .map(|value| !value.is_null())
            .unwrap_or(false);
        debug!("{}: present={}", leaf, present);

        if !present && !leaf.optional {
            reporter.fail(
                &doc.prose,
                format!("Missing mandatory ingredient: {}", leaf.name),
                "missing-meta-ingredient",
            );
        }
    }

    /// Prose ingredient: run its handler. For optional ingredients the
    /// handler's "expected but absent" findings are dropped; malformed
    /// content is still reported.
    fn test_prose_ingredient(&self, doc: &Document, leaf: &IngredientRef, reporter: &mut Reporter) {
        let Some(handler) = self.registry.resolve(&leaf.name) else {
            self.schema_error(doc, DomainError::UnknownProseIngredient(leaf.name.clone()), reporter);
            return;
        };

        let mut scratch = Reporter::new();
        let outcome = handler(&doc.prose, &mut scratch, &self.context);
        debug!("{}: {:?}", leaf, outcome);

        let findings = scratch
            .into_findings()
            .into_iter()
            .filter(|f| !(leaf.optional && f.severity == Severity::Expected));
        reporter.extend(findings);
    }

    fn schema_error(&self, doc: &Document, error: DomainError, reporter: &mut Reporter) {
        warn!("recipe error: {}", error);
        reporter.fail(&doc.prose, error.to_string(), error.code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::MacroClassifier;
    use crate::domain::{Metadata, TreeNode};
    use crate::util::testing::{el, h, text};
    use std::path::PathBuf;

    fn doc(keys: &[(&str, serde_yaml::Value)], prose: TreeNode) -> Document {
        let mut metadata = Metadata::new();
        for (k, v) in keys {
            metadata.insert(k.to_string(), v.clone());
        }
        Document::new(metadata, prose)
    }

    fn recipe(body: Vec<Ingredient>) -> Recipe {
        Recipe {
            related_content_path: PathBuf::from("related.yaml"),
            body,
        }
    }

    fn run(doc: &Document, recipe: &Recipe) -> Vec<String> {
        let registry = HandlerRegistry::builtin();
        let classifier = MacroClassifier::default();
        let interpreter = RecipeInterpreter::new(
            &registry,
            HandlerContext {
                classifier: &classifier,
                interactive_example_macro: "EmbedInteractiveExample",
            },
        );
        let mut reporter = Reporter::new();
        interpreter.check(doc, recipe, &mut reporter);
        reporter.into_findings().into_iter().map(|f| f.code).collect()
    }

    #[test]
    fn given_present_mandatory_meta_when_checking_then_no_findings() {
        let d = doc(
            &[("title", "Array".into()), ("tags", "js".into())],
            el("body", []),
        );
        let r = recipe(vec![Ingredient::leaf("meta.title"), Ingredient::leaf("meta.tags")]);
        assert!(run(&d, &r).is_empty());
    }

    #[test]
    fn given_absent_mandatory_meta_when_checking_then_exactly_one_finding() {
        let d = doc(&[], el("body", []));
        let r = recipe(vec![Ingredient::leaf("meta.title")]);
        assert_eq!(run(&d, &r), vec!["missing-meta-ingredient"]);
    }

    #[test]
    fn given_null_mandatory_meta_when_checking_then_reported() {
        let d = doc(&[("title", serde_yaml::Value::Null)], el("body", []));
        let r = recipe(vec![Ingredient::leaf("meta.title")]);
        assert_eq!(run(&d, &r), vec!["missing-meta-ingredient"]);
    }

    #[test]
    fn given_absent_optional_meta_when_checking_then_no_findings() {
        let d = doc(&[], el("body", []));
        let r = recipe(vec![Ingredient::leaf("meta.browser_compatibility?")]);
        assert!(run(&d, &r).is_empty());
    }

    #[test]
    fn given_nested_groups_when_checking_then_recurses_transparently() {
        let d = doc(&[("title", "x".into())], el("body", []));
        let r = recipe(vec![Ingredient::group(
            "outer",
            vec![Ingredient::group(
                "inner",
                vec![Ingredient::leaf("meta.title"), Ingredient::leaf("meta.summary")],
            )],
        )]);
        assert_eq!(run(&d, &r), vec!["missing-meta-ingredient"]);
    }

    #[test]
    fn given_schema_errors_when_checking_then_reported_and_walk_continues() {
        let d = doc(&[], el("body", []));
        let mut two_keys = std::collections::BTreeMap::new();
        two_keys.insert("a".to_string(), vec![Ingredient::leaf("meta.a")]);
        two_keys.insert("b".to_string(), vec![Ingredient::leaf("meta.b")]);
        let r = recipe(vec![
            Ingredient::leaf("data.constructor"),
            Ingredient::Group(two_keys),
            Ingredient::leaf("prose.not_a_handler"),
            Ingredient::leaf("meta.title"),
        ]);
        assert_eq!(
            run(&d, &r),
            vec![
                "unknown-ingredient-type",
                "malformed-ingredient-group",
                "unknown-prose-ingredient",
                "missing-meta-ingredient",
            ]
        );
    }

    #[test]
    fn given_prose_ingredient_when_checking_then_handler_runs_on_prose() {
        let d = doc(&[], el("body", [el("p", [text("no constructor heading")])]));
        let r = recipe(vec![Ingredient::leaf("prose.constructor")]);
        assert_eq!(run(&d, &r), vec!["expected-heading"]);
    }

    #[test]
    fn given_optional_prose_ingredient_absent_when_checking_then_silent() {
        let d = doc(&[], el("body", [el("p", [text("x")])]));
        let r = recipe(vec![Ingredient::leaf("prose.constructor?")]);
        assert!(run(&d, &r).is_empty());
    }

    #[test]
    fn given_optional_prose_ingredient_malformed_when_checking_then_reported() {
        let d = doc(
            &[],
            el(
                "body",
                [
                    h(2, "Constructor"),
                    el("dl", [el("dt", [el("code", [text("Foo()")])]), el("dd", [text("short")])]),
                ],
            ),
        );
        let r = recipe(vec![Ingredient::leaf("prose.constructor?")]);
        assert_eq!(run(&d, &r), vec!["constructor-description-at-least-three-nodes"]);
    }

    #[test]
    fn given_malformed_entry_between_leaves_when_checking_then_both_leaves_checked() {
        let d = doc(&[], el("body", []));
        let r: Recipe = serde_yaml::from_str(
            "related_content: r.yaml\nbody:\n  - meta.title\n  - data: prose.constructor\n  - meta.summary\n",
        )
        .unwrap();
        assert_eq!(
            run(&d, &r),
            vec![
                "missing-meta-ingredient",
                "malformed-ingredient-group",
                "missing-meta-ingredient",
            ]
        );
    }
}
