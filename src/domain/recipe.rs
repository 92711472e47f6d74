//! Recipes: nested declarations of the ingredients a document must carry

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A recipe for one document category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Path of the related-content file, relative to the project root
    #[serde(rename = "related_content")]
    pub related_content_path: PathBuf,
    #[serde(default)]
    pub body: Vec<Ingredient>,
}

/// Entry of a recipe body.
///
/// A group is a single-key mapping used only to organise recipes; its label
/// carries no meaning. Mappings with any other key count are kept as they
/// were written so the interpreter can report them. Entries of any other
/// shape land in `Invalid` instead of failing the whole recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ingredient {
    Leaf(String),
    Group(BTreeMap<String, Vec<Ingredient>>),
    Invalid(serde_yaml::Value),
}

impl Ingredient {
    pub fn leaf(spec: impl Into<String>) -> Self {
        Ingredient::Leaf(spec.into())
    }

    pub fn group(label: impl Into<String>, body: Vec<Ingredient>) -> Self {
        Ingredient::Group(BTreeMap::from([(label.into(), body)]))
    }
}

/// Where an ingredient lives in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Front matter key
    Meta,
    /// Prose structure checked by a handler
    Prose,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Meta => write!(f, "meta"),
            Family::Prose => write!(f, "prose"),
        }
    }
}

/// Parsed leaf ingredient: `family.name` with an optional trailing `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRef {
    pub family: Family,
    pub name: String,
    pub optional: bool,
}

impl IngredientRef {
    /// Parse `meta.title`, `prose.constructor?` and the like.
    ///
    /// Only the first `.` separates family from name.
    pub fn parse(spec: &str) -> Result<Self, DomainError> {
        let (family, rest) = spec.split_once('.').unwrap_or((spec, ""));
        let family = match family {
            "meta" => Family::Meta,
            "prose" => Family::Prose,
            other => {
                return Err(DomainError::UnknownIngredientType {
                    ingredient: spec.to_string(),
                    family: other.to_string(),
                })
            }
        };

        let (name, optional) = match rest.strip_suffix('?') {
            Some(name) => (name, true),
            None => (rest, false),
        };
        if name.is_empty() {
            return Err(DomainError::MissingIngredientName(spec.to_string()));
        }

        Ok(Self {
            family,
            name: name.to_string(),
            optional,
        })
    }
}

impl fmt::Display for IngredientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.family, self.name)?;
        if self.optional {
            write!(f, "?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("meta.title", Family::Meta, "title", false)]
    #[case("meta.browser_compatibility?", Family::Meta, "browser_compatibility", true)]
    #[case("prose.constructor", Family::Prose, "constructor", false)]
    #[case("prose.interactive_example?", Family::Prose, "interactive_example", true)]
    fn given_leaf_spec_when_parsing_then_splits_family_name_and_optionality(
        #[case] spec: &str,
        #[case] family: Family,
        #[case] name: &str,
        #[case] optional: bool,
    ) {
        let parsed = IngredientRef::parse(spec).unwrap();
        assert_eq!(parsed.family, family);
        assert_eq!(parsed.name, name);
        assert_eq!(parsed.optional, optional);
        assert_eq!(parsed.to_string(), spec);
    }

    #[test]
    fn given_unknown_family_when_parsing_then_reports_family() {
        let err = IngredientRef::parse("data.constructor").unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnknownIngredientType { ref family, .. } if family == "data"
        ));
    }

    #[test]
    fn given_missing_name_when_parsing_then_error() {
        assert!(matches!(
            IngredientRef::parse("meta.?"),
            Err(DomainError::MissingIngredientName(_))
        ));
        assert!(matches!(
            IngredientRef::parse("prose"),
            Err(DomainError::MissingIngredientName(_))
        ));
    }

    #[test]
    fn given_yaml_recipe_when_deserializing_then_groups_nest() {
        let yaml = r#"
related_content: /related_content/js.yaml
body:
  - meta.title
  - prose.short_description
  - class_constructor:
      - prose.constructor
      - prose.interactive_example?
  - meta.specifications
"#;
        let recipe: Recipe = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(recipe.related_content_path, PathBuf::from("/related_content/js.yaml"));
        assert_eq!(recipe.body.len(), 4);
        assert_eq!(
            recipe.body[2],
            Ingredient::group(
                "class_constructor",
                vec![
                    Ingredient::leaf("prose.constructor"),
                    Ingredient::leaf("prose.interactive_example?"),
                ]
            )
        );
    }

    #[test]
    fn given_multi_key_mapping_when_deserializing_then_kept_as_group() {
        let yaml = r#"
related_content: x.yaml
body:
  - a: [meta.title]
    b: [meta.tags]
"#;
        let recipe: Recipe = serde_yaml::from_str(yaml).unwrap();
        match &recipe.body[0] {
            Ingredient::Group(map) => assert_eq!(map.len(), 2),
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn given_malformed_entries_when_deserializing_then_kept_as_invalid() {
        let yaml = r#"
related_content: x.yaml
body:
  - meta.title
  - data: prose.constructor
  - 42
  - meta.summary
"#;
        let recipe: Recipe = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(recipe.body.len(), 4);
        assert_eq!(recipe.body[0], Ingredient::leaf("meta.title"));
        assert!(matches!(recipe.body[1], Ingredient::Invalid(_)));
        assert!(matches!(recipe.body[2], Ingredient::Invalid(_)));
        assert_eq!(recipe.body[3], Ingredient::leaf("meta.summary"));
    }
}
