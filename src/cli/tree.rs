//! `termtree` rendering of recipes and prose trees

use termtree::Tree;

use crate::domain::{Ingredient, Recipe, TreeNode};

const TEXT_PREVIEW: usize = 40;

pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeConvert for Ingredient {
    fn to_tree_string(&self) -> Tree<String> {
        match self {
            Ingredient::Leaf(spec) => Tree::new(spec.clone()),
            Ingredient::Group(group) => match group.iter().next() {
                Some((label, body)) if group.len() == 1 => {
                    Tree::new(label.clone()).with_leaves(body.iter().map(|i| i.to_tree_string()))
                }
                _ => {
                    let labels: Vec<&str> = group.keys().map(String::as_str).collect();
                    Tree::new(format!("<malformed group: {}>", labels.join(", ")))
                }
            },
            Ingredient::Invalid(value) => Tree::new(format!("<invalid entry: {:?}>", value)),
        }
    }
}

/// Recipe rendered under its name.
pub fn recipe_tree(name: &str, recipe: &Recipe) -> Tree<String> {
    Tree::new(format!("{} ({})", name, recipe.related_content_path.display()))
        .with_leaves(recipe.body.iter().map(|i| i.to_tree_string()))
}

impl TreeConvert for TreeNode {
    fn to_tree_string(&self) -> Tree<String> {
        let label = match self.as_text() {
            Some(value) => format!("{:?}", preview(value)),
            None => self.to_string(),
        };
        let leaves = self
            .children()
            .iter()
            .filter(|n| !n.is_whitespace_text())
            .map(|n| n.to_tree_string());
        Tree::new(label).with_leaves(leaves)
    }
}

fn preview(value: &str) -> String {
    let value = value.trim();
    match value.char_indices().nth(TEXT_PREVIEW) {
        Some((cut, _)) => format!("{}…", &value[..cut]),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{el, h, text};
    use std::path::PathBuf;

    #[test]
    fn given_recipe_with_group_when_rendering_then_nested_leaves() {
        let recipe = Recipe {
            related_content_path: PathBuf::from("related/js.yaml"),
            body: vec![
                Ingredient::leaf("meta.title"),
                Ingredient::group("data", vec![Ingredient::leaf("prose.constructor?")]),
            ],
        };
        let rendered = recipe_tree("javascript-class", &recipe).to_string();
        assert!(rendered.starts_with("javascript-class (related/js.yaml)"));
        assert!(rendered.contains("meta.title"));
        assert!(rendered.contains("data"));
        assert!(rendered.contains("prose.constructor?"));
    }

    #[test]
    fn given_prose_when_rendering_then_whitespace_text_skipped() {
        let tree = el("body", [h(2, "Syntax"), text("\n"), el("p", [text("Hello")])]);
        let rendered = tree.to_tree_string().to_string();
        assert!(rendered.contains("h2#Syntax"));
        assert!(rendered.contains("\"Hello\""));
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn given_long_text_when_previewing_then_truncated() {
        let long = "x".repeat(100);
        assert_eq!(preview(&long).chars().count(), TEXT_PREVIEW + 1);
    }
}
