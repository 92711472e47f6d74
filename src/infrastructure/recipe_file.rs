//! Recipe files: YAML documents holding `related_content` and `body`

use crate::domain::Recipe;

/// Recipe files are named after the recipe: `<recipes_dir>/<name>.yaml`.
pub const RECIPE_EXTENSION: &str = "yaml";

pub fn parse_recipe(yaml: &str) -> Result<Recipe, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ingredient;

    #[test]
    fn given_recipe_without_body_when_parsing_then_empty_body() {
        let recipe = parse_recipe("related_content: related.yaml\n").unwrap();
        assert!(recipe.body.is_empty());
    }

    #[test]
    fn given_recipe_missing_related_content_when_parsing_then_error() {
        assert!(parse_recipe("body:\n  - meta.title\n").is_err());
    }

    #[test]
    fn given_flow_style_group_when_parsing_then_group() {
        let recipe = parse_recipe("related_content: r.yaml\nbody:\n  - data: [prose.constructor]\n").unwrap();
        assert_eq!(
            recipe.body,
            vec![Ingredient::group("data", vec![Ingredient::leaf("prose.constructor")])]
        );
    }
}
