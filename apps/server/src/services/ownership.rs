//! Recipe ownership checks.

use entities::Recipe;
use uuid::Uuid;

/// Returns true if `caller` is the recipe's recorded creator.
///
/// Both sides are compared in one canonical form (`Uuid`). Every mutation
/// path goes through this helper; no route compares creator references
/// inline.
pub fn is_owner(recipe: &Recipe, caller: Uuid) -> bool {
    recipe.created_by == caller
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(creator: Uuid) -> Recipe {
        Recipe::new("t", "d", vec!["x".to_string()], "i", creator)
    }

    #[test]
    fn test_owner_is_allowed() {
        let creator = Uuid::new_v4();
        assert!(is_owner(&recipe(creator), creator));
    }

    #[test]
    fn test_non_owner_is_rejected() {
        let recipe = recipe(Uuid::new_v4());
        assert!(!is_owner(&recipe, Uuid::new_v4()));
    }
}
