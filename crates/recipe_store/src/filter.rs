//! Recipe filter expressions.
//!
//! A [`RecipeFilter`] is a fully-formed, immutable value built up with
//! consuming `with_*` methods. Dimensions combine with implicit AND; an
//! unset dimension matches everything on that axis.

use entities::Recipe;
use uuid::Uuid;

/// Whether a multi-value constraint requires every supplied token (`All`)
/// or at least one (`Any`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The stored set must contain every supplied token.
    #[default]
    All,
    /// The stored set must intersect the supplied tokens.
    Any,
}

impl MatchMode {
    /// Maps the wire-level "any" flag onto a mode. The default is `All`.
    pub fn from_any_flag(any: bool) -> Self {
        if any { Self::Any } else { Self::All }
    }
}

/// A set-containment constraint over a normalized string field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConstraint {
    tokens: Vec<String>,
    mode: MatchMode,
}

impl TokenConstraint {
    /// An empty token list yields no constraint at all: the dimension is
    /// omitted rather than matched-against-empty.
    fn new(tokens: Vec<String>, mode: MatchMode) -> Option<Self> {
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens, mode })
        }
    }

    /// Returns true if the stored values satisfy this constraint. Both
    /// sides are expected to be normalized.
    pub fn matches(&self, stored: &[String]) -> bool {
        match self.mode {
            MatchMode::All => self.tokens.iter().all(|t| stored.contains(t)),
            MatchMode::Any => self.tokens.iter().any(|t| stored.contains(t)),
        }
    }

    /// The constraint's tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The constraint's match mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}

/// A composable filter over the recipe collection.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Ingredient constraint, if any.
    pub ingredients: Option<TokenConstraint>,
    /// Tag constraint, if any.
    pub tags: Option<TokenConstraint>,
    /// Exact creator constraint, if any.
    pub created_by: Option<Uuid>,
}

impl RecipeFilter {
    /// Creates an unconstrained filter (matches every recipe).
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains on ingredients. An empty token list is inert: the mode
    /// flag alone never creates a constraint.
    pub fn with_ingredients(mut self, tokens: Vec<String>, mode: MatchMode) -> Self {
        self.ingredients = TokenConstraint::new(tokens, mode);
        self
    }

    /// Constrains on tags. An empty token list is inert.
    pub fn with_tags(mut self, tokens: Vec<String>, mode: MatchMode) -> Self {
        self.tags = TokenConstraint::new(tokens, mode);
        self
    }

    /// Constrains on the exact creator reference.
    pub fn with_created_by(mut self, creator: Uuid) -> Self {
        self.created_by = Some(creator);
        self
    }

    /// Returns true when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_none() && self.tags.is_none() && self.created_by.is_none()
    }

    /// Evaluates the filter against a recipe. All supplied dimensions must
    /// hold simultaneously.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(constraint) = &self.ingredients {
            if !constraint.matches(&recipe.ingredients) {
                return false;
            }
        }
        if let Some(constraint) = &self.tags {
            if !constraint.matches(&recipe.tags) {
                return false;
            }
        }
        if let Some(creator) = self.created_by {
            if recipe.created_by != creator {
                return false;
            }
        }
        true
    }
}
