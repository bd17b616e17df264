//! Recipe feasibility against detected item counts.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::matching::VocabularyItem;

/// One required ingredient of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub item: VocabularyItem,
    pub required: u32,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, required: u32) -> Self {
        Self {
            item: VocabularyItem::new(name),
            required,
        }
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }
}

/// A named dish and the ingredients it consumes, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, ingredients: Vec<Ingredient>) -> Self {
        Self {
            name: name.into(),
            ingredients,
        }
    }
}

/// How far one ingredient is from being covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortage {
    pub name: String,
    pub required: u32,
    /// Zero when the detected count already covers `required`.
    pub missing: u32,
}

/// A recipe that cannot be made, with every ingredient's shortage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unmakable<'a> {
    pub recipe: &'a Recipe,
    pub shortages: Vec<Shortage>,
}

impl Unmakable<'_> {
    /// Shortages keyed by ingredient name.
    pub fn shortages_by_name(&self) -> IndexMap<&str, u32> {
        self.shortages
            .iter()
            .map(|s| (s.name.as_str(), s.missing))
            .collect()
    }
}

/// Recipes split into makable and unmakable, each in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Feasibility<'a> {
    pub makable: Vec<&'a Recipe>,
    pub unmakable: Vec<Unmakable<'a>>,
}

fn count_of(item_counts: &IndexMap<String, u32>, name: &str) -> u32 {
    item_counts.get(name).copied().unwrap_or(0)
}

/// True when every ingredient is covered. Missing items count as zero.
pub fn is_makable(item_counts: &IndexMap<String, u32>, recipe: &Recipe) -> bool {
    recipe
        .ingredients
        .iter()
        .all(|ing| count_of(item_counts, ing.name()) >= ing.required)
}

/// Partitions `recipes` by whether `item_counts` covers them.
pub fn evaluate<'a>(item_counts: &IndexMap<String, u32>, recipes: &'a [Recipe]) -> Feasibility<'a> {
    let mut out = Feasibility::default();
    for recipe in recipes {
        if is_makable(item_counts, recipe) {
            debug!(recipe = %recipe.name, "makable");
            out.makable.push(recipe);
            continue;
        }
        let shortages: Vec<Shortage> = recipe
            .ingredients
            .iter()
            .map(|ing| Shortage {
                name: ing.name().to_string(),
                required: ing.required,
                missing: ing.required.saturating_sub(count_of(item_counts, ing.name())),
            })
            .collect();
        debug!(
            recipe = %recipe.name,
            missing = shortages.iter().map(|s| s.missing).sum::<u32>(),
            "unmakable"
        );
        out.unmakable.push(Unmakable { recipe, shortages });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u32)]) -> IndexMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn covered_recipe_is_makable() {
        let recipes = vec![Recipe::new(
            "ニンジャカレー",
            vec![Ingredient::new("ワカクサ大豆", 24), Ingredient::new("あじわいキノコ", 9)],
        )];
        let result = evaluate(&counts(&[("ワカクサ大豆", 30), ("あじわいキノコ", 9)]), &recipes);
        assert_eq!(result.makable.len(), 1);
        assert!(result.unmakable.is_empty());
    }

    #[test]
    fn partial_cover_lists_every_ingredient() {
        let recipes = vec![Recipe::new(
            "R",
            vec![Ingredient::new("A", 2), Ingredient::new("B", 1)],
        )];
        let result = evaluate(&counts(&[("A", 2), ("B", 0)]), &recipes);
        assert!(result.makable.is_empty());
        let un = &result.unmakable[0];
        let by_name = un.shortages_by_name();
        assert_eq!(by_name.get("A"), Some(&0));
        assert_eq!(by_name.get("B"), Some(&1));
        assert_eq!(un.shortages[1].required, 1);
    }

    #[test]
    fn absent_item_counts_as_zero() {
        let recipes = vec![Recipe::new("R", vec![Ingredient::new("C", 3)])];
        let result = evaluate(&IndexMap::new(), &recipes);
        assert_eq!(result.unmakable[0].shortages_by_name().get("C"), Some(&3));
    }

    #[test]
    fn zero_requirement_is_satisfied_by_absence() {
        let recipes = vec![Recipe::new("R", vec![Ingredient::new("C", 0)])];
        assert!(is_makable(&IndexMap::new(), &recipes[0]));
    }

    #[test]
    fn recipe_without_ingredients_is_makable() {
        let recipes = vec![Recipe::new("ごはん", vec![])];
        assert_eq!(evaluate(&IndexMap::new(), &recipes).makable.len(), 1);
    }
}
