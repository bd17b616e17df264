//! Static catalog of foods and dishes.
//!
//! The catalog is usually split over two JSON documents, one holding
//! `foods` and one holding the dish lists (`salad`, `desert`, `curry`).
//! Loading several documents applies them in order; a list present in a
//! later document replaces the same list from an earlier one.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScanError};
use crate::matching::VocabularyItem;
use crate::recipe::{Ingredient, Recipe};

/// A food entry; inside a dish `num` is the required count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub name: String,
    #[serde(default)]
    pub num: u32,
    #[serde(default)]
    pub energy: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    #[serde(default)]
    pub recipe: Vec<Food>,
}

impl Dish {
    pub fn to_recipe(&self) -> Recipe {
        Recipe::new(
            self.name.clone(),
            self.recipe
                .iter()
                .map(|f| Ingredient::new(f.name.clone(), f.num))
                .collect(),
        )
    }
}

/// Dish category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salad,
    Curry,
    Dessert,
}

impl Category {
    /// Report order when every category is requested.
    pub const ALL: [Category; 3] = [Category::Salad, Category::Curry, Category::Dessert];

    /// Name shown to users and looked for in request text.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Salad => "サラダ",
            Category::Curry => "カレー",
            Category::Dessert => "デザート",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub foods: Vec<Food>,
    #[serde(default)]
    pub salad: Vec<Dish>,
    #[serde(default)]
    pub desert: Vec<Dish>,
    #[serde(default)]
    pub curry: Vec<Dish>,
}

/// One document; `None` means the list is absent rather than empty.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    foods: Option<Vec<Food>>,
    salad: Option<Vec<Dish>>,
    desert: Option<Vec<Dish>>,
    curry: Option<Vec<Dish>>,
}

impl Catalog {
    /// Parses a single catalog document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut catalog = Catalog::default();
        catalog.apply_json(json)?;
        Ok(catalog)
    }

    /// Overlays the lists present in `json` onto this catalog.
    pub fn apply_json(&mut self, json: &str) -> Result<()> {
        let file: CatalogFile = serde_json::from_str(json)?;
        if let Some(foods) = file.foods {
            self.foods = foods;
        }
        if let Some(salad) = file.salad {
            self.salad = salad;
        }
        if let Some(desert) = file.desert {
            self.desert = desert;
        }
        if let Some(curry) = file.curry {
            self.curry = curry;
        }
        Ok(())
    }

    /// Loads one catalog document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_many([path])
    }

    /// Loads and overlays several documents in order.
    pub fn load_many<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut catalog = Catalog::default();
        for path in paths {
            let path = path.as_ref();
            let load_err = |reason: String| ScanError::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason,
            };
            let json = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
            catalog.apply_json(&json).map_err(|e| load_err(e.to_string()))?;
        }
        info!(
            foods = catalog.foods.len(),
            salad = catalog.salad.len(),
            curry = catalog.curry.len(),
            dessert = catalog.desert.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Food names to match labels against.
    pub fn vocabulary(&self) -> Vec<VocabularyItem> {
        self.foods
            .iter()
            .map(|f| VocabularyItem::new(f.name.clone()))
            .collect()
    }

    pub fn dishes(&self, category: Category) -> &[Dish] {
        match category {
            Category::Salad => &self.salad,
            Category::Curry => &self.curry,
            Category::Dessert => &self.desert,
        }
    }

    pub fn recipes(&self, category: Category) -> Vec<Recipe> {
        self.dishes(category).iter().map(Dish::to_recipe).collect()
    }
}
