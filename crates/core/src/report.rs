//! Plain-text reply rendering for the chat front end.
//!
//! A reply is three messages: the detected item counts, the makable
//! recipes and the unmakable recipes with what is still missing.

use std::fmt::Write;

use serde::Serialize;

use crate::catalog::{Catalog, Category};
use crate::detection::DetectionResult;
use crate::recipe::{Feasibility, evaluate};

/// Reply sent when a mention carries no image.
pub const MISSING_IMAGE_REPLY: &str = "画像を添付してください";

const MAKABLE_HEADER: &str = "作れるレシピ:\n";
const UNMAKABLE_HEADER: &str = "作れないレシピ:\n";

/// The three reply messages, in posting order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Reply {
    pub items: String,
    pub makable: String,
    pub unmakable: String,
}

impl Reply {
    pub fn messages(&self) -> [&str; 3] {
        [
            self.items.as_str(),
            self.makable.as_str(),
            self.unmakable.as_str(),
        ]
    }
}

/// One `"<name> x<count>"` line per detected item.
pub fn render_item_counts(detection: &DetectionResult) -> String {
    let mut out = String::new();
    for (name, count) in &detection.item_counts {
        let _ = writeln!(out, "{name} x{count}");
    }
    out
}

/// Renders the makable and unmakable blocks of one evaluation.
pub fn render_feasibility(feasibility: &Feasibility<'_>) -> (String, String) {
    let mut makable = String::from(MAKABLE_HEADER);
    for recipe in &feasibility.makable {
        let _ = writeln!(makable, "    {}", recipe.name);
        for ing in &recipe.ingredients {
            let _ = writeln!(makable, "        {} x{}", ing.name(), ing.required);
        }
    }

    let mut unmakable = String::from(UNMAKABLE_HEADER);
    for entry in &feasibility.unmakable {
        let _ = writeln!(unmakable, "    {}", entry.recipe.name);
        for s in &entry.shortages {
            if s.missing == 0 {
                let _ = writeln!(unmakable, "        {} x{}", s.name, s.required);
            } else {
                let _ = writeln!(unmakable, "        {} x{} あと{}", s.name, s.required, s.missing);
            }
        }
    }
    (makable, unmakable)
}

/// Categories requested by free-form message text.
///
/// The first category name found (salad, then curry, then dessert) wins;
/// text naming none of them requests all three.
pub fn select_categories(text: &str) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .find(|c| text.contains(c.display_name()))
        .map(|c| vec![c])
        .unwrap_or_else(|| Category::ALL.to_vec())
}

/// Builds the full reply for a detection and the request text.
pub fn render_reply(detection: &DetectionResult, catalog: &Catalog, text: &str) -> Reply {
    let items = render_item_counts(detection);
    let categories = select_categories(text);

    if let [only] = categories.as_slice() {
        let recipes = catalog.recipes(*only);
        let (makable, unmakable) = render_feasibility(&evaluate(&detection.item_counts, &recipes));
        return Reply {
            items,
            makable,
            unmakable,
        };
    }

    let mut reply = Reply {
        items,
        ..Reply::default()
    };
    for category in categories {
        let recipes = catalog.recipes(category);
        let (makable, unmakable) = render_feasibility(&evaluate(&detection.item_counts, &recipes));
        let prefix = category.display_name();
        let _ = write!(reply.makable, "\n{prefix}の{makable}");
        let _ = write!(reply.unmakable, "\n{prefix}の{unmakable}");
    }
    reply
}
