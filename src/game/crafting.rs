//! # Crafting
//!
//! Recipes turn two input items into one output item. Inputs and outputs are
//! kept as locked inventory snapshots so they can be checked against and
//! applied to a player's inventory with the batch operations.

use crate::generation::DEFAULT_RECIPES;
use crate::{Inventory, Item, ItemCatalog};
use serde::{Deserialize, Serialize};

/// Two items in, one item out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    first: Item,
    second: Item,
    output_item: Item,
    input: Inventory,
    output: Inventory,
}

impl Recipe {
    pub fn new(first: Item, second: Item, output: Item) -> Self {
        let input = Inventory::locked_snapshot(&[first.clone(), second.clone()]);
        let output_snapshot = Inventory::locked_snapshot(&[output.clone()]);
        Self {
            first,
            second,
            output_item: output,
            input,
            output: output_snapshot,
        }
    }

    /// Whether the recipe takes these two items, in either order.
    pub fn matches(&self, a: &Item, b: &Item) -> bool {
        (self.first == *a && self.second == *b) || (self.first == *b && self.second == *a)
    }

    pub fn input(&self) -> &Inventory {
        &self.input
    }

    pub fn output(&self) -> &Inventory {
        &self.output
    }

    pub fn output_item(&self) -> &Item {
        &self.output_item
    }
}

/// All known recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Builds the built-in recipes, skipping any that mention items the
    /// catalog does not know.
    pub fn from_catalog(catalog: &ItemCatalog) -> Self {
        let recipes = DEFAULT_RECIPES
            .iter()
            .filter_map(|(a, b, output)| {
                Some(Recipe::new(
                    catalog.lookup(a)?.clone(),
                    catalog.lookup(b)?.clone(),
                    catalog.lookup(output)?.clone(),
                ))
            })
            .collect();
        Self { recipes }
    }

    /// Finds the recipe for two items regardless of their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Item, Recipe, RecipeBook};
    ///
    /// let stick = Item::new("Stick", "");
    /// let stone = Item::new("Stone", "");
    /// let book = RecipeBook::new(vec![Recipe::new(stick.clone(), stone.clone(), Item::new("Hammer", ""))]);
    /// assert!(book.find(&stone, &stick).is_some());
    /// assert!(book.find(&stick, &stick).is_none());
    /// ```
    pub fn find(&self, a: &Item, b: &Item) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.matches(a, b))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Result of a crafting attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CraftOutcome {
    /// The two items do not make anything.
    NoRecipe { diss_line: Option<String> },
    /// A recipe exists but the inventory lacks its inputs.
    MissingIngredients,
    /// The output was added.
    Crafted(Item),
    /// The inputs were used up but the output did not fit.
    CraftedWithLoss(Item),
}
