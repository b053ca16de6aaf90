//! Category aggregate.
//!
//! A category owns its items keyed by name, keeps the running total of their
//! ratings and a rating-ordered view that is maintained on every insert and
//! removal.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::error::{FavThingsError, Result};
use crate::item::{Item, Rating};

/// Ranking key: highest rating first, then insertion order.
type RankKey = (Reverse<Rating>, u64);

#[derive(Debug, Clone)]
struct Slot {
    item: Item,
    seq: u64,
}

/// A named group of rated items.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    total_score: Rating,
    items: HashMap<String, Slot>,
    ranking: BTreeMap<RankKey, String>,
    next_seq: u64,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_score: 0,
            items: HashMap::new(),
            ranking: BTreeMap::new(),
            next_seq: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sum of the ratings of every held item.
    pub fn total_score(&self) -> Rating {
        self.total_score
    }

    /// Add a new item tagged with this category's name.
    ///
    /// Fails with [`FavThingsError::DuplicateItem`] when the name is already
    /// present, and with [`FavThingsError::ScoreOverflow`] when the total
    /// would no longer fit. The category is left untouched on failure.
    pub fn add_item(&mut self, name: &str, rating: Rating) -> Result<&Item> {
        if self.items.contains_key(name) {
            return Err(FavThingsError::DuplicateItem {
                category: self.name.clone(),
                name: name.to_string(),
            });
        }

        let total = self
            .total_score
            .checked_add(rating)
            .ok_or_else(|| FavThingsError::ScoreOverflow {
                category: self.name.clone(),
                name: name.to_string(),
            })?;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.total_score = total;
        self.ranking.insert((Reverse(rating), seq), name.to_string());

        let item = Item::new(&self.name, name, rating);
        let slot = self
            .items
            .entry(name.to_string())
            .or_insert(Slot { item, seq });
        Ok(&slot.item)
    }

    /// Remove an item by its exact (case-sensitive) name.
    pub fn remove_item_by_name(&mut self, name: &str) -> Option<Item> {
        let slot = self.items.remove(name)?;
        self.ranking.remove(&(Reverse(slot.item.rating()), slot.seq));
        self.total_score -= slot.item.rating();
        Some(slot.item)
    }

    pub fn get_item_by_name(&self, name: &str) -> Option<&Item> {
        self.items.get(name).map(|slot| &slot.item)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Items from the highest to the lowest rating.
    ///
    /// Items sharing a rating keep the order in which they were added.
    pub fn items_by_rating_desc(&self) -> Vec<&Item> {
        self.ranking
            .values()
            .filter_map(|name| self.get_item_by_name(name))
            .collect()
    }

    /// Head of [`Category::items_by_rating_desc`].
    pub fn highest_rated_item(&self) -> Option<&Item> {
        self.ranking
            .values()
            .next()
            .and_then(|name| self.get_item_by_name(name))
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> Category {
        let mut animals = Category::new("Animals");
        animals.add_item("owl", 5).unwrap();
        animals.add_item("bear", 7).unwrap();
        animals.add_item("wolf", 4).unwrap();
        animals.add_item("deer", 2).unwrap();
        animals
    }

    #[test]
    fn test_add_item_fails_on_duplicate() {
        let mut animals = Category::new("Animals");
        animals.add_item("owl", 1).unwrap();

        let err = animals.add_item("owl", 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "This Category already contains a FavoriteThing named 'owl'."
        );
        assert_eq!(animals.size(), 1);
        assert_eq!(animals.total_score(), 1);
        assert_eq!(animals.get_item_by_name("owl").unwrap().rating(), 1);
    }

    #[test]
    fn test_highest_rated_item() {
        let animals = animals();
        assert_eq!(animals.size(), 4);
        assert_eq!(
            animals.highest_rated_item(),
            Some(&Item::new("Animals", "bear", 7))
        );
    }

    #[test]
    fn test_items_by_rating_desc() {
        let animals = animals();
        let names: Vec<_> = animals
            .items_by_rating_desc()
            .iter()
            .map(|i| i.name())
            .collect();
        assert_eq!(names, vec!["bear", "owl", "wolf", "deer"]);
        assert_eq!(
            animals.highest_rated_item(),
            animals.items_by_rating_desc().first().copied()
        );
    }

    #[test]
    fn test_equal_ratings_keep_insertion_order() {
        let mut colors = Category::new("Colors");
        colors.add_item("red", 3).unwrap();
        colors.add_item("blue", 3).unwrap();
        colors.add_item("green", 1).unwrap();

        let names: Vec<_> = colors
            .items_by_rating_desc()
            .iter()
            .map(|i| i.name())
            .collect();
        assert_eq!(names, vec!["red", "blue", "green"]);
        assert_eq!(colors.highest_rated_item().unwrap().name(), "red");
    }

    #[test]
    fn test_total_score_tracks_adds_and_removes() {
        let mut animals = animals();
        assert_eq!(animals.total_score(), 18);

        let removed = animals.remove_item_by_name("bear").unwrap();
        assert_eq!(removed.rating(), 7);
        assert_eq!(animals.total_score(), 11);
        assert_eq!(animals.size(), 3);
        assert_eq!(animals.highest_rated_item().unwrap().name(), "owl");
        assert!(!animals.contains("bear"));
    }

    #[test]
    fn test_remove_missing_item() {
        let mut animals = animals();
        assert!(animals.remove_item_by_name("Bear").is_none());
        assert_eq!(animals.total_score(), 18);
        assert_eq!(animals.size(), 4);
    }

    #[test]
    fn test_remove_then_add_same_name() {
        let mut colors = Category::new("Colors");
        colors.add_item("red", 2).unwrap();
        colors.remove_item_by_name("red");
        colors.add_item("red", 9).unwrap();
        assert_eq!(colors.total_score(), 9);
        assert_eq!(colors.items_by_rating_desc().len(), 1);
    }

    #[test]
    fn test_empty_category() {
        let empty = Category::new("Empty");
        assert!(empty.is_empty());
        assert_eq!(empty.total_score(), 0);
        assert!(empty.highest_rated_item().is_none());
        assert!(empty.items_by_rating_desc().is_empty());
        assert!(empty.get_item_by_name("anything").is_none());
    }

    #[test]
    fn test_items_are_tagged_with_category_name() {
        let mut colors = Category::new("Colors");
        let item = colors.add_item("blue", 1).unwrap();
        assert_eq!(item.category_name(), "Colors");
    }

    #[test]
    fn test_score_overflow_leaves_category_untouched() {
        let mut big = Category::new("Big");
        big.add_item("a", Rating::MAX).unwrap();

        let err = big.add_item("b", 1).unwrap_err();
        assert!(matches!(err, FavThingsError::ScoreOverflow { .. }));
        assert_eq!(big.size(), 1);
        assert_eq!(big.total_score(), Rating::MAX);
        assert!(!big.contains("b"));
    }
}
