use std::cmp::Ordering;

use serde::Serialize;

/// Integer rating attached to a favorite thing.
///
/// The grammar only produces non-negative ratings, so the total of any subset
/// of a category's items never exceeds the category total.
pub type Rating = u64;

/// A rated favorite thing belonging to exactly one category.
///
/// Equality is structural over all three fields. Ordering only looks at the
/// rating, see [`Item::cmp_rating`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Item {
    category_name: String,
    name: String,
    rating: Rating,
}

impl Item {
    pub(crate) fn new(category_name: &str, name: &str, rating: Rating) -> Self {
        Self {
            category_name: category_name.to_string(),
            name: name.to_string(),
            rating,
        }
    }

    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Ascending comparison by rating only.
    pub fn cmp_rating(&self, other: &Self) -> Ordering {
        self.rating.cmp(&other.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Item::new("Animals", "bear", 7);
        assert_eq!(a, Item::new("Animals", "bear", 7));
        assert_ne!(a, Item::new("Animals", "bear", 8));
        assert_ne!(a, Item::new("Colors", "bear", 7));
    }

    #[test]
    fn test_cmp_rating_ignores_names() {
        let bear = Item::new("Animals", "bear", 7);
        let owl = Item::new("Colors", "owl", 7);
        let wolf = Item::new("Animals", "wolf", 4);
        assert_eq!(bear.cmp_rating(&owl), Ordering::Equal);
        assert_eq!(wolf.cmp_rating(&bear), Ordering::Less);
    }
}
