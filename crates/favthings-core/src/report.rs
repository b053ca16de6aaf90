//! Headline answers over parsed categories.
//!
//! Both reductions keep the first encountered candidate when several share
//! the maximum, so the result follows the iteration order of the input
//! (categories in order of first appearance when fed from [`crate::Parser`]).

use serde::Serialize;

use crate::category::Category;
use crate::item::{Item, Rating};
use crate::parser::Parser;

/// The highest rated item across every category.
pub fn highest_rated_item<'a, I>(categories: I) -> Option<&'a Item>
where
    I: IntoIterator<Item = &'a Category>,
{
    categories
        .into_iter()
        .filter_map(Category::highest_rated_item)
        .fold(None, |best: Option<&Item>, item| match best {
            Some(current) if item.rating() <= current.rating() => Some(current),
            _ => Some(item),
        })
}

/// The category with the highest total score.
pub fn highest_sum_category<'a, I>(categories: I) -> Option<&'a Category>
where
    I: IntoIterator<Item = &'a Category>,
{
    categories
        .into_iter()
        .fold(None, |best: Option<&Category>, category| match best {
            Some(current) if category.total_score() <= current.total_score() => Some(current),
            _ => Some(category),
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySum {
    pub category: String,
    pub sum: Rating,
}

/// Everything the presentation layer needs after a parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub categories: usize,
    pub highest_rated: Option<Item>,
    pub highest_sum: Option<CategorySum>,
    pub errors: Vec<String>,
}

impl Report {
    pub fn from_categories<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = &'a Category>,
        I::IntoIter: Clone,
    {
        let categories = categories.into_iter();
        Self {
            categories: categories.clone().count(),
            highest_rated: highest_rated_item(categories.clone()).cloned(),
            highest_sum: highest_sum_category(categories).map(|c| CategorySum {
                category: c.name().to_string(),
                sum: c.total_score(),
            }),
            errors: Vec::new(),
        }
    }

    pub fn from_parser(parser: &Parser) -> Self {
        Self {
            errors: parser.error_messages(),
            ..Self::from_categories(parser.categories())
        }
    }

    /// True when no category was parsed at all.
    pub fn is_empty(&self) -> bool {
        self.categories == 0
    }
}
