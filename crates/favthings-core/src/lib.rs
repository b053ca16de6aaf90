pub mod category;
pub mod config;
pub mod error;
pub mod item;
pub mod parser;
pub mod report;
pub mod source;
pub mod whitelist;

pub use category::Category;
pub use config::{CategoriesConfig, Config};
pub use error::{FavThingsError, Result};
pub use item::{Item, Rating};
pub use parser::{Diagnostic, Parser};
pub use report::{highest_rated_item, highest_sum_category, CategorySum, Report};
pub use source::InputSource;
pub use whitelist::Whitelist;
