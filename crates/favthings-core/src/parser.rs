//! Lenient parser for favorite things listings.
//!
//! One category per line:
//!
//! ```text
//! <CategoryName>:<Thing1Name><Thing1Rating>,<Thing2Name><Thing2Rating>,...
//! ```
//!
//! Example: `Colors:blue5,dark red1,green10`.
//!
//! Malformed lines, unknown categories, malformed items and repeated item
//! names never abort the parse. They are skipped and recorded as
//! [`Diagnostic`]s, in the order they were found. Only a failure to read the
//! input itself is returned as an error.
//!
//! ```rust
//! use favthings_core::{Parser, Whitelist};
//!
//! let whitelist: Whitelist = ["Colors"].into_iter().collect();
//! let mut parser = Parser::new(whitelist);
//! parser.parse_str("Colors:blue1,red2\nMammals:cow3").unwrap();
//!
//! let colors = parser.category("Colors").unwrap();
//! assert_eq!(colors.total_score(), 3);
//! assert_eq!(
//!     parser.error_messages(),
//!     vec!["Unknown category 'Mammals' on line 2, this line was skipped."]
//! );
//! ```

use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::category::Category;
use crate::error::{FavThingsError, Result};
use crate::item::{Item, Rating};
use crate::whitelist::Whitelist;

static LINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^([^:]+):(.*)$").expect("line pattern is valid"));

static ITEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^0-9]+)([0-9]+)$").expect("item pattern is valid"));

/// A non-fatal problem found while parsing. Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The line is not `<category>:<items>`
    InvalidLine { line: usize },
    UnknownCategory { line: usize, category: String },
    /// The item is not `<name><rating>`
    InvalidItem {
        line: usize,
        category: String,
        token: String,
    },
    /// The item name was already rated; the first rating is kept.
    DuplicateItem {
        line: usize,
        category: String,
        name: String,
        rating: Rating,
        previous: Rating,
    },
    ScoreOverflow {
        line: usize,
        category: String,
        name: String,
        rating: Rating,
    },
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidLine { line }
            | Self::UnknownCategory { line, .. }
            | Self::InvalidItem { line, .. }
            | Self::DuplicateItem { line, .. }
            | Self::ScoreOverflow { line, .. } => *line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLine { line } => {
                write!(f, "Invalid syntax in line {line}, this line was skipped.")
            }
            Self::UnknownCategory { line, category } => write!(
                f,
                "Unknown category '{category}' on line {line}, this line was skipped."
            ),
            Self::InvalidItem {
                line,
                category,
                token,
            } => write!(
                f,
                "Invalid syntax for item '{token}' of category '{category}' on line {line}."
            ),
            Self::DuplicateItem {
                line,
                category,
                name,
                rating,
                previous,
            } => write!(
                f,
                "The score {rating} present on line {line} for the item '{name}' in the category \
                 '{category}' was ignored because there is already a previous score of \
                 {previous} set."
            ),
            Self::ScoreOverflow {
                line,
                category,
                name,
                rating,
            } => write!(
                f,
                "The score {rating} present on line {line} for the item '{name}' in the category \
                 '{category}' was ignored because the category total would overflow."
            ),
        }
    }
}

/// Parse session: owns the whitelist, the categories found so far and the
/// diagnostics collected along the way.
#[derive(Debug)]
pub struct Parser {
    whitelist: Whitelist,
    categories: Vec<Category>,
    index: HashMap<String, usize>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(whitelist: Whitelist) -> Self {
        Self {
            whitelist,
            categories: Vec::new(),
            index: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Parse every line of `reader`.
    ///
    /// Calling this again accumulates into the same categories and
    /// diagnostics, with line numbers restarting at 1.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. The whole input is read
    /// before any line is parsed, so a read failure leaves the session as it
    /// was.
    pub fn parse<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let lines = split_lines(&content);
        for (index, line) in lines.iter().enumerate() {
            self.parse_line(index + 1, line);
        }

        info!(
            lines = lines.len(),
            categories = self.categories.len(),
            diagnostics = self.diagnostics.len(),
            "parsed favorite things"
        );
        Ok(())
    }

    pub fn parse_str(&mut self, content: &str) -> Result<()> {
        self.parse(content.as_bytes())
    }

    fn parse_line(&mut self, line: usize, content: &str) {
        let Some(captures) = LINE_PATTERN.captures(content) else {
            debug!(line, "invalid line syntax");
            self.diagnostics.push(Diagnostic::InvalidLine { line });
            return;
        };

        let name = captures[1].trim();
        let items = captures.get(2).map_or("", |m| m.as_str());

        if !self.whitelist.contains(name) {
            debug!(line, category = name, "unknown category");
            self.diagnostics.push(Diagnostic::UnknownCategory {
                line,
                category: name.to_string(),
            });
            return;
        }

        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                self.categories.push(Category::new(name));
                self.index.insert(name.to_string(), self.categories.len() - 1);
                self.categories.len() - 1
            }
        };

        let category = &mut self.categories[position];
        for token in split_items(items) {
            parse_item(line, category, token, &mut self.diagnostics);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Rendered diagnostics, in the order they were found.
    pub fn error_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// Parsed categories in order of first appearance.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&position| &self.categories[position])
    }

    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }
}

/// Split on `\n`, `\r\n` and lone `\r`. A final terminator does not start
/// an extra empty line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        match rest.find(&['\n', '\r'][..]) {
            Some(end) => {
                lines.push(&rest[..end]);
                let width = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + width..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Split an item list on commas, dropping trailing empty tokens.
///
/// An empty list still yields one empty token so that `Colors:` reports an
/// invalid item.
fn split_items(items: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = items.split(',').collect();
    if items.is_empty() {
        return tokens;
    }
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }
    tokens
}

fn parse_item(
    line: usize,
    category: &mut Category,
    token: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let parsed = ITEM_PATTERN.captures(token).and_then(|captures| {
        let name = captures.get(1)?.as_str();
        let rating = captures.get(2)?.as_str().parse::<Rating>().ok()?;
        Some((name, rating))
    });

    let Some((name, rating)) = parsed else {
        debug!(line, category = category.name(), token, "invalid item syntax");
        diagnostics.push(Diagnostic::InvalidItem {
            line,
            category: category.name().to_string(),
            token: token.to_string(),
        });
        return;
    };

    if let Some(previous) = category.get_item_by_name(name).map(Item::rating) {
        debug!(line, category = category.name(), name, "duplicate item ignored");
        diagnostics.push(Diagnostic::DuplicateItem {
            line,
            category: category.name().to_string(),
            name: name.to_string(),
            rating,
            previous,
        });
        return;
    }

    match category.add_item(name, rating) {
        Ok(_) => debug!(line, category = category.name(), name, rating, "item added"),
        Err(FavThingsError::ScoreOverflow { .. }) => {
            debug!(line, category = category.name(), name, rating, "total would overflow");
            diagnostics.push(Diagnostic::ScoreOverflow {
                line,
                category: category.name().to_string(),
                name: name.to_string(),
                rating,
            });
        }
        Err(err) => {
            warn!(line, category = category.name(), name, %err, "item rejected");
        }
    }
}
