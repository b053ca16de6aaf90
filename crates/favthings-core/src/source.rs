//! Input sources for the parser.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use crate::error::{FavThingsError, Result};

const SAMPLE_FAVORITE_THINGS: &str = include_str!("../resources/favorite-things.txt");

/// Where the favorite things are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Sample bundled with the library
    Sample,
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// `None` selects the bundled sample, `-` selects stdin.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => Self::Sample,
            Some(path) if path == Path::new("-") => Self::Stdin,
            Some(path) => Self::File(path.to_path_buf()),
        }
    }

    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            Self::Sample => Ok(Box::new(Cursor::new(SAMPLE_FAVORITE_THINGS.as_bytes()))),
            Self::File(path) => {
                let file = File::open(path).map_err(|e| match e.kind() {
                    io::ErrorKind::NotFound => FavThingsError::InputNotFound { path: path.clone() },
                    _ => FavThingsError::Io(e),
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            Self::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sample => write!(f, "bundled sample"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "stdin"),
        }
    }
}
