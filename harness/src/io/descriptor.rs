//! Exercise descriptors (`<id>Runner.toml`).

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// Suffix shared by every descriptor file name.
pub const DESCRIPTOR_SUFFIX: &str = "Runner.toml";

/// Difficulty band, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Beginner,
    Intermediate,
    Advanced,
    Challenging,
    Legendary,
}

impl Category {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Beginner => "Beginner",
            Category::Intermediate => "Intermediate",
            Category::Advanced => "Advanced",
            Category::Challenging => "Challenging",
            Category::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Metadata for one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Descriptor {
    pub category: Category,
    /// Instructions shown to the user.
    pub prompt: String,
    /// Starter code used until the user saves their own.
    #[serde(default)]
    pub skeleton: String,
}

impl Descriptor {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| HarnessError::io(path, err))?;
        Self::parse(path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self> {
        let descriptor: Descriptor =
            toml::from_str(contents).map_err(|err| HarnessError::Descriptor {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        if descriptor.prompt.trim().is_empty() {
            return Err(HarnessError::Descriptor {
                path: path.to_path_buf(),
                message: "prompt must be non-empty".to_string(),
            });
        }
        Ok(descriptor)
    }
}

/// Extract the exercise id from a descriptor file name (`HasTripleRunner.toml`
/// → `HasTriple`). Returns `None` for anything else.
pub fn exercise_id(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(DESCRIPTOR_SUFFIX)
        .filter(|id| !id.is_empty())
}
