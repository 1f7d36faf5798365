// src/models/category.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of question categories. Questions and marks are partitioned by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Coding,
    Math,
    Aptitude,
    Communication,
}

impl Category {
    /// All categories in paper order.
    pub const ALL: [Category; 4] = [
        Category::Coding,
        Category::Math,
        Category::Aptitude,
        Category::Communication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Coding => "coding",
            Category::Math => "math",
            Category::Aptitude => "aptitude",
            Category::Communication => "communication",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coding" => Ok(Category::Coding),
            "math" => Ok(Category::Math),
            "aptitude" => Ok(Category::Aptitude),
            "communication" => Ok(Category::Communication),
            _ => Err(UnknownCategory(s.trim().to_string())),
        }
    }
}

/// One value per category.
/// Used for marks (`PerCategory<u32>`), ranks and raw documents.
/// Missing fields deserialize to the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerCategory<T> {
    pub coding: T,
    pub math: T,
    pub aptitude: T,
    pub communication: T,
}

impl<T> PerCategory<T> {
    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Coding => &self.coding,
            Category::Math => &self.math,
            Category::Aptitude => &self.aptitude,
            Category::Communication => &self.communication,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Coding => &mut self.coding,
            Category::Math => &mut self.math,
            Category::Aptitude => &mut self.aptitude,
            Category::Communication => &mut self.communication,
        }
    }
}

pub type CategoryMarks = PerCategory<u32>;

impl CategoryMarks {
    /// Summed in `u64` so four `u32` marks can never overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.coding)
            + u64::from(self.math)
            + u64::from(self.aptitude)
            + u64::from(self.communication)
    }
}
