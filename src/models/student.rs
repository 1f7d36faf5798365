// src/models/student.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A student as entered on the exam page.
/// Not stored on its own; each result embeds a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Student {
    /// Generated at submission when left empty.
    #[serde(default)]
    pub id: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Natural key across exams.
    #[validate(length(min = 1, max = 50))]
    pub roll_no: String,

    #[validate(length(min = 1, max = 20))]
    pub year: String,

    #[validate(length(min = 1, max = 50))]
    pub branch: String,

    #[validate(length(min = 1, max = 20))]
    pub section: String,
}
