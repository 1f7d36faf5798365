// src/models/mod.rs

pub mod category;
pub mod exam;
pub mod exam_result;
pub mod question;
pub mod rank;
pub mod student;
