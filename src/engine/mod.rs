// src/engine/mod.rs

//! Pure parsing, scoring and ranking over exam data. Nothing here touches the store.

pub mod parser;
pub mod ranking;
pub mod scoring;
