// src/handlers/mod.rs

pub mod auth;
pub mod exam;
pub mod leaderboard;
pub mod result;
