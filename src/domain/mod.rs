//! Core domain types and logic.

pub mod security;
pub mod dedup;
pub mod rank;
pub mod portfolio;
pub mod series;
pub mod pipeline;
pub mod error;
