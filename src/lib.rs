//! Core ingredient-analysis pipeline for Taro Health: builds a
//! personalized avoid-list from a user profile, matches scanned ingredient
//! text against it, and falls back to a bounded offline cache or a lexicon
//! scorer when the analysis service is unreachable.

pub mod domain;
pub mod infrastructure;
