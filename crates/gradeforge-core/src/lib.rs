//! gradeforge-core — Grading strategies, TF-IDF scoring, and orchestration.
//!
//! This crate defines the data model, the deterministic text-scoring
//! strategies, and the grading engine that the rest of gradeforge builds on.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod similarity;
pub mod statistics;
pub mod strategy;
pub mod text;
pub mod tfidf;
