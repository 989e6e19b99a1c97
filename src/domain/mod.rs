//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod metrics;
pub mod strategy;
pub mod scoring;
pub mod picks;
pub mod ingest;
pub mod universe;
pub mod error;
