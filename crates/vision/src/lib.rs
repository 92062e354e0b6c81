//! Client for the hosted vision-language extraction API.
//!
//! One HTTP call per card image; the dual-side helper runs both calls
//! concurrently and reports each side's outcome independently so a
//! failed back side never costs the caller the front side's result.

pub mod client;
pub mod types;

pub use client::{VisionClient, VisionConfig, VisionError};
pub use types::{DualExtraction, ExtractedZone, ExtractionResponse};
