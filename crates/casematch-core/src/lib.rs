//! casematch core library
//!
//! Textual similarity scoring for spotting repeated cases among free-text
//! records: normalization, corpus-relative TF-IDF weighting, cosine
//! similarity and thresholded ranking.
//!
//! ```
//! use casematch_core::document::Document;
//! use casematch_core::similarity::{find_similar, DEFAULT_THRESHOLD};
//!
//! let query = Document::new("g-1", "water pipe leak on main street");
//! let candidates = vec![
//!     Document::new("g-2", "water pipe burst near main street"),
//!     Document::new("g-3", "electricity meter billing error"),
//!     Document::new("g-4", "garbage not collected this week"),
//!     Document::new("g-5", "streetlight broken outside school"),
//! ];
//!
//! let results = find_similar(&query, &candidates, DEFAULT_THRESHOLD);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id, "g-2");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod logging;
pub mod similarity;
pub mod text;
