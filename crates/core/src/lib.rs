//! Core library for pageviews
//!
//! This crate implements the **Functional Core** of the pageviews application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The pageviews project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`pageviews_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pageviews`**: HTTP client, HTTP server and CLI (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`month`]: Parsing `YYYYMM` months and computing their `YYYYMMDD` day range
//! - [`pageviews`]: Query validation, upstream URL construction, response
//!   transformation and the upstream error taxonomy
//!
//! # Example Usage
//!
//! ```rust
//! use pageviews_core::pageviews::{
//!     per_article_url, transform_pageviews_response, validate_query, PageviewsResponse,
//!     ViewCountQuery, DEFAULT_API_BASE,
//! };
//!
//! let query = validate_query(ViewCountQuery {
//!     article: Some("Node.js".to_string()),
//!     month: Some("202402".to_string()),
//! })
//! .unwrap();
//!
//! assert_eq!(query.range.end, "20240229");
//! assert!(per_article_url(DEFAULT_API_BASE, &query).ends_with("/monthly/20240201/20240229"));
//!
//! let response: PageviewsResponse = serde_json::from_str(r#"{"items":[{"views":12345}]}"#).unwrap();
//! let output = transform_pageviews_response(response, &query).unwrap();
//! assert_eq!(output.view_count, 12345);
//! ```

pub mod month;
pub mod pageviews;
