//! Common utilities and shared types for newsdesk-rs.
//!
//! This crate provides foundational components used across all newsdesk-rs crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Pagination**: Page-numbered result envelopes via [`Page`] and [`PageMeta`]
//! - **Text**: Slug derivation and summary extraction for articles
//!
//! # Example
//!
//! ```no_run
//! use newsdesk_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod pagination;
pub mod serde_util;
pub mod text;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use pagination::{Page, PageMeta};
pub use text::{slugify, summarize_html};
