//! Sitekit - build-time helpers for a static site.
//!
//! Three independent tools share this library:
//!
//! - `generate-placeholders` renders labelled JPEGs for catalog images that
//!   do not exist yet ([`generator`]).
//! - `normalize-html-paths` rewrites relative asset references in HTML pages
//!   to match each page's depth ([`normalize`]).
//! - `generate-content-indexes` turns markdown front matter into per-language
//!   `index.json` files ([`content_index`]).

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod content_index;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod ports;
pub mod render;

use serde::Serialize;

/// Print a run summary on stdout, as text or JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_summary<S: Serialize + std::fmt::Display>(
    summary: &S,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}
