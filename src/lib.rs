//! # mdhelp
//!
//! Converts lightweight Markdown into fixed-width 40-column help screens
//! with embedded control codes, the native format of small terminal help
//! viewers.
//!
//! ## Features
//!
//! - Headings (`#`..`######`), bulleted and numbered lists, paragraphs,
//!   and inline `[label](target)` links
//! - Per-heading styling from a TOML store: indentation, alignment,
//!   head prefixes, double-height headings, leading separator lines
//! - Caret escapes (`^@`, `^A`..`^Z`) substituted into raw control bytes
//! - Output is a plain byte stream of exactly-40-character rows; fixed
//!   width alone delimits rows, no separators are emitted
//!
//! ## Quick Start
//!
//! ```
//! use mdhelp::{Config, convert_str};
//!
//! let config: Config = r#"
//! [DEFAULT]
//! "initial indent" = "______"
//! "subsequent indent" = "__"
//! "break on hyphens" = true
//! head = ""
//! align = "<"
//! list = "__"
//!
//! [Heading1]
//! align = "^"
//! "#.parse()?;
//!
//! let help = convert_str("# Manual\n\nSee [intro](INTRO.HLP).\n", &config)?;
//! assert_eq!(help.chars().count() % 40, 0);
//! # Ok::<(), mdhelp::Error>(())
//! ```
//!
//! Each input line is link-rewritten and classified, paragraphs are
//! accumulated and flushed through the column wrapper with the style of
//! the enclosing heading, and the rendered chunks are concatenated in
//! arrival order. See [`convert`] and [`Converter`] for the entry
//! points.

pub mod config;
pub mod convert;
pub mod escape;
pub mod markup;
pub mod wrap;

mod error;

pub use config::{Align, Config, Style};
pub use convert::{Converter, convert, convert_str};
pub use error::{Error, Result};
pub use wrap::WIDTH;
