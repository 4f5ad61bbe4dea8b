//! Style configuration store.
//!
//! Styles live in a TOML document of named tables. The `DEFAULT` table
//! supplies a value for any key a named table leaves unset; a key missing
//! from both the table and `DEFAULT` is a completeness error surfaced
//! when the style is first resolved. Tables are named after heading text
//! (exact match), after a heading level (`Heading1`..`Heading6`), or
//! `DEFAULT`.
//!
//! ```toml
//! [DEFAULT]
//! "initial indent" = "______"
//! "subsequent indent" = "__"
//! "break on hyphens" = true
//! head = ""
//! align = "<"
//! list = "__"
//!
//! [Heading1]
//! head = "^J"
//! align = "^"
//! ```
//!
//! Indent values keep their raw spelling here (quotes, underscores,
//! caret escapes); the wrapper resolves them at render time.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Name of the table supplying defaults for every other table.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Horizontal alignment of a rendered heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// `<` — heading starts at the head prefix (no padding).
    #[default]
    Left,
    /// `^` — heading is centered by left-padding the prefix.
    Center,
    /// `>` — heading is pushed to the right edge.
    Right,
}

impl Align {
    /// Parse the store's alignment symbol. Anything other than `^` or
    /// `>` reads as left.
    fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "^" => Align::Center,
            ">" => Align::Right,
            _ => Align::Left,
        }
    }
}

/// One table as it appears in the store, before defaulting.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawStyle {
    #[serde(rename = "initial indent")]
    initial_indent: Option<String>,
    #[serde(rename = "subsequent indent")]
    subsequent_indent: Option<String>,
    #[serde(rename = "break on hyphens")]
    break_on_hyphens: Option<bool>,
    head: Option<String>,
    align: Option<String>,
    list: Option<String>,
    text: Option<String>,
}

/// A fully resolved style record.
///
/// String fields hold the raw store values; quoting, underscores, and
/// caret escapes are interpreted downstream by the wrapper so that, for
/// example, alignment math can still see the two-character escape form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Indent of the first wrapped line of a paragraph.
    pub initial_indent: String,
    /// Indent of every following wrapped line.
    pub subsequent_indent: String,
    /// Allow breaking hyphenated compounds when wrapping paragraphs.
    pub break_on_hyphens: bool,
    /// Prefix placed before the heading text (may contain `^J`).
    pub head: String,
    /// Heading alignment.
    pub align: Align,
    /// Extra indent for list items under this style.
    pub list: String,
    /// Literal line emitted before the heading instead of a filler.
    pub text: Option<String>,
}

/// The parsed configuration store.
#[derive(Debug, Clone, Default)]
pub struct Config {
    default: RawStyle,
    sections: BTreeMap<String, RawStyle>,
}

impl Config {
    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        fs::read_to_string(path)?.parse()
    }

    /// Whether a table with this exact name exists (`DEFAULT` is not a
    /// named table).
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Pick the table for a heading: exact text match, then the level
    /// name, then `DEFAULT` — first hit wins.
    pub fn heading_section(&self, text: &str, level: u8) -> String {
        if self.has_section(text) {
            return text.to_string();
        }
        let by_level = format!("Heading{level}");
        if self.has_section(&by_level) {
            return by_level;
        }
        DEFAULT_SECTION.to_string()
    }

    /// Resolve a table name into a complete [`Style`], filling unset keys
    /// from `DEFAULT`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingKey`] when a required key is set neither in the
    /// table nor in `DEFAULT`.
    pub fn resolve(&self, name: &str) -> Result<Style> {
        let section = self.sections.get(name);

        let string_key = |key: &'static str, pick: fn(&RawStyle) -> &Option<String>| {
            section
                .and_then(|raw| pick(raw).clone())
                .or_else(|| pick(&self.default).clone())
                .ok_or_else(|| Error::MissingKey {
                    section: name.to_string(),
                    key,
                })
        };

        let break_on_hyphens = section
            .and_then(|raw| raw.break_on_hyphens)
            .or(self.default.break_on_hyphens)
            .ok_or_else(|| Error::MissingKey {
                section: name.to_string(),
                key: "break on hyphens",
            })?;

        let text = section
            .and_then(|raw| raw.text.clone())
            .or_else(|| self.default.text.clone());

        Ok(Style {
            initial_indent: string_key("initial indent", |raw| &raw.initial_indent)?,
            subsequent_indent: string_key("subsequent indent", |raw| &raw.subsequent_indent)?,
            break_on_hyphens,
            head: string_key("head", |raw| &raw.head)?,
            align: Align::from_symbol(&string_key("align", |raw| &raw.align)?),
            list: string_key("list", |raw| &raw.list)?,
            text,
        })
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self> {
        let mut sections: BTreeMap<String, RawStyle> = toml::from_str(source)?;
        let default = sections.remove(DEFAULT_SECTION).unwrap_or_default();
        Ok(Config { default, sections })
    }
}
