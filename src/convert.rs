//! Markdown to help-screen conversion.
//!
//! [`Converter`] is the per-run context: it owns the active style, the
//! pending paragraph, the block-separation flag, and the output buffer.
//! Input is consumed line by line; each line is link-rewritten,
//! classified, and either accumulated into the pending paragraph or
//! rendered immediately after flushing it. No I/O beyond reading lines —
//! the caller decides where the assembled buffer goes.

use std::collections::HashMap;
use std::io::BufRead;

use crate::config::{Align, Config, DEFAULT_SECTION, Style};
use crate::error::Result;
use crate::escape::DOUBLE_HEIGHT;
use crate::markup::{self, Block};
use crate::wrap::{self, WIDTH};

/// Convert a whole input stream using the given style configuration.
///
/// # Examples
///
/// ```
/// use mdhelp::{Config, convert};
///
/// let config: Config = r#"
/// [DEFAULT]
/// "initial indent" = ""
/// "subsequent indent" = ""
/// "break on hyphens" = true
/// head = ""
/// align = "<"
/// list = "__"
/// "#.parse()?;
///
/// let out = convert("# Hi\n".as_bytes(), &config)?;
/// assert_eq!(out, format!("{:<40}", "Hi"));
/// # Ok::<(), mdhelp::Error>(())
/// ```
pub fn convert(input: impl BufRead, config: &Config) -> Result<String> {
    Converter::new(config)?.convert(input)
}

/// [`convert`] over an in-memory string.
pub fn convert_str(input: &str, config: &Config) -> Result<String> {
    convert(input.as_bytes(), config)
}

/// Conversion context for one run.
pub struct Converter<'a> {
    config: &'a Config,
    /// Styles already resolved this run, by section name.
    styles: HashMap<String, Style>,
    /// Style of the most recent heading (DEFAULT before any heading).
    style: Style,
    /// Pending paragraph, joined with single spaces.
    paragraph: String,
    output: String,
    /// Set at the start of the document and after an empty-line
    /// paragraph flush; suppresses the next heading's leading filler.
    separated: bool,
}

impl<'a> Converter<'a> {
    /// Create a context with the DEFAULT style active.
    ///
    /// # Errors
    ///
    /// Fails if the DEFAULT style is incomplete.
    pub fn new(config: &'a Config) -> Result<Self> {
        let style = config.resolve(DEFAULT_SECTION)?;
        let mut styles = HashMap::new();
        styles.insert(DEFAULT_SECTION.to_string(), style.clone());

        Ok(Converter {
            config,
            styles,
            style,
            paragraph: String::new(),
            output: String::new(),
            separated: true,
        })
    }

    /// Consume the input line by line and return the assembled output.
    pub fn convert(mut self, input: impl BufRead) -> Result<String> {
        for line in input.lines() {
            self.line(&line?)?;
        }
        self.finish()
    }

    /// Process one raw input line.
    fn line(&mut self, raw: &str) -> Result<()> {
        let line = markup::rewrite_links(raw.trim_matches(' '));

        if line.is_empty() {
            if !self.paragraph.is_empty() {
                self.flush_paragraph();
                self.push_filler();
                self.separated = true;
            }
            return Ok(());
        }

        match markup::classify(&line) {
            Block::Heading { level, text } => self.render_heading(level, text)?,
            Block::ListItem { text } => self.render_list_item(text),
            Block::Paragraph { text } => self.accumulate(text),
        }

        Ok(())
    }

    /// Final flush: a paragraph still pending at end of input is
    /// rendered without the filler line.
    fn finish(mut self) -> Result<String> {
        if !self.paragraph.is_empty() {
            self.flush_paragraph();
        }
        Ok(self.output)
    }

    fn accumulate(&mut self, text: &str) {
        if !self.paragraph.is_empty() {
            self.paragraph.push(' ');
        }
        self.paragraph.push_str(text);
    }

    /// Render the pending paragraph with the currently active style and
    /// clear it. The caller decides whether a filler follows.
    fn flush_paragraph(&mut self) {
        let chunk = wrap::fill(
            &self.paragraph,
            &self.style.initial_indent,
            &self.style.subsequent_indent,
            self.style.break_on_hyphens,
        );
        self.output.push_str(&chunk);
        self.paragraph.clear();
    }

    fn render_heading(&mut self, level: u8, text: &str) -> Result<()> {
        if !self.paragraph.is_empty() {
            self.flush_paragraph();
        }

        let style = self.style_for(text, level)?;

        // Leading literal line, or a separating filler when another
        // block precedes this one.
        if let Some(lead) = &style.text {
            let chunk = wrap::fill(lead, "", "", true);
            self.output.push_str(&chunk);
        } else if !self.separated {
            self.push_filler();
        }

        // Alignment pads the head prefix with spaces. Lengths are
        // measured on the raw strings (caret escapes still two chars);
        // a prefix+text wider than the screen pads nothing.
        let free =
            WIDTH as isize - text.chars().count() as isize - style.head.chars().count() as isize;
        let pad = match style.align {
            Align::Left => 0,
            Align::Center => free.div_euclid(2).max(0) as usize,
            Align::Right => free.max(0) as usize,
        };

        let initial = format!("{}{}", " ".repeat(pad), style.head);
        let chunk = wrap::fill(text, &initial, "", true);
        self.output.push_str(&chunk);

        // A double-height prefix shows the same rendered cell twice.
        if style.head.contains(DOUBLE_HEIGHT) {
            self.output.push_str(&chunk);
        }

        self.separated = false;
        self.style = style;
        Ok(())
    }

    /// List items indent by the active style's initial indent plus its
    /// list indent, concatenated before quote/underscore resolution.
    fn render_list_item(&mut self, text: &str) {
        if !self.paragraph.is_empty() {
            self.flush_paragraph();
        }

        let initial = format!("{}{}", self.style.initial_indent, self.style.list);
        let chunk = wrap::fill(text, &initial, "", true);
        self.output.push_str(&chunk);
        self.separated = false;
    }

    /// Resolve the style for a heading, reusing a record already
    /// resolved under the same section name this run.
    fn style_for(&mut self, text: &str, level: u8) -> Result<Style> {
        let name = self.config.heading_section(text, level);
        if let Some(style) = self.styles.get(&name) {
            return Ok(style.clone());
        }

        let style = self.config.resolve(&name)?;
        self.styles.insert(name, style.clone());
        Ok(style)
    }

    fn push_filler(&mut self) {
        self.output.push_str(&" ".repeat(WIDTH));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[DEFAULT]
"initial indent" = "____"
"subsequent indent" = "__"
"break on hyphens" = true
head = ""
align = "<"
list = "__"
"#;

    fn config() -> Config {
        CONFIG.parse().unwrap()
    }

    fn row(text: &str) -> String {
        format!("{text:<40}")
    }

    #[test]
    fn test_paragraph_lines_join_with_one_space() {
        let out = convert_str("Hello\nworld\n", &config()).unwrap();
        assert_eq!(out, row("    Hello world"));
    }

    #[test]
    fn test_empty_line_flushes_with_filler() {
        let out = convert_str("one\n\ntwo\n", &config()).unwrap();
        assert_eq!(out, [row("    one"), row(""), row("    two")].concat());
    }

    #[test]
    fn test_trailing_paragraph_flushed_without_filler() {
        let out = convert_str("tail", &config()).unwrap();
        assert_eq!(out, row("    tail"));
    }

    #[test]
    fn test_empty_input_empty_output() {
        assert_eq!(convert_str("", &config()).unwrap(), "");
        assert_eq!(convert_str("\n\n\n", &config()).unwrap(), "");
    }

    #[test]
    fn test_first_heading_has_no_leading_filler() {
        let out = convert_str("# Title\n", &config()).unwrap();
        assert_eq!(out, row("Title"));
    }

    #[test]
    fn test_heading_after_block_gets_filler() {
        let out = convert_str("# One\n# Two\n", &config()).unwrap();
        assert_eq!(out, [row("One"), row(""), row("Two")].concat());
    }

    #[test]
    fn test_no_double_filler_after_paragraph_gap() {
        // The empty-line flush already separated the blocks; the
        // following heading must not add a second filler.
        let out = convert_str("para\n\n# Next\n", &config()).unwrap();
        assert_eq!(out, [row("    para"), row(""), row("Next")].concat());
    }

    #[test]
    fn test_heading_flushes_pending_paragraph() {
        // No blank line: the paragraph flushes without its own filler,
        // then the heading adds the separating one.
        let out = convert_str("para\n# Next\n", &config()).unwrap();
        assert_eq!(out, [row("    para"), row(""), row("Next")].concat());
    }

    #[test]
    fn test_list_item_uses_active_indents() {
        let out = convert_str("* item\n", &config()).unwrap();
        assert_eq!(out, row("      item"));
    }

    #[test]
    fn test_list_after_paragraph_no_filler() {
        let out = convert_str("para\n* item\n", &config()).unwrap();
        assert_eq!(out, [row("    para"), row("      item")].concat());
    }

    #[test]
    fn test_incomplete_default_fails_fast() {
        let config: Config = "[DEFAULT]\nhead = \"\"\n".parse().unwrap();
        assert!(Converter::new(&config).is_err());
    }

    #[test]
    fn test_input_lines_trimmed_of_spaces() {
        let out = convert_str("  spaced  \n", &config()).unwrap();
        assert_eq!(out, row("    spaced"));
    }
}
