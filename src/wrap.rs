//! Fixed-width column wrapping and justification.
//!
//! The help display is a grid of 40-character rows with no line
//! delimiters: fixed width alone tells the viewer where one row ends and
//! the next begins. [`fill`] produces that shape — it substitutes caret
//! escapes, breaks content into 40-column lines honoring an initial and a
//! subsequent indent, and right-pads every line to exactly 40 characters.
//!
//! Widths are measured in chars. A substituted control byte is one char
//! and therefore one column, which is what the target format expects.

use std::collections::VecDeque;

use crate::escape;

/// Width of the help screen in characters.
pub const WIDTH: usize = 40;

/// Wrap `text` into padded 40-character lines.
///
/// `initial` indents the first produced line, `subsequent` every later
/// one. Both indent strings may spell spaces as underscores and may be
/// wrapped in quotes (the surrounding pair is stripped); both are also
/// caret-substituted, as is the content itself. Whitespace runs inside
/// the content are preserved, never collapsed. With `break_on_hyphens`
/// set, hyphenated compounds may break after the hyphen.
///
/// The produced lines are concatenated with no separator. Empty content
/// produces no lines at all.
///
/// # Examples
///
/// ```
/// use mdhelp::wrap::fill;
///
/// let out = fill("hello", "__", "", true);
/// assert_eq!(out, format!("{:<40}", "  hello"));
/// assert_eq!(fill("", "__", "", true), "");
/// ```
pub fn fill(text: &str, initial: &str, subsequent: &str, break_on_hyphens: bool) -> String {
    let initial = prepare_indent(initial);
    let subsequent = prepare_indent(subsequent);
    let content = escape::substitute(text);

    if content.is_empty() {
        return String::new();
    }

    let mut chunks = tokenize(&content, break_on_hyphens);
    let mut output = String::new();
    let mut produced = 0usize;

    while !chunks.is_empty() {
        let indent = if produced == 0 { &initial } else { &subsequent };
        let avail = WIDTH.saturating_sub(indent.chars().count());

        // Whitespace never opens a continuation line.
        if produced > 0 && chunks.front().is_some_and(|c| is_blank(c)) {
            chunks.pop_front();
        }

        let mut line: Vec<&str> = Vec::new();
        let mut line_len = 0;

        while let Some(&chunk) = chunks.front() {
            let len = chunk.chars().count();
            if line_len + len > avail {
                break;
            }
            line.push(chunk);
            line_len += len;
            chunks.pop_front();
        }

        // A chunk wider than the whole line gets hard broken; the head
        // fills out the current line and the tail goes back on the queue.
        if let Some(&chunk) = chunks.front()
            && chunk.chars().count() > avail
        {
            let space_left = if avail == 0 { 1 } else { avail - line_len };
            let split = byte_of_char(chunk, space_left);
            if split > 0 {
                line.push(&chunk[..split]);
            }
            chunks.pop_front();
            if split < chunk.len() {
                chunks.push_front(&chunk[split..]);
            }
        }

        // Trailing whitespace is dropped rather than padded over.
        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }

        if !line.is_empty() {
            let row: String = std::iter::once(indent.as_str()).chain(line).collect();
            output.push_str(&format!("{row:<WIDTH$}"));
            produced += 1;
        }
    }

    output
}

/// Resolve an indent specification into literal indent text.
///
/// Underscores become spaces; a leading quote character strips the
/// surrounding pair; caret escapes are substituted last.
fn prepare_indent(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let unquoted = if spaced.starts_with(['"', '\'']) {
        let mut inner = spaced.chars();
        inner.next();
        inner.next_back();
        inner.as_str()
    } else {
        spaced.as_str()
    };
    escape::substitute(unquoted)
}

fn is_blank(chunk: &str) -> bool {
    chunk.chars().all(char::is_whitespace)
}

/// Byte offset of the `n`th char, or the string length past the end.
fn byte_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// Split content into alternating word and whitespace runs, optionally
/// splitting words after compound-internal hyphens.
fn tokenize(content: &str, break_on_hyphens: bool) -> VecDeque<&str> {
    let mut chunks = VecDeque::new();

    for run in runs(content) {
        if break_on_hyphens && !run.starts_with(char::is_whitespace) {
            split_hyphens(run, &mut chunks);
        } else {
            chunks.push_back(run);
        }
    }

    chunks
}

/// Alternating maximal whitespace / non-whitespace runs.
fn runs(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let blank = rest.starts_with(char::is_whitespace);
        let end = rest
            .char_indices()
            .find(|&(_, c)| c.is_whitespace() != blank)
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(run)
    })
}

/// Split after every hyphen that joins two alphanumerics, so that
/// "screen-layout" may wrap as "screen-" / "layout". Dash runs like "--"
/// are left whole.
fn split_hyphens<'a>(word: &'a str, chunks: &mut VecDeque<&'a str>) {
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut iter = word.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if c == '-'
            && prev.is_some_and(char::is_alphanumeric)
            && iter.peek().is_some_and(|&(_, n)| n.is_alphanumeric())
        {
            chunks.push_back(&word[start..i + 1]);
            start = i + 1;
        }
        prev = Some(c);
    }

    if start < word.len() {
        chunks.push_back(&word[start..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(out: &str) -> Vec<String> {
        let chars: Vec<char> = out.chars().collect();
        assert_eq!(chars.len() % WIDTH, 0, "output is not a multiple of {WIDTH}");
        chars.chunks(WIDTH).map(|c| c.iter().collect()).collect()
    }

    #[test]
    fn test_single_line_padded() {
        let out = fill("hello world", "", "", true);
        assert_eq!(out, format!("{:<40}", "hello world"));
    }

    #[test]
    fn test_empty_content_produces_nothing() {
        assert_eq!(fill("", "      ", "  ", true), "");
    }

    #[test]
    fn test_blank_content_produces_nothing() {
        assert_eq!(fill("   ", "", "", true), "");
    }

    #[test]
    fn test_wraps_at_width() {
        let text = "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii";
        let out = fill(text, "", "", true);
        let rows = lines(&out);
        assert_eq!(rows[0], format!("{:<40}", "aaaa bbbb cccc dddd eeee ffff gggg hhhh"));
        assert_eq!(rows[1], format!("{:<40}", "iiii"));
    }

    #[test]
    fn test_initial_and_subsequent_indents() {
        let text = "one two three four five six seven eight nine ten";
        let out = fill(text, "______", "__", true);
        let rows = lines(&out);
        assert!(rows[0].starts_with("      one"));
        assert!(rows[1].starts_with("  "));
        assert!(!rows[1].starts_with("   "));
    }

    #[test]
    fn test_quoted_indent_stripped() {
        let out = fill("x", "\"  \"", "", true);
        assert_eq!(out, format!("{:<40}", "  x"));
        let out = fill("x", "'_'", "", true);
        assert_eq!(out, format!("{:<40}", " x"));
    }

    #[test]
    fn test_indent_escape_substitution() {
        let out = fill("x", "^A_", "", true);
        assert_eq!(out, format!("{:<40}", "\u{01} x"));
    }

    #[test]
    fn test_content_escape_substitution() {
        let out = fill("see ^Dhere^G", "", "", true);
        assert_eq!(out, format!("{:<40}", "see \u{04}here\u{07}"));
    }

    #[test]
    fn test_whitespace_run_preserved() {
        let out = fill("a    b", "", "", true);
        assert_eq!(out, format!("{:<40}", "a    b"));
    }

    #[test]
    fn test_hyphen_break_enabled() {
        // "fixed-" fits on the first line only when the compound may split.
        let text = format!("{} fixed-width", "x".repeat(30));
        let out = fill(&text, "", "", true);
        let rows = lines(&out);
        assert_eq!(rows[0], format!("{:<40}", format!("{} fixed-", "x".repeat(30))));
        assert_eq!(rows[1], format!("{:<40}", "width"));
    }

    #[test]
    fn test_hyphen_break_disabled() {
        let text = format!("{} fixed-width", "x".repeat(30));
        let out = fill(&text, "", "", false);
        let rows = lines(&out);
        assert_eq!(rows[0], format!("{:<40}", "x".repeat(30)));
        assert_eq!(rows[1], format!("{:<40}", "fixed-width"));
    }

    #[test]
    fn test_dash_run_not_split() {
        let out = fill("a--b", "", "", true);
        assert_eq!(out, format!("{:<40}", "a--b"));
    }

    #[test]
    fn test_long_word_hard_break() {
        let word = "w".repeat(50);
        let out = fill(&word, "", "", true);
        let rows = lines(&out);
        assert_eq!(rows[0], "w".repeat(40));
        assert_eq!(rows[1], format!("{:<40}", "w".repeat(10)));
    }

    #[test]
    fn test_long_word_fills_partial_line() {
        let word = "w".repeat(45);
        let out = fill(&format!("ab {word}"), "", "", true);
        let rows = lines(&out);
        assert_eq!(rows[0], format!("ab {}", "w".repeat(37)));
        assert_eq!(rows[1], format!("{:<40}", "w".repeat(8)));
    }

    #[test]
    fn test_oversized_indent_still_advances() {
        // A pathological indent as wide as the screen still makes
        // progress: one content char rides past the padding per row.
        let indent = "_".repeat(WIDTH);
        let out = fill("abc", &indent, &indent, true);
        assert_eq!(out.chars().count(), 3 * (WIDTH + 1));
        assert!(out.starts_with(&format!("{}a", " ".repeat(WIDTH))));
    }

    #[test]
    fn test_every_line_exactly_width() {
        let text = "The quick brown fox jumps over the lazy dog again and again until done.";
        for row in lines(&fill(text, "____", "__", true)) {
            assert_eq!(row.chars().count(), WIDTH);
        }
    }
}
