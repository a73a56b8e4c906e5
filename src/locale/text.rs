//! Markup escaping and file name sanitizing.

use std::sync::OnceLock;

use regex::Regex;

/// Formatting tags passed through to the layout engine verbatim.
const PRESERVED_TAGS: [&str; 6] = ["<b>", "</b>", "<i>", "</i>", "<u>", "</u>"];

/// Escape `&`, `<`, `>`, `"` and `'` while keeping the bold, italic and
/// underline tags intact.
pub fn escape_preserving_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 16);
    let mut rest = raw;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '<' {
            for tag in PRESERVED_TAGS {
                if rest.starts_with(tag) {
                    out.push_str(tag);
                    rest = &rest[tag.len()..];
                    continue 'outer;
                }
            }
        }
        push_escaped(&mut out, c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Escape a value for use inside a quoted markup attribute.
pub fn escape_attribute(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        push_escaped(&mut out, c);
    }
    out
}

/// Escape rich text and turn newlines into `<br/>` tags.
pub fn rich_text(raw: &str) -> String {
    escape_preserving_tags(&raw.replace("\r\n", "\n")).replace('\n', "<br/>")
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&apos;"),
        _ => out.push(c),
    }
}

fn unsafe_filename_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid filename pattern"))
}

/// Reduce a value to a safe file name component.
///
/// Runs of characters outside `[A-Za-z0-9._-]` become `_`, and leading or
/// trailing `.`, `_` and `-` are stripped. Returns `fallback` when nothing
/// remains.
pub fn sanitize_filename_component(raw: &str, fallback: &str) -> String {
    let replaced = unsafe_filename_chars().replace_all(raw.trim(), "_");
    let trimmed = replaced.trim_matches(|c| matches!(c, '.' | '_' | '-'));
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_preserves_formatting_tags() {
        assert_eq!(
            escape_preserving_tags("<b>R&D</b> <i>lead</i> <u>x</u>"),
            "<b>R&amp;D</b> <i>lead</i> <u>x</u>"
        );
    }

    #[test]
    fn test_escape_other_tags_and_quotes() {
        assert_eq!(
            escape_preserving_tags("<script>\"a\" 'b'</script>"),
            "&lt;script&gt;&quot;a&quot; &apos;b&apos;&lt;/script&gt;"
        );
        assert_eq!(escape_preserving_tags("a < b"), "a &lt; b");
    }

    #[test]
    fn test_rich_text_line_breaks() {
        assert_eq!(rich_text("one\ntwo\r\nthree"), "one<br/>two<br/>three");
        assert_eq!(rich_text("a <br/> b"), "a &lt;br/&gt; b");
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(
            escape_attribute("https://x.dev/?a=1&b='2'"),
            "https://x.dev/?a=1&amp;b=&apos;2&apos;"
        );
    }

    #[test]
    fn test_sanitize_filename_component() {
        assert_eq!(sanitize_filename_component("Ana Souza", "CV"), "Ana_Souza");
        assert_eq!(sanitize_filename_component("../etc/passwd", "CV"), "etc_passwd");
        assert_eq!(sanitize_filename_component("João Silva", "CV"), "Jo_o_Silva");
        assert_eq!(sanitize_filename_component("  ...  ", "CV"), "CV");
        assert_eq!(sanitize_filename_component("", "Role"), "Role");
    }
}
