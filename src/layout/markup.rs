//! Inline markup parsing.
//!
//! Paragraph markup is a small XML-like dialect:
//!
//! - `<b>`, `<i>` (and `<strong>`, `<em>`) toggle emphasis
//! - `<br/>` forces a line break
//! - `<a href=".." color="..">` colors its text; `href` is not rendered
//! - `<u>` is accepted and has no effect
//! - `&amp; &lt; &gt; &quot; &apos;` and numeric references are decoded
//!
//! Unknown tags are dropped. Unbalanced closing tags are ignored.

use std::sync::OnceLock;

use regex::Regex;

use crate::style::Color;

/// Emphasis state of a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    /// Color of the innermost `<a>` that sets one
    pub color: Option<Color>,
}

/// One parsed piece of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text { text: String, style: InlineStyle },
    LineBreak,
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<\s*(/?)\s*([a-z]+)((?:\s+[a-z_-]+\s*=\s*(?:'[^']*'|\x22[^\x22]*\x22))*)\s*(/?)\s*>")
            .expect("valid tag pattern")
    })
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)([a-z_-]+)\s*=\s*(?:'([^']*)'|"([^"]*)")"#).expect("valid attribute pattern")
    })
}

#[derive(Default)]
struct State {
    bold: usize,
    italic: usize,
    links: Vec<Option<Color>>,
}

impl State {
    fn style(&self) -> InlineStyle {
        InlineStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            color: self.links.iter().rev().find_map(|color| *color),
        }
    }
}

/// Parse paragraph markup into text runs and line breaks.
///
/// Adjacent text with identical style is merged into one run.
pub fn parse(markup: &str) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::new();
    let mut state = State::default();
    let mut last = 0;

    for captures in tag_pattern().captures_iter(markup) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        push_text(&mut out, &markup[last..whole.start()], &state);
        last = whole.end();

        let closing = !captures[1].is_empty();
        let name = captures[2].to_ascii_lowercase();
        let attributes = captures.get(3).map_or("", |m| m.as_str());

        match (name.as_str(), closing) {
            ("br", _) => out.push(Inline::LineBreak),
            ("b" | "strong", false) => state.bold += 1,
            ("b" | "strong", true) => state.bold = state.bold.saturating_sub(1),
            ("i" | "em", false) => state.italic += 1,
            ("i" | "em", true) => state.italic = state.italic.saturating_sub(1),
            ("u", _) => {}
            ("a", false) => state.links.push(link_color(attributes)),
            ("a", true) => {
                state.links.pop();
            }
            (other, _) => log::debug!("Ignoring unsupported markup tag <{}>", other),
        }
    }
    push_text(&mut out, &markup[last..], &state);

    out
}

fn link_color(attributes: &str) -> Option<Color> {
    attribute_pattern()
        .captures_iter(attributes)
        .filter(|captures| captures[1].eq_ignore_ascii_case("color"))
        .find_map(|captures| {
            let value = captures.get(2).or_else(|| captures.get(3))?;
            Color::parse(&decode_entities(value.as_str())).ok()
        })
}

fn push_text(out: &mut Vec<Inline>, raw: &str, state: &State) {
    if raw.is_empty() {
        return;
    }
    let text = decode_entities(raw);
    let style = state.style();

    if let Some(Inline::Text {
        text: previous,
        style: previous_style,
    }) = out.last_mut()
    {
        if *previous_style == style {
            previous.push_str(&text);
            return;
        }
    }
    out.push(Inline::Text { text, style });
}

/// Decode the XML entities and numeric character references. Unknown
/// entities are kept verbatim.
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, end))
        });

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Visible text of a markup string; `<br/>` becomes a newline.
pub fn plain_text(markup: &str) -> String {
    parse(markup)
        .into_iter()
        .map(|inline| match inline {
            Inline::Text { text, .. } => text,
            Inline::LineBreak => "\n".to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(inlines: &[Inline]) -> Vec<(&str, bool, bool)> {
        inlines
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text { text, style } => Some((text.as_str(), style.bold, style.italic)),
                Inline::LineBreak => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_emphasis() {
        let inlines = parse("<b>Senior Dev</b> at <i>Acme <b>Corp</b></i>");
        assert_eq!(
            texts(&inlines),
            vec![
                ("Senior Dev", true, false),
                (" at ", false, false),
                ("Acme ", false, true),
                ("Corp", true, true),
            ]
        );
    }

    #[test]
    fn test_parse_line_breaks_and_entities() {
        let inlines = parse("R&amp;D<br/>Ops &lt;3 &#233;&#x41;");
        assert_eq!(inlines.len(), 3);
        assert_eq!(inlines[1], Inline::LineBreak);
        assert_eq!(plain_text("R&amp;D<br/>Ops &lt;3 &#233;&#x41;"), "R&D\nOps <3 éA");
    }

    #[test]
    fn test_parse_link_color() {
        let inlines = parse(r##"<a href="https://github.com/ana?a=1&amp;b=2" color="#1f4e79">GitHub</a> | x"##);
        match &inlines[0] {
            Inline::Text { text, style } => {
                assert_eq!(text, "GitHub");
                assert_eq!(style.color, Some(Color::rgb(0x1f, 0x4e, 0x79)));
            }
            other => panic!("unexpected inline: {other:?}"),
        }
        match &inlines[1] {
            Inline::Text { style, .. } => assert_eq!(style.color, None),
            other => panic!("unexpected inline: {other:?}"),
        }
        assert_eq!(plain_text("<u>x</u><a href='y'>z</a>"), "xz");
    }

    #[test]
    fn test_unbalanced_and_unknown_tags() {
        assert_eq!(plain_text("</b>plain<font size=\"3\">x</font>"), "plainx");
        assert_eq!(plain_text("a &unknown; b & c"), "a &unknown; b & c");
    }

    #[test]
    fn test_merges_runs() {
        let inlines = parse("a<x>b</x>c");
        assert_eq!(inlines.len(), 1);
    }
}
