//! Hand-written scanner for the inline snippet markup.
//!
//! At each position the scanner tries bold, then link, then italic; the first
//! form that matches wins and the cursor jumps past it. Bold and italic
//! content is re-scanned recursively, as is a link label. Anything that never
//! matches stays literal text.

use super::types::Segment;

/// Default nesting limit for recursive re-scanning.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Knobs for [`render_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Nesting level at which content is kept literal instead of re-scanned.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A matched span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    start: usize,
    end: usize,
    kind: TokenKind<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind<'a> {
    Bold(&'a str),
    Link { label: &'a str, target: &'a str },
    Italic(&'a str),
}

/// Render snippet markup into a segment tree.
///
/// Never fails: malformed markup comes back as literal text, and input
/// without any markup yields a single `Text` segment holding the whole
/// source (including the empty string).
///
/// # Example
///
/// ```
/// use snipmark::markup::{render, Segment};
///
/// let segments = render("a **b** c");
/// assert_eq!(
///     segments,
///     vec![
///         Segment::text("a "),
///         Segment::bold(vec![Segment::text("b")]),
///         Segment::text(" c"),
///     ]
/// );
/// ```
pub fn render(source: &str) -> Vec<Segment> {
    render_with_options(source, &RenderOptions::default())
}

/// Render with an explicit nesting limit.
///
/// Content reached at `max_depth` is emitted as one literal `Text` segment.
pub fn render_with_options(source: &str, options: &RenderOptions) -> Vec<Segment> {
    render_at_depth(source, 0, options.max_depth)
}

/// Returns true if the source holds at least one complete bold, italic, or
/// link token.
pub fn has_formatting(source: &str) -> bool {
    next_token(source, 0).is_some()
}

fn render_at_depth(source: &str, depth: usize, max_depth: usize) -> Vec<Segment> {
    if depth >= max_depth {
        if has_formatting(source) {
            tracing::debug!(depth, "markup nesting limit reached, keeping content literal");
        }
        return vec![Segment::text(source)];
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    while let Some(token) = next_token(source, cursor) {
        if token.start > cursor {
            segments.push(Segment::text(&source[cursor..token.start]));
        }
        let segment = match token.kind {
            TokenKind::Bold(content) => {
                Segment::bold(render_at_depth(content, depth + 1, max_depth))
            }
            TokenKind::Italic(content) => {
                Segment::italic(render_at_depth(content, depth + 1, max_depth))
            }
            TokenKind::Link { label, target } => {
                Segment::link(render_at_depth(label, depth + 1, max_depth), target)
            }
        };
        segments.push(segment);
        cursor = token.end;
    }

    if cursor < source.len() || segments.is_empty() {
        segments.push(Segment::text(&source[cursor..]));
    }
    segments
}

/// Find the leftmost token starting at or after `from`.
///
/// All delimiters are ASCII, so byte offsets found here always sit on char
/// boundaries.
fn next_token(source: &str, from: usize) -> Option<Token<'_>> {
    let bytes = source.as_bytes();
    let mut pos = from;
    while pos < bytes.len() {
        let at = pos + bytes[pos..]
            .iter()
            .position(|&b| b == b'*' || b == b'[')?;
        let token = match_bold(source, at)
            .or_else(|| match_link(source, at))
            .or_else(|| match_italic(source, at));
        if token.is_some() {
            return token;
        }
        pos = at + 1;
    }
    None
}

/// `**` + shortest non-empty single-line content + `**`.
fn match_bold(source: &str, at: usize) -> Option<Token<'_>> {
    let bytes = source.as_bytes();
    if !bytes[at..].starts_with(b"**") {
        return None;
    }
    let content_start = at + 2;
    if bytes.get(content_start).is_none_or(|&b| b == b'\n') {
        return None;
    }
    let mut close = content_start + 1;
    while close < bytes.len() {
        if bytes[close..].starts_with(b"**") {
            return Some(Token {
                start: at,
                end: close + 2,
                kind: TokenKind::Bold(&source[content_start..close]),
            });
        }
        if bytes[close] == b'\n' {
            return None;
        }
        close += 1;
    }
    None
}

/// `[` + label without `]` + `](` + target without `)` + `)`.
fn match_link(source: &str, at: usize) -> Option<Token<'_>> {
    let bytes = source.as_bytes();
    if bytes[at] != b'[' {
        return None;
    }
    let label_start = at + 1;
    let label_end = label_start + bytes[label_start..].iter().position(|&b| b == b']')?;
    if label_end == label_start || bytes.get(label_end + 1) != Some(&b'(') {
        return None;
    }
    let target_start = label_end + 2;
    let target_end = target_start + bytes[target_start..].iter().position(|&b| b == b')')?;
    if target_end == target_start {
        return None;
    }
    Some(Token {
        start: at,
        end: target_end + 1,
        kind: TokenKind::Link {
            label: &source[label_start..label_end],
            target: &source[target_start..target_end],
        },
    })
}

/// A lone `*` on both sides of shortest non-empty single-line content.
///
/// Neither delimiter may touch another `*`, which keeps italics from forming
/// inside or across bold markers.
fn match_italic(source: &str, at: usize) -> Option<Token<'_>> {
    let bytes = source.as_bytes();
    if bytes[at] != b'*' || (at > 0 && bytes[at - 1] == b'*') {
        return None;
    }
    let content_start = at + 1;
    match bytes.get(content_start) {
        None | Some(b'*' | b'\n') => return None,
        Some(_) => {}
    }
    let mut close = content_start + 1;
    while close < bytes.len() {
        match bytes[close] {
            b'\n' => return None,
            b'*' if bytes[close - 1] != b'*' && bytes.get(close + 1) != Some(&b'*') => {
                return Some(Token {
                    start: at,
                    end: close + 1,
                    kind: TokenKind::Italic(&source[content_start..close]),
                });
            }
            _ => {}
        }
        close += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Segment {
        Segment::text(value)
    }

    #[test]
    fn test_render_plain_text_is_single_segment() {
        assert_eq!(render("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn test_render_empty_source() {
        assert_eq!(render(""), vec![text("")]);
    }

    #[test]
    fn test_render_bold() {
        assert_eq!(render("**hello**"), vec![Segment::bold(vec![text("hello")])]);
    }

    #[test]
    fn test_render_italic() {
        assert_eq!(render("*hi*"), vec![Segment::italic(vec![text("hi")])]);
    }

    #[test]
    fn test_render_link() {
        assert_eq!(
            render("[click](http://x.com)"),
            vec![Segment::link(vec![text("click")], "http://x.com")]
        );
    }

    #[test]
    fn test_render_keeps_surrounding_text() {
        assert_eq!(
            render("a **b** c"),
            vec![text("a "), Segment::bold(vec![text("b")]), text(" c")]
        );
    }

    #[test]
    fn test_render_link_inside_bold() {
        assert_eq!(
            render("**[go](http://x.com)**"),
            vec![Segment::bold(vec![Segment::link(
                vec![text("go")],
                "http://x.com"
            )])]
        );
    }

    #[test]
    fn test_render_italic_inside_link_label() {
        assert_eq!(
            render("[*docs*](http://x.com/a*b*c)"),
            vec![Segment::link(
                vec![Segment::italic(vec![text("docs")])],
                "http://x.com/a*b*c"
            )]
        );
    }

    #[test]
    fn test_render_unclosed_bold_is_literal() {
        assert_eq!(render("**unclosed"), vec![text("**unclosed")]);
    }

    #[test]
    fn test_render_empty_markers_are_literal() {
        assert_eq!(render("****"), vec![text("****")]);
        assert_eq!(render("[]()"), vec![text("[]()")]);
        assert_eq!(render("**"), vec![text("**")]);
        assert_eq!(render("[label]()"), vec![text("[label]()")]);
    }

    #[test]
    fn test_bold_is_lazy() {
        assert_eq!(
            render("**a** and **b**"),
            vec![
                Segment::bold(vec![text("a")]),
                text(" and "),
                Segment::bold(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn test_bold_claims_inner_single_star() {
        assert_eq!(render("**a*b**"), vec![Segment::bold(vec![text("a*b")])]);
    }

    #[test]
    fn test_star_next_to_star_never_opens_italic() {
        assert_eq!(render("**x*"), vec![text("**x*")]);
    }

    #[test]
    fn test_italic_does_not_close_on_double_star() {
        assert_eq!(
            render("*a**b*"),
            vec![Segment::italic(vec![text("a**b")])]
        );
    }

    #[test]
    fn test_italic_after_bold_close_is_literal() {
        // The lone star right after a bold close is preceded by `*`.
        assert_eq!(
            render("**a***b*"),
            vec![Segment::bold(vec![text("a")]), text("*b*")]
        );
    }

    #[test]
    fn test_bold_does_not_span_lines() {
        assert_eq!(render("**a\nb**"), vec![text("**a\nb**")]);
        assert_eq!(render("*a\nb*"), vec![text("*a\nb*")]);
    }

    #[test]
    fn test_link_label_may_span_lines() {
        assert_eq!(
            render("[a\nb](t)"),
            vec![Segment::link(vec![text("a\nb")], "t")]
        );
    }

    #[test]
    fn test_link_label_stops_at_first_close_bracket() {
        assert_eq!(
            render("[a [b](c)"),
            vec![Segment::link(vec![text("a [b")], "c")]
        );
        assert_eq!(
            render("[a] [b](c)"),
            vec![text("[a] "), Segment::link(vec![text("b")], "c")]
        );
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(
            render("¡**héllo**! *日本*"),
            vec![
                text("¡"),
                Segment::bold(vec![text("héllo")]),
                text("! "),
                Segment::italic(vec![text("日本")]),
            ]
        );
    }

    #[test]
    fn test_depth_limit_keeps_content_literal() {
        let options = RenderOptions::default().with_max_depth(1);
        assert_eq!(
            render_with_options("**a *b* c**", &options),
            vec![Segment::bold(vec![text("a *b* c")])]
        );
        let options = RenderOptions::default().with_max_depth(0);
        assert_eq!(render_with_options("**a**", &options), vec![text("**a**")]);
    }

    #[test]
    fn test_three_level_nesting() {
        let source = "[*a **b** c*](t)";
        assert_eq!(
            render(source),
            vec![Segment::link(
                vec![Segment::italic(vec![
                    text("a "),
                    Segment::bold(vec![text("b")]),
                    text(" c"),
                ])],
                "t"
            )]
        );

        let options = RenderOptions::default().with_max_depth(2);
        assert_eq!(
            render_with_options(source, &options),
            vec![Segment::link(
                vec![Segment::italic(vec![text("a **b** c")])],
                "t"
            )]
        );
    }

    #[test]
    fn test_has_formatting() {
        assert!(!has_formatting(""));
        assert!(!has_formatting("plain text"));
        assert!(!has_formatting("**unclosed"));
        assert!(has_formatting("some **bold** text"));
        assert!(has_formatting("an *italic* word"));
        assert!(has_formatting("[link](http://x.com)"));
    }
}
