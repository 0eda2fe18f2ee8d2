//! HTML output for the rich clipboard payload.

use super::types::Segment;

/// Render segments as an HTML fragment.
///
/// Literal text is escaped and line feeds become `<br>`, so the fragment can
/// be placed on a pasteboard as-is. Link targets are attribute-escaped but
/// otherwise untouched.
pub fn to_html(segments: &[Segment]) -> String {
    let mut out = String::new();
    write_segments(segments, &mut out);
    out
}

fn write_segments(segments: &[Segment], out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Text { value } => push_escaped(value, out),
            Segment::Bold { children } => {
                out.push_str("<b>");
                write_segments(children, out);
                out.push_str("</b>");
            }
            Segment::Italic { children } => {
                out.push_str("<i>");
                write_segments(children, out);
                out.push_str("</i>");
            }
            Segment::Link { label, target } => {
                out.push_str("<a href=\"");
                push_escaped_attr(target, out);
                out.push_str("\">");
                write_segments(label, out);
                out.push_str("</a>");
            }
        }
    }
}

fn push_escaped(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(ch),
        }
    }
}

fn push_escaped_attr(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            _ => out.push(ch),
        }
    }
}
