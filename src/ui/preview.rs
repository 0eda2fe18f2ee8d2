//! Segment trees as styled terminal text.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::markup::{Segment, plain_text};

use super::style::{dim_style, style_for_segment};

/// Marker shown in place of a line break in single-line previews.
pub const LINE_BREAK_MARKER: &str = " ↵ ";

/// Styled lines for a full preview. Line feeds inside text start new lines.
pub fn segments_to_lines(segments: &[Segment], base: Style) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    push_spans(segments, base, &mut lines);
    lines
}

/// A single styled line; line breaks become [`LINE_BREAK_MARKER`].
pub fn segments_to_line(segments: &[Segment], base: Style) -> Line<'static> {
    let mut out = Line::default();
    for (i, line) in segments_to_lines(segments, base).into_iter().enumerate() {
        if i > 0 {
            out.spans.push(Span::styled(LINE_BREAK_MARKER, dim_style()));
        }
        out.spans.extend(line.spans);
    }
    out
}

fn push_spans(segments: &[Segment], style: Style, lines: &mut Vec<Line<'static>>) {
    for segment in segments {
        match segment {
            Segment::Text { value } => {
                for (i, part) in value.split('\n').enumerate() {
                    if i > 0 {
                        lines.push(Line::default());
                    }
                    if !part.is_empty()
                        && let Some(line) = lines.last_mut()
                    {
                        line.spans.push(Span::styled(part.to_string(), style));
                    }
                }
            }
            _ => push_spans(segment.children(), style_for_segment(style, segment), lines),
        }
    }
}

/// `(label text, target)` for every link, in document order.
pub fn link_targets(segments: &[Segment]) -> Vec<(String, String)> {
    let mut out = Vec::new();
    collect_links(segments, &mut out);
    out
}

fn collect_links(segments: &[Segment], out: &mut Vec<(String, String)>) {
    for segment in segments {
        match segment {
            Segment::Link { label, target } => {
                out.push((plain_text(label), target.clone()));
                collect_links(label, out);
            }
            Segment::Text { .. } => {}
            _ => collect_links(segment.children(), out),
        }
    }
}
