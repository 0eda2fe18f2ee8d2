//! Inline snippet markup.
//!
//! Snippet expansions may carry a small markdown-like syntax:
//! - `**bold**`
//! - `*italic*`
//! - `[label](target)`
//!
//! [`render`] turns a source string into a [`Segment`] tree for previews,
//! [`to_html`] and [`plain_text`] build the two clipboard payloads used when
//! a formatted snippet is pasted.

mod html;
mod parser;
mod types;

use std::fmt::Write as _;

pub use html::to_html;
pub use parser::{DEFAULT_MAX_DEPTH, RenderOptions, has_formatting, render, render_with_options};
pub use types::{Segment, plain_text, segments_have_formatting};

/// Plain-text payload of a markup source.
pub fn strip_markup(source: &str) -> String {
    plain_text(&render(source))
}

/// Render an indented debug tree of segments, one node per line.
pub fn format_tree(segments: &[Segment]) -> String {
    let mut out = String::new();
    write_tree(segments, 0, &mut out);
    out
}

fn write_tree(segments: &[Segment], indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    for segment in segments {
        match segment {
            Segment::Text { value } => {
                let _ = writeln!(out, "{pad}Text {value:?}");
            }
            Segment::Bold { children } => {
                let _ = writeln!(out, "{pad}Bold");
                write_tree(children, indent + 1, out);
            }
            Segment::Italic { children } => {
                let _ = writeln!(out, "{pad}Italic");
                write_tree(children, indent + 1, out);
            }
            Segment::Link { label, target } => {
                let _ = writeln!(out, "{pad}Link {target:?}");
                write_tree(label, indent + 1, out);
            }
        }
    }
}
