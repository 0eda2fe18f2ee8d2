//! Segment tree produced by the markup engine.

use serde::Serialize;

/// One node of a rendered snippet preview.
///
/// `Text` holds literal content. The styled variants hold their recursively
/// parsed children; a link's target is stored verbatim and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Literal content, rendered verbatim
    Text { value: String },
    /// Strong emphasis (`**x**`)
    Bold { children: Vec<Segment> },
    /// Emphasis (`*x*`)
    Italic { children: Vec<Segment> },
    /// Hyperlink (`[label](target)`)
    Link { label: Vec<Segment>, target: String },
}

impl Segment {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub const fn bold(children: Vec<Self>) -> Self {
        Self::Bold { children }
    }

    pub const fn italic(children: Vec<Self>) -> Self {
        Self::Italic { children }
    }

    pub fn link(label: Vec<Self>, target: impl Into<String>) -> Self {
        Self::Link {
            label,
            target: target.into(),
        }
    }

    /// Children of a styled segment, or the label of a link.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Text { .. } => &[],
            Self::Bold { children } | Self::Italic { children } => children,
            Self::Link { label, .. } => label,
        }
    }

    /// Returns true for every variant except `Text`.
    pub const fn is_styled(&self) -> bool {
        !matches!(self, Self::Text { .. })
    }

    /// Returns true if this segment or any descendant is styled.
    pub fn contains_formatting(&self) -> bool {
        self.is_styled() || segments_have_formatting(self.children())
    }

    /// Append the literal text of this segment (delimiters and link targets
    /// removed) to `out`.
    pub fn push_plain_text(&self, out: &mut String) {
        match self {
            Self::Text { value } => out.push_str(value),
            _ => {
                for child in self.children() {
                    child.push_plain_text(out);
                }
            }
        }
    }
}

/// Returns true if any segment in the slice is styled at any depth.
pub fn segments_have_formatting(segments: &[Segment]) -> bool {
    segments.iter().any(Segment::contains_formatting)
}

/// Flatten segments to their literal text.
///
/// This is the plain-text payload pasted next to the rich one: bold and
/// italic markers vanish and links collapse to their label.
pub fn plain_text(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        segment.push_plain_text(&mut out);
    }
    out
}
