//! Property tests for the markup engine.

use proptest::prelude::*;
use snipmark::markup::{
    RenderOptions, Segment, has_formatting, plain_text, render, render_with_options,
    segments_have_formatting, to_html,
};

fn max_nesting(segments: &[Segment]) -> usize {
    segments
        .iter()
        .map(|s| match s {
            Segment::Text { .. } => 0,
            _ => 1 + max_nesting(s.children()),
        })
        .max()
        .unwrap_or(0)
}

/// Wrap `word` in the markup form picked by `kind`.
fn wrap(kind: u8, word: &str) -> String {
    match kind {
        0 => format!("**{word}**"),
        1 => format!("*{word}*"),
        2 => format!("[{word}](https://example.com/{kind})"),
        _ => word.to_string(),
    }
}

proptest! {
    #[test]
    fn plain_text_of_formatted_input_keeps_every_word(
        pieces in prop::collection::vec((0u8..4, "[a-z ]{1,6}"), 0..8)
    ) {
        let source = pieces
            .iter()
            .map(|(kind, word)| wrap(*kind, word))
            .collect::<Vec<_>>()
            .join(" ");
        let expected = pieces
            .iter()
            .map(|(_, word)| word.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let segments = render(&source);

        prop_assert_eq!(plain_text(&segments), expected);
        prop_assert_eq!(
            segments_have_formatting(&segments),
            pieces.iter().any(|(kind, _)| *kind < 3)
        );
    }

    #[test]
    fn text_without_markup_chars_is_one_text_segment(s in "[^*\\[\\]]*") {
        prop_assert_eq!(render(&s), vec![Segment::text(s.clone())]);
        prop_assert!(!has_formatting(&s));
    }

    #[test]
    fn plain_text_of_unformatted_input_is_identity(s in "[a-zA-Z0-9 ,.!?\n]*") {
        prop_assert_eq!(plain_text(&render(&s)), s);
    }

    #[test]
    fn has_formatting_agrees_with_render(s in "[ab*\\[\\]()\n ]{0,24}") {
        prop_assert_eq!(has_formatting(&s), segments_have_formatting(&render(&s)));
    }

    #[test]
    fn render_never_panics_and_never_grows_text(s in "\\PC{0,64}") {
        let segments = render(&s);
        prop_assert!(!segments.is_empty());
        prop_assert!(plain_text(&segments).len() <= s.len());
        let _ = to_html(&segments);
    }

    #[test]
    fn depth_limit_bounds_nesting(s in "[a*\\[\\]()]{0,32}", depth in 0usize..4) {
        let segments = render_with_options(&s, &RenderOptions::default().with_max_depth(depth));
        prop_assert!(max_nesting(&segments) <= depth);
    }

    #[test]
    fn html_never_leaks_raw_angle_brackets(s in "[a<>&*]{0,24}") {
        let html = to_html(&render(&s));
        let stripped = html
            .replace("<b>", "")
            .replace("</b>", "")
            .replace("<i>", "")
            .replace("</i>", "");
        prop_assert!(!stripped.contains('<'));
        prop_assert!(!stripped.contains('>'));
    }
}
