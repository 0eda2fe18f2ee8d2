use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Model;
use crate::markup::{Segment, plain_text, to_html};

use super::preview::{link_targets, segments_to_line, segments_to_lines};
use super::status::{render_status_bar, render_toast_bar};
use super::style::{abbreviation_style, dim_style, heading_style, selected_style};
use super::{DETAIL_WIDTH_PERCENT, LIST_WIDTH_PERCENT, MAX_ABBREVIATION_WIDTH};

const HELP_LINES: &[(&str, &str)] = &[
    ("j / Down", "next snippet"),
    ("k / Up", "previous snippet"),
    ("g / Home", "first snippet"),
    ("G / End", "last snippet"),
    ("d / Del", "delete selected"),
    ("r", "reload from disk"),
    ("w", "toggle file watching"),
    ("?", "toggle this help"),
    ("q / Esc", "quit"),
];

/// Split the main area into the snippet list and the detail pane.
pub fn split_main_columns(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(LIST_WIDTH_PERCENT),
            Constraint::Percentage(DETAIL_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Draw the whole dashboard.
pub fn render(model: &Model, frame: &mut Frame) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());
    let columns = split_main_columns(rows[0]);

    render_list(model, frame, columns[0]);
    render_detail(model, frame, columns[1]);

    if model.active_toast().is_some() {
        render_toast_bar(model, frame, rows[1]);
    } else {
        render_status_bar(model, frame, rows[1]);
    }

    if model.help_visible {
        render_help(frame, rows[0]);
    }
}

fn render_list(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Snippets ({}) ", model.snippets.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if model.snippets.is_empty() {
        let hint = Paragraph::new("No snippets. Add one with `snipmark add`.").style(dim_style());
        frame.render_widget(hint, inner);
        return;
    }

    let column = model
        .snippets
        .iter()
        .map(|s| s.abbreviation.width())
        .max()
        .unwrap_or(0)
        .min(MAX_ABBREVIATION_WIDTH);

    let visible = usize::from(inner.height);
    let selected = model.selected.unwrap_or(0);
    let offset = selected.saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line<'static>> = model
        .snippets
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, snippet)| {
            let is_selected = model.selected == Some(idx);
            let marker = if is_selected { "> " } else { "  " };
            let mut spans = vec![
                Span::raw(marker),
                Span::styled(pad_to_width(&snippet.abbreviation, column), abbreviation_style()),
                Span::raw("  "),
            ];
            spans.extend(segments_to_line(&model.preview(snippet), Style::default()).spans);
            let line = Line::from(spans);
            if is_selected {
                line.style(selected_style())
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

fn render_detail(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(snippet) = model.selected_snippet() else {
        let block = Block::default().borders(Borders::ALL).title(" Preview ");
        frame.render_widget(block, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", snippet.abbreviation));
    let segments = model.preview(snippet);
    let lines = detail_lines(&segments);
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail_lines(segments: &[Segment]) -> Vec<Line<'static>> {
    let mut lines = segments_to_lines(segments, Style::default());

    let links = link_targets(segments);
    if !links.is_empty() {
        lines.push(Line::default());
        lines.push(Line::styled("Links", heading_style()));
        for (label, target) in links {
            lines.push(Line::from(vec![
                Span::raw(format!("  {label} ")),
                Span::styled(format!("-> {target}"), dim_style()),
            ]));
        }
    }

    lines.push(Line::default());
    lines.push(Line::styled("Plain", heading_style()));
    for text in plain_text(segments).split('\n') {
        lines.push(Line::styled(text.to_string(), dim_style()));
    }

    lines.push(Line::default());
    lines.push(Line::styled("HTML", heading_style()));
    lines.push(Line::styled(to_html(segments), dim_style()));
    lines
}

fn render_help(frame: &mut Frame, area: Rect) {
    let width = 40.min(area.width);
    let height = u16::try_from(HELP_LINES.len() + 2)
        .unwrap_or(u16::MAX)
        .min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let lines: Vec<Line<'static>> = HELP_LINES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!(" {keys:<10}"), abbreviation_style()),
                Span::raw(*action),
            ])
        })
        .collect();
    let help = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Keys "));
    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

/// Pad or truncate to exactly `width` terminal columns.
fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    let truncating = s.width() > width;
    let budget = if truncating { width.saturating_sub(1) } else { width };
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    if truncating && width > 0 {
        out.push('…');
        used += 1;
    }
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}
