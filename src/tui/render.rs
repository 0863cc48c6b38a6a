use super::{Focus, UiState};
use crate::model::Tone;
use crate::view::state::NoticeKind;
use crate::view::RequestStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const ACCENT: Color = Color::Rgb(129, 140, 248);
const SUCCESS: Color = Color::Rgb(134, 239, 172);
const ERROR: Color = Color::Rgb(252, 165, 165);

pub fn draw(area: Rect, f: &mut Frame, ui: &UiState) {
    let state = ui.controller.state();

    let mut constraints = vec![
        Constraint::Length(3), // header
        Constraint::Min(6),    // email editor
        Constraint::Length(3), // tone selector
        Constraint::Length(3), // actions
    ];
    if state.error_message().is_some() {
        constraints.push(Constraint::Length(3));
    }
    if state.reply().is_some() {
        constraints.push(Constraint::Min(6));
    }
    constraints.push(Constraint::Length(1)); // notice / hints

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    draw_header(rows[0], f);

    if ui.show_help {
        let body = Rect {
            height: area.height.saturating_sub(rows[0].height),
            ..rows[1]
        };
        super::help::draw_help(body, f);
        return;
    }

    draw_editor(rows[1], f, ui);
    draw_tone(rows[2], f, ui);
    draw_actions(rows[3], f, ui);

    let mut next = 4;
    if let Some(err) = state.error_message() {
        let banner = Paragraph::new(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(ERROR),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        );
        f.render_widget(banner, rows[next]);
        next += 1;
    }
    if let Some(reply) = state.reply() {
        let panel = Paragraph::new(reply.to_string())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(SUCCESS))
                    .title(Line::from(vec![
                        Span::styled("Generated Reply", Style::default().fg(SUCCESS)),
                        Span::raw(" "),
                        Span::styled("[AI Generated]", Style::default().fg(Color::DarkGray)),
                    ])),
            );
        f.render_widget(panel, rows[next]);
        next += 1;
    }

    draw_footer(rows[next], f, ui);
}

fn draw_header(area: Rect, f: &mut Frame) {
    let title = Line::from(vec![
        Span::styled(
            "AI Email Writer",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Powered by Groq AI", Style::default().fg(Color::DarkGray)),
    ]);
    let p = Paragraph::new(Line::from(
        "Paste any email and get an AI-crafted reply in seconds",
    ))
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn draw_editor(area: Rect, f: &mut Frame, ui: &UiState) {
    let content = &ui.controller.state().draft().email_content;
    let focused = ui.focus == Focus::Email;

    let mut text = if content.is_empty() && !focused {
        vec![Line::from(Span::styled(
            "Paste the email you want to reply to...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        content.split('\n').map(|l| Line::from(l.to_string())).collect()
    };
    if focused {
        match text.last_mut() {
            Some(last) => last.push_span(Span::styled("▏", Style::default().fg(Color::Yellow))),
            None => text.push(Line::from("▏")),
        }
    }

    let p = Paragraph::new(text).wrap(Wrap { trim: false });
    // Keep the cursor row visible once the email outgrows the box.
    let scroll = wrapped_scroll(&p, area.width.saturating_sub(2), area.height.saturating_sub(2));

    let p = p.scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(focused))
            .title("Original Email"),
    );
    f.render_widget(p, area);
}

/// Rows to scroll so the last wrapped row of `p` sits at the bottom of a
/// `width` x `height` box. `p` must not carry a block yet.
fn wrapped_scroll(p: &Paragraph, width: u16, height: u16) -> u16 {
    let rows = p.line_count(width.max(1));
    u16::try_from(rows.saturating_sub(height as usize)).unwrap_or(u16::MAX)
}

fn draw_tone(area: Rect, f: &mut Frame, ui: &UiState) {
    let selected = ui.controller.state().draft().tone;
    let focused = ui.focus == Focus::Tone;

    let mut spans = Vec::new();
    for (i, tone) in Tone::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *tone == selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", tone.label()), style));
    }

    let p = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(focused))
            .title("Reply Tone"),
    );
    f.render_widget(p, area);
}

fn draw_actions(area: Rect, f: &mut Frame, ui: &UiState) {
    let state = ui.controller.state();
    let pending = state.status() == RequestStatus::Pending;

    let generate_label = if pending {
        "Generating..."
    } else {
        "Generate Reply"
    };
    let generate_style = if state.can_submit() {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let copy_style = if state.can_copy() {
        Style::default().fg(SUCCESS)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let copy_label = if state.clipboard_notice() {
        " Copied! "
    } else {
        " Copy to Clipboard "
    };

    let line = Line::from(vec![
        Span::styled(format!(" {generate_label} "), generate_style),
        Span::styled(" (Ctrl-G)", Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        Span::styled(" Clear ", Style::default().fg(ACCENT)),
        Span::styled("(Ctrl-L)", Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        Span::styled(copy_label, copy_style),
        Span::styled("(Ctrl-Y)", Style::default().fg(Color::DarkGray)),
    ]);
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_footer(area: Rect, f: &mut Frame, ui: &UiState) {
    let line = match ui.controller.state().notice() {
        Some(n) => {
            let color = match n.kind {
                NoticeKind::Copied => SUCCESS,
                NoticeKind::CopyFailed => ERROR,
            };
            Line::from(Span::styled(
                n.kind.message(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(Span::styled(
            "F1 help · Ctrl-Q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
