use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(what),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        key_line("Ctrl-G / Ctrl-S", 3, "Generate reply"),
        key_line("Ctrl-L", 12, "Clear draft and reply"),
        key_line("Ctrl-Y", 12, "Copy reply to clipboard"),
        key_line("Ctrl-T", 12, "Next tone"),
        key_line("Tab", 15, "Switch focus (email / tone)"),
        key_line("←/→", 15, "Change tone (tone focused)"),
        key_line("Esc", 15, "Dismiss notice / close help"),
        key_line("F1 / Ctrl-H", 7, "Toggle this help"),
        key_line("Ctrl-Q / Ctrl-C", 3, "Quit"),
        Line::from(""),
        Line::from("Editing:"),
        key_line("Enter", 13, "New line"),
        key_line("Backspace", 9, "Delete last character"),
        Line::from(""),
        Line::from("The email and tone can be edited while a reply is being generated;"),
        Line::from("the request in flight keeps the text it was sent with."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
