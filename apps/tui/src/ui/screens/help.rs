use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const SHORTCUTS: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Move between search, categories, facts and maps"),
    ("typing", "Search; results update after a short pause"),
    ("Enter (search)", "Search immediately"),
    ("Esc (search)", "Clear the search"),
    ("↑/↓, j/k", "Move within a list"),
    ("Enter / Space", "Pick a category, expand a fact, open a map"),
    ("/", "Jump to the search box"),
    (": or Ctrl+L", "Edit the address (#categoria=...&busca=...)"),
    ("q / Ctrl+C", "Quit"),
];

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![TextLine::from("")];
    for (keys, action) in SHORTCUTS {
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("{keys:>16}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::raw(*action),
        ]));
    }
    lines
}

pub fn render_help_popup(f: &mut Frame<'_>) {
    let popup_area = centered_rect(80, 70, f.area());
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(TextLine::from("F1 or Esc to close").alignment(Alignment::Center))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    f.render_widget(
        Paragraph::new(Text::from(build_help_lines()))
            .block(help_block)
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}
