use crate::ui::widgets::popup::centered_rect;
use exodo_core::MapRecord;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Enlarged view of one gallery entry.
pub fn render_map_modal(map: &MapRecord, f: &mut Frame<'_>) {
    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", map.title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(TextLine::from("Esc to close").alignment(Alignment::Center))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let text = Text::from(vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            map.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            map.file.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ]);

    f.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
