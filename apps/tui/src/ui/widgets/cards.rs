use exodo_core::Card;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::ListItem;

/// Greedy word wrap; words longer than `width` get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// One card as a list item: a heading line, plus the wrapped description
/// when expanded.
pub fn card_item(card: &Card, expanded: bool, width: usize) -> ListItem<'static> {
    let marker = if expanded { "▾ " } else { "▸ " };
    let mut heading = vec![
        Span::raw(marker),
        Span::styled(
            card.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if !card.meaning.is_empty() {
        heading.push(Span::raw(format!(" · {}", card.meaning)));
    }
    if !card.reference.is_empty() {
        heading.push(Span::styled(
            format!("  ({})", card.reference),
            Style::default().fg(Color::Gray),
        ));
    }

    let mut lines = vec![TextLine::from(heading)];
    if expanded {
        if card.description.is_empty() {
            lines.push(TextLine::from(Span::styled(
                "  No description.",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.extend(
                wrap_text(&card.description, width.saturating_sub(2))
                    .into_iter()
                    .map(|line| TextLine::from(format!("  {line}"))),
            );
        }
    }

    ListItem::new(Text::from(lines))
}
