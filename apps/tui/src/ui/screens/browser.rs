use crate::app::{App, Focus};
use crate::ui::widgets::cards::card_item;
use exodo_core::View;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

const SELECTED: Color = Color::Rgb(0, 0, 238);

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

pub fn render_browser(app: &App, f: &mut Frame<'_>) {
    let view = app.view();
    let intro_height = if view.shows_intro() { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(intro_height), // Intro banner
            Constraint::Length(3),            // Search box
            Constraint::Length(3),            // Address bar
            Constraint::Min(6),               // Menu and results
            Constraint::Length(1),            // Status line
            Constraint::Length(1),            // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    if view.shows_intro() {
        render_intro(f, chunks[0]);
    }
    render_search(app, f, chunks[1]);
    render_address(app, f, chunks[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(chunks[3]);
    render_categories(app, f, body[0]);
    render_results(app, view, f, body[1]);

    render_status(app, f, chunks[4]);
    render_shortcuts(app, f, chunks[5]);
}

fn render_intro(f: &mut Frame<'_>, area: Rect) {
    let intro = Paragraph::new(Text::from(vec![
        TextLine::from(Span::styled(
            "Êxodo",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from("Facts, people and places from the book of Exodus."),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .wrap(Wrap { trim: true });

    f.render_widget(intro, area);
}

fn render_search(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Search;
    let pending = if app.debouncer.is_pending() { " …" } else { "" };
    let title = format!(" Search{pending} ");

    let text = if app.search_input.is_empty() && !focused {
        Span::styled("Type / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(app.search_input.as_str(), Style::default().fg(Color::Green))
    };
    f.render_widget(
        Paragraph::new(TextLine::from(text)).block(pane_block(&title, focused)),
        area,
    );

    if focused {
        place_cursor(f, area, app.search_input.chars().count());
    }
}

fn render_address(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Address;
    let line = if focused {
        TextLine::from(vec![
            Span::styled("#", Style::default().fg(Color::Gray)),
            Span::styled(app.address_input.as_str(), Style::default().fg(Color::Green)),
        ])
    } else {
        TextLine::from(Span::styled(
            app.share_link(),
            Style::default().fg(Color::Gray),
        ))
    };

    f.render_widget(
        Paragraph::new(line).block(pane_block(" Address ", focused)),
        area,
    );

    if focused {
        place_cursor(f, area, app.address_input.chars().count() + 1);
    }
}

fn place_cursor(f: &mut Frame<'_>, area: Rect, offset: usize) {
    let inner = area.inner(Margin::new(1, 1));
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
    f.set_cursor_position((x, inner.y));
}

fn render_categories(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Categories;
    let active = &app.state().category;

    let items: Vec<ListItem<'_>> = app
        .menu()
        .entries()
        .iter()
        .map(|entry| {
            let is_active = entry.key.eq_ignore_ascii_case(active);
            let marker = if is_active { "● " } else { "  " };
            let count = entry
                .count
                .map_or_else(String::new, |count| format!(" ({count})"));
            let style = if is_active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(TextLine::from(vec![
                Span::styled(format!("{marker}{}", entry.label), style),
                Span::styled(count, Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(" Categories ", focused))
        .highlight_style(if focused {
            Style::default().bg(SELECTED).fg(Color::White)
        } else {
            Style::default()
        });

    let mut state = ListState::default().with_selected(Some(app.menu_index));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_results(app: &App, view: &View, f: &mut Frame<'_>, area: Rect) {
    let gallery_height = if view.maps.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(gallery_height),
            Constraint::Min(3),
        ])
        .split(area);

    if let Some(badge) = &view.badge {
        f.render_widget(
            Paragraph::new(Span::styled(
                badge.to_string(),
                Style::default().fg(Color::Cyan),
            )),
            chunks[0],
        );
    }

    if let Some(maps) = &view.maps {
        render_gallery(app, maps, f, chunks[1]);
    }

    render_cards(app, view, f, chunks[2]);
}

fn render_gallery(app: &App, maps: &[exodo_core::MapRecord], f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Maps;
    let block = pane_block(" Maps ", focused);

    if maps.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No maps available.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block),
            area,
        );
        return;
    }

    let titles: Vec<String> = maps.iter().map(|map| map.title.clone()).collect();
    let tabs = Tabs::new(titles)
        .select(app.map_index)
        .block(block)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(if focused {
            Style::default()
                .fg(Color::White)
                .bg(SELECTED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        })
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_cards(app: &App, view: &View, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Cards;
    let title = if view.cards.is_empty() {
        " Facts ".to_string()
    } else {
        format!(" Facts ({} of {}) ", app.card_index + 1, view.cards.len())
    };
    let block = pane_block(&title, focused);

    if let Some(placeholder) = view.cards.placeholder() {
        let color = if matches!(view.cards, exodo_core::CardList::Failed { .. }) {
            Color::Red
        } else {
            Color::Gray
        };
        f.render_widget(
            Paragraph::new(Span::styled(placeholder, Style::default().fg(color)))
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let width = usize::from(area.width.saturating_sub(4));
    let items: Vec<ListItem<'_>> = view
        .cards
        .cards()
        .iter()
        .enumerate()
        .map(|(index, card)| card_item(card, app.expanded_card == Some(index), width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused {
            Style::default().bg(SELECTED).fg(Color::White)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        });

    let mut state = ListState::default().with_selected(Some(app.card_index));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let style = if app.controller.surface().errors.is_empty() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Red)
    };
    f.render_widget(
        Paragraph::new(Span::styled(app.status_message.as_str(), style)),
        area,
    );
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let key = |label: &'static str| {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };

    let mut spans = vec![key("Tab"), Span::raw(": Switch pane   ")];
    match app.focus {
        Focus::Search => {
            spans.extend([key("Enter"), Span::raw(": Search now   ")]);
            spans.extend([key("Esc"), Span::raw(": Clear   ")]);
        }
        Focus::Address => {
            spans.extend([key("Enter"), Span::raw(": Go   ")]);
            spans.extend([key("Esc"), Span::raw(": Cancel   ")]);
        }
        Focus::Categories | Focus::Cards | Focus::Maps => {
            spans.extend([key("Enter"), Span::raw(": Select   ")]);
            spans.extend([key(":"), Span::raw(": Address   ")]);
            spans.extend([key("q"), Span::raw(": Quit   ")]);
        }
    }
    spans.extend([key("F1"), Span::raw(": Help")]);

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoadEvent;
    use exodo_core::{FactRecord, MapRecord};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| crate::ui::ui(app, f)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app(fragment: &str) -> App {
        let mut app = App::new("fatos.html", fragment);
        app.on_load(LoadEvent::Facts(Ok(vec![
            FactRecord::new("Moisés", "pessoas"),
            FactRecord::new("Maná", "eventos"),
        ])));
        app.on_load(LoadEvent::Maps(Ok(vec![MapRecord::new("Sinai", "sinai.png")])));
        app
    }

    #[test]
    fn draws_menu_badge_and_cards() {
        let text = screen(&app(""));

        assert!(text.contains("Êxodo"));
        assert!(text.contains("Pessoas (1)"));
        assert!(text.contains("Category: All · showing 2 of 2"));
        assert!(text.contains("Moisés"));
        assert!(!text.contains("Sinai"));
    }

    #[test]
    fn query_hides_the_intro_and_shows_matching_maps() {
        let text = screen(&app("busca=sinai"));

        assert!(!text.contains("book of Exodus"));
        assert!(text.contains("Sinai"));
        assert!(text.contains("No results found for \"sinai\"."));
        assert!(text.contains("fatos.html#busca=sinai"));
    }
}
