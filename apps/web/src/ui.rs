use exodo_core::{CardList, MapRecord, View};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::state::{Focus, WebApp};

const SELECTED: Color = Color::Rgb(0, 0, 238);

fn pane(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Yellow } else { Color::Gray }))
}

pub fn render(app: &WebApp, f: &mut Frame<'_>) {
    let area = f.area();
    let block = Block::default()
        .title("Êxodo")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area).inner(Margin::new(1, 0));
    f.render_widget(block, area);

    let view = app.view();
    let intro_height = if view.shows_intro() { 2 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(intro_height),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(inner);

    if view.shows_intro() {
        f.render_widget(
            Paragraph::new("Facts, people and places from the book of Exodus.")
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
            rows[0],
        );
    }

    let search_title = if app.debouncer.is_pending() {
        " Search … "
    } else {
        " Search "
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("{}▏", app.search_input),
            Style::default().fg(Color::Green),
        ))
        .block(pane(search_title, app.focus == Focus::Search)),
        rows[1],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .split(rows[2]);
    render_menu(app, f, body[0]);
    render_results(app, view, f, body[1]);

    f.render_widget(
        Paragraph::new("Tab: switch pane · Enter: select · Esc: close/clear")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        rows[3],
    );

    if let Some(map) = app.opened_map() {
        render_map_modal(map, f, area);
    }
}

fn render_menu(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let active = &app.controller.state().category;
    let items: Vec<ListItem<'_>> = app
        .menu()
        .entries()
        .iter()
        .map(|entry| {
            let count = entry
                .count
                .map_or_else(String::new, |count| format!(" ({count})"));
            let style = if entry.key.eq_ignore_ascii_case(active) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!("{}{count}", entry.label), style))
        })
        .collect();

    let focused = app.focus == Focus::Categories;
    let list = List::new(items)
        .block(pane(" Categories ", focused))
        .highlight_style(if focused {
            Style::default().bg(SELECTED).fg(Color::White)
        } else {
            Style::default()
        });
    let mut state = ListState::default().with_selected(Some(app.menu_index));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_results(app: &WebApp, view: &View, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if view.maps.is_some() { 3 } else { 0 }),
            Constraint::Min(3),
        ])
        .split(area);

    if let Some(badge) = &view.badge {
        f.render_widget(
            Paragraph::new(Span::styled(badge.to_string(), Style::default().fg(Color::Cyan))),
            rows[0],
        );
    }

    if let Some(maps) = &view.maps {
        let focused = app.focus == Focus::Maps;
        if maps.is_empty() {
            f.render_widget(
                Paragraph::new("No maps available.").block(pane(" Maps ", focused)),
                rows[1],
            );
        } else {
            let tabs = Tabs::new(maps.iter().map(|map| map.title.clone()))
                .select(app.map_index)
                .block(pane(" Maps ", focused))
                .style(Style::default().fg(Color::Gray))
                .highlight_style(
                    Style::default()
                        .fg(if focused { Color::White } else { SELECTED })
                        .add_modifier(Modifier::BOLD),
                )
                .divider(Span::raw("|"));
            f.render_widget(tabs, rows[1]);
        }
    }

    let focused = app.focus == Focus::Cards;
    let block = pane(" Facts ", focused);
    if let Some(placeholder) = view.cards.placeholder() {
        let color = if matches!(view.cards, CardList::Failed { .. }) {
            Color::Red
        } else {
            Color::Gray
        };
        f.render_widget(
            Paragraph::new(Span::styled(placeholder, Style::default().fg(color)))
                .block(block)
                .alignment(Alignment::Center),
            rows[2],
        );
        return;
    }

    let items: Vec<ListItem<'_>> = view
        .cards
        .cards()
        .iter()
        .enumerate()
        .map(|(index, card)| {
            let mut lines = vec![TextLine::from(vec![
                Span::styled(
                    card.name.as_str(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" · {}", card.meaning)),
                Span::styled(
                    format!("  {}", card.reference),
                    Style::default().fg(Color::Gray),
                ),
            ])];
            if app.expanded_card == Some(index) && !card.description.is_empty() {
                lines.push(TextLine::from(format!("  {}", card.description)));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused {
            Style::default().bg(SELECTED).fg(Color::White)
        } else {
            Style::default()
        });
    let mut state = ListState::default().with_selected(Some(app.card_index));
    f.render_stateful_widget(list, rows[2], &mut state);
}

fn render_map_modal(map: &MapRecord, f: &mut Frame<'_>, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(7)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(row);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(Text::from(vec![
            TextLine::from(""),
            TextLine::from(Span::styled(
                map.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(map.file.as_str(), Style::default().fg(Color::Gray))),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Map · Esc to close ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        popup,
    );
}
