//! Non-interactive mode: load, apply a fragment, print the result.

use std::fmt::Write as _;

use clap::ValueEnum;
use color_eyre::{eyre::eyre, Result};
use exodo_core::fragment::link;
use exodo_core::{html, CategoryMenu, Controller, MenuEntry, Surface, View};
use serde::Serialize;

use crate::config::AppConfig;
use crate::fetch::{build_client, load_facts, load_maps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

/// Keeps the last rendered view; nothing is drawn.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub view: Option<View>,
    pub menu: CategoryMenu,
}

impl Surface for Snapshot {
    fn render(&mut self, view: &View) {
        self.view = Some(view.clone());
    }

    fn populate_menu(&mut self, menu: &CategoryMenu) {
        self.menu = menu.clone();
    }
}

/// Prints the view for `fragment`. The placeholder is still printed when the
/// facts fail to load, but the run then ends in an error.
pub async fn run_headless(config: &AppConfig, fragment: &str, format: OutputFormat) -> Result<()> {
    let client = build_client(config.timeout)?;
    let (facts, maps) = tokio::join!(
        load_facts(&client, &config.data),
        load_maps(&client, &config.maps)
    );
    let facts_error = facts.as_ref().err().map(ToString::to_string);

    let mut controller = Controller::new(Snapshot::default());
    controller.navigate(fragment);
    controller.facts_loaded(facts);
    controller.maps_loaded(maps);

    let view = controller.view();
    let menu = controller.menu();
    let output = match format {
        OutputFormat::Text => render_text(&view, &menu, &config.page),
        OutputFormat::Json => render_json(&view, &menu, &config.page)?,
        OutputFormat::Html => html::page("Êxodo", &view, &menu),
    };
    print!("{output}");

    match facts_error {
        Some(err) => Err(eyre!("Failed to load the facts: {err}")),
        None => Ok(()),
    }
}

pub fn render_text(view: &View, menu: &CategoryMenu, page: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\nÊxodo Facts");
    let _ = writeln!(out, "===========");
    if let Some(badge) = &view.badge {
        let _ = writeln!(out, "{badge}");
    }
    if !view.state.query.is_empty() {
        let _ = writeln!(out, "Search: {}", view.state.query);
    }
    let _ = writeln!(out, "Link: {}", link(page, &view.state));

    let _ = writeln!(out, "\nCategories:");
    for entry in menu.entries() {
        let _ = writeln!(out, "- {}", menu_line(entry, &view.state.category));
    }

    if let Some(maps) = &view.maps {
        let _ = writeln!(out, "\nMaps:");
        if maps.is_empty() {
            let _ = writeln!(out, "- (none available)");
        }
        for map in maps {
            let _ = writeln!(out, "- {} | {}", map.title, map.file);
        }
    }

    let _ = writeln!(out, "\nFacts:");
    if let Some(placeholder) = view.cards.placeholder() {
        let _ = writeln!(out, "{placeholder}");
    }
    for card in view.cards.cards() {
        let _ = writeln!(out, "- {} | {} | {}", card.name, card.meaning, card.reference);
        if !card.description.is_empty() {
            let _ = writeln!(out, "  {}", card.description);
        }
    }

    out
}

fn menu_line(entry: &MenuEntry, active: &str) -> String {
    let marker = if entry.key.eq_ignore_ascii_case(active) {
        " *"
    } else {
        ""
    };
    entry.count.map_or_else(
        || format!("{}{marker}", entry.label),
        |count| format!("{} ({count}){marker}", entry.label),
    )
}

#[derive(Serialize)]
struct HeadlessOutput<'a> {
    link: String,
    fragment: String,
    view: &'a View,
    categories: Vec<HeadlessCategory<'a>>,
}

#[derive(Serialize)]
struct HeadlessCategory<'a> {
    key: &'a str,
    label: &'a str,
    count: Option<usize>,
}

pub fn render_json(view: &View, menu: &CategoryMenu, page: &str) -> Result<String> {
    let output = HeadlessOutput {
        link: link(page, &view.state),
        fragment: view.state.fragment(),
        view,
        categories: menu
            .entries()
            .iter()
            .map(|entry| HeadlessCategory {
                key: &entry.key,
                label: &entry.label,
                count: entry.count,
            })
            .collect(),
    };
    let mut json = serde_json::to_string_pretty(&output)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    use exodo_core::{FactRecord, MapRecord};

    use crate::config::Source;

    fn file_config(data: Source, maps: Source) -> AppConfig {
        AppConfig {
            data,
            maps,
            page: "fatos.html".to_string(),
            timeout: Duration::from_secs(1),
            log_file: "exodo.log".into(),
            debug: false,
        }
    }

    fn loaded(fragment: &str) -> Controller<Snapshot> {
        let mut controller = Controller::new(Snapshot::default());
        controller.navigate(fragment);
        controller.facts_loaded(Ok(vec![
            FactRecord {
                meaning: "rest".to_string(),
                reference: "Gn 6".to_string(),
                ..FactRecord::new("Noah", "people")
            },
            FactRecord::new("Flood", "events"),
        ]));
        controller.maps_loaded(Ok(vec![MapRecord::new("Canaã", "img/canaa.png")]));
        controller
    }

    #[test]
    fn text_lists_visible_facts_and_link() {
        let controller = loaded("categoria=people");
        let text = render_text(&controller.view(), &controller.menu(), "fatos.html");

        assert!(text.contains("- Noah | rest | Gn 6"));
        assert!(!text.contains("Flood"));
        assert!(text.contains("Link: fatos.html#categoria=people"));
        assert!(text.contains("- People (1) *"));
        assert!(text.contains("- Maps (1)"));
    }

    #[test]
    fn text_shows_placeholder_and_gallery() {
        let controller = loaded("categoria=maps");
        let text = render_text(&controller.view(), &controller.menu(), "fatos.html");

        assert!(text.contains("Maps:\n- Canaã | img/canaa.png"));
        assert!(text.contains("No results found."));
    }

    #[test]
    fn json_carries_fragment_and_cards() -> Result<()> {
        let controller = loaded("busca=flood");
        let json = render_json(&controller.view(), &controller.menu(), "fatos.html")?;
        let value: serde_json::Value = serde_json::from_str(&json)?;

        assert_eq!(value["fragment"], "busca=flood");
        assert_eq!(value["view"]["cards"]["status"], "cards");
        assert_eq!(value["view"]["cards"]["cards"][0]["name"], "Flood");
        assert_eq!(value["categories"][0]["key"], "all");
        Ok(())
    }

    #[tokio::test]
    async fn missing_facts_fail_the_run() {
        let config = file_config(
            Source::File("definitely/not/here/data.json".into()),
            Source::File("definitely/not/here/maps.json".into()),
        );

        let result = run_headless(&config, "", OutputFormat::Text).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("data.json"));
    }

    #[tokio::test]
    async fn missing_maps_alone_still_succeed() -> Result<()> {
        let mut data = tempfile::NamedTempFile::new()?;
        write!(data, r#"[{{"nome":"Moisés","categoria":"pessoas"}}]"#)?;
        let config = file_config(
            Source::File(data.path().to_path_buf()),
            Source::File("definitely/not/here/maps.json".into()),
        );

        run_headless(&config, "categoria=pessoas", OutputFormat::Json).await
    }
}
