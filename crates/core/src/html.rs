//! Static markup for the browser view.
//!
//! Class names are the contract with external stylesheets: `card-container`,
//! `card`, `category-btn` (with `data-cat`), `maps-gallery`, `map-thumb`,
//! `map-modal`.

use std::fmt::Write as _;

use crate::catalog::MapRecord;
use crate::categories::CategoryMenu;
use crate::view::{CardList, View};

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn cards(list: &CardList) -> String {
    let mut html = String::from(r#"<div class="card-container">"#);

    match list {
        CardList::Cards { cards } => {
            for card in cards {
                let _ = write!(
                    html,
                    r#"<article class="card"><h2>{}</h2><p><strong>Meaning:</strong> {}</p><p><strong>Reference:</strong> {}</p><p class="description">{}</p></article>"#,
                    escape(&card.name),
                    escape(&card.meaning),
                    escape(&card.reference),
                    escape(&card.description),
                );
            }
        }
        other => {
            let class = match other {
                CardList::Loading => "loading",
                CardList::Failed { .. } => "error",
                _ => "no-results",
            };
            let text = other.placeholder().unwrap_or_default();
            let _ = write!(html, r#"<p class="{class}">{}</p>"#, escape(&text));
        }
    }

    html.push_str("</div>");
    html
}

pub fn menu(menu: &CategoryMenu, active: &str) -> String {
    let mut html = String::from(r#"<nav class="category-nav">"#);

    for entry in menu.entries() {
        let class = if entry.key.eq_ignore_ascii_case(active) {
            "category-btn active"
        } else {
            "category-btn"
        };
        let _ = write!(
            html,
            r#"<button type="button" class="{class}" data-cat="{}">{}"#,
            escape(&entry.key),
            escape(&entry.label),
        );
        if let Some(count) = entry.count {
            let _ = write!(html, r#" <span class="count">{count}</span>"#);
        }
        html.push_str("</button>");
    }

    html.push_str("</nav>");
    html
}

pub fn maps(maps: &[MapRecord]) -> String {
    let mut html = String::from(r#"<section id="maps-gallery" class="maps-gallery"><div class="maps-grid">"#);

    for map in maps {
        let title = escape(&map.title);
        let alt = if map.title.is_empty() {
            "Map".to_string()
        } else {
            title.clone()
        };
        let _ = write!(
            html,
            r#"<button type="button" class="map-thumb" title="{title}"><img src="{}" alt="{alt}" loading="lazy" /><div class="map-thumb-label">{title}</div></button>"#,
            escape(&map.file),
        );
    }

    html.push_str("</div></section>");
    html
}

/// The overlay is always emitted; `open` decides whether it is visible.
pub fn map_modal(open: Option<&MapRecord>) -> String {
    let (hidden, src, title) = open.map_or(("true", String::new(), String::new()), |map| {
        ("false", escape(&map.file), escape(&map.title))
    });

    format!(
        r#"<div id="map-modal" class="map-modal" aria-hidden="{hidden}"><div class="map-modal-content"><button type="button" id="map-modal-close" class="map-modal-close">&times;</button><h3 id="map-modal-title">{title}</h3><img id="map-modal-img" src="{src}" alt="{title}" /></div></div>"#
    )
}

/// Full static page for one view: menu, badge, gallery, cards and the
/// (closed) modal.
pub fn page(title: &str, view: &View, category_menu: &CategoryMenu) -> String {
    let mut body = String::new();

    if view.shows_intro() {
        let _ = write!(body, r#"<h1 class="site-title">{}</h1>"#, escape(title));
    }
    body.push_str(&menu(category_menu, &view.state.category));
    if let Some(badge) = &view.badge {
        let _ = write!(
            body,
            r#"<p id="active-category" class="active-category">{}</p>"#,
            escape(&badge.to_string())
        );
    }
    if let Some(gallery) = &view.maps {
        body.push_str(&maps(gallery));
    }
    body.push_str(&cards(&view.cards));
    body.push_str(&map_modal(None));

    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head><body>{body}</body></html>\n",
        escape(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FactRecord;
    use crate::categories::build_category_counts;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn renders_cards_inside_container() {
        let noah = FactRecord {
            meaning: "rest".to_string(),
            ..FactRecord::new("Noah <3", "people")
        };
        let html = cards(&CardList::build(&[&noah], ""));

        assert!(html.starts_with(r#"<div class="card-container">"#));
        assert!(html.contains(r#"<article class="card"><h2>Noah &lt;3</h2>"#));
        assert!(html.contains("<strong>Meaning:</strong> rest"));
    }

    #[test]
    fn renders_single_placeholder_for_no_results() {
        let html = cards(&CardList::build(&[], "moses"));

        assert_eq!(html.matches("<p").count(), 1);
        assert!(html.contains(r#"class="no-results""#));
        assert!(html.contains("&quot;moses&quot;"));
    }

    #[test]
    fn menu_buttons_carry_raw_keys() {
        let facts = vec![FactRecord::new("Noah", "people")];
        let html = menu(&build_category_counts(&facts).menu(Some(2)), "people");

        assert!(html.contains(r#"class="category-btn" data-cat="all">All</button>"#));
        assert!(html.contains(r#"data-cat="maps">Maps <span class="count">2</span>"#));
        assert!(html.contains(r#"class="category-btn active" data-cat="people""#));
    }

    #[test]
    fn thumbnails_and_modal() {
        let map = MapRecord::new("", "img/rota.png");
        let gallery = maps(std::slice::from_ref(&map));

        assert!(gallery.contains(r#"class="map-thumb""#));
        assert!(gallery.contains(r#"alt="Map""#));
        assert!(map_modal(None).contains(r#"aria-hidden="true""#));
        assert!(map_modal(Some(&map)).contains(r#"src="img/rota.png""#));
    }
}
