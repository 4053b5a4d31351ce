//! Two-key fragment codec: `categoria=<category>&busca=<query>`.
//!
//! Default values are never written, so the default view has an empty
//! fragment. Decoding accepts anything and falls back to defaults.

use std::borrow::Cow;

use serde::Serialize;

use crate::{ALL, MAPS};

pub const CATEGORY_KEY: &str = "categoria";
pub const QUERY_KEY: &str = "busca";

/// What the visitor is looking at. The fragment mirrors this, never the
/// other way around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub category: String,
    pub query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            query: String::new(),
        }
    }
}

impl ViewState {
    pub fn new(category: &str, query: &str) -> Self {
        Self {
            category: category.to_string(),
            query: query.to_string(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.category.eq_ignore_ascii_case(ALL)
    }

    pub fn is_maps(&self) -> bool {
        self.category.eq_ignore_ascii_case(MAPS)
    }

    pub fn is_default(&self) -> bool {
        self.is_all() && self.query.is_empty()
    }

    pub fn fragment(&self) -> String {
        encode_state(&self.category, &self.query)
    }
}

/// Encodes the view as a fragment body (without `#`). Empty for the
/// default view.
pub fn encode_state(category: &str, query: &str) -> String {
    let mut parts = Vec::with_capacity(2);
    if !category.is_empty() && category != ALL {
        parts.push(format!("{CATEGORY_KEY}={}", urlencoding::encode(category)));
    }
    if !query.is_empty() {
        parts.push(format!("{QUERY_KEY}={}", urlencoding::encode(query)));
    }
    parts.join("&")
}

/// Decodes a fragment, with or without its leading `#`. Unknown keys are
/// ignored; the first occurrence of a key wins; empty values fall back to
/// the defaults.
pub fn decode_state(fragment: &str) -> ViewState {
    let body = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut category = None;
    let mut query = None;

    for pair in body.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let slot = match &*decode_component(key) {
            CATEGORY_KEY => &mut category,
            QUERY_KEY => &mut query,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(decode_component(value).into_owned());
        }
    }

    let category = category
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| ALL.to_string());

    ViewState {
        category,
        query: query.unwrap_or_default(),
    }
}

/// Link to `page` carrying `state`, e.g. `fatos.html#categoria=people`.
pub fn link(page: &str, state: &ViewState) -> String {
    let fragment = state.fragment();
    if fragment.is_empty() {
        page.to_string()
    } else {
        format!("{page}#{fragment}")
    }
}

// Form-style decoding: `+` is a space, malformed escapes decode lossily.
fn decode_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['+', '%']) {
        return Cow::Borrowed(raw);
    }

    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => {
            let bytes = urlencoding::decode_binary(spaced.as_bytes());
            Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
