use std::fmt;

use serde::Serialize;

use crate::catalog::{FactRecord, MapRecord};
use crate::categories::label;
use crate::fragment::ViewState;

/// One fact as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub name: String,
    pub meaning: String,
    pub reference: String,
    pub description: String,
}

impl From<&FactRecord> for Card {
    fn from(record: &FactRecord) -> Self {
        Self {
            name: record.name.clone(),
            meaning: record.meaning.clone(),
            reference: record.reference.clone(),
            description: record.description.clone(),
        }
    }
}

/// Contents of the card area. Rebuilt in full on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardList {
    Loading,
    Failed { message: String },
    Empty { query: Option<String> },
    Cards { cards: Vec<Card> },
}

impl CardList {
    pub fn build(records: &[&FactRecord], query: &str) -> Self {
        if records.is_empty() {
            let query = (!query.is_empty()).then(|| query.to_string());
            return Self::Empty { query };
        }

        Self::Cards {
            cards: records.iter().map(|record| Card::from(*record)).collect(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Cards { cards } => cards,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    /// Text shown in place of the cards, if any.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            Self::Loading => Some("Loading facts...".to_string()),
            Self::Failed { .. } => {
                Some("Failed to load the facts. See the log for details.".to_string())
            }
            Self::Empty { query: Some(query) } => Some(format!("No results found for \"{query}\".")),
            Self::Empty { query: None } => Some("No results found.".to_string()),
            Self::Cards { .. } => None,
        }
    }
}

/// Active-category summary shown above the cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub category: String,
    pub label: String,
    /// Facts in the category before the query is applied.
    pub total: usize,
    pub showing: usize,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.eq_ignore_ascii_case(crate::ALL) {
            write!(
                f,
                "Category: {} · showing {} of {}",
                self.label, self.showing, self.total
            )
        } else {
            write!(
                f,
                "Category: {} ({}) · showing {}",
                self.label, self.total, self.showing
            )
        }
    }
}

/// Everything a surface needs to draw one frame of the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub state: ViewState,
    pub cards: CardList,
    /// `None` hides the gallery.
    pub maps: Option<Vec<MapRecord>>,
    pub badge: Option<Badge>,
}

impl View {
    pub fn loading(state: ViewState) -> Self {
        Self {
            state,
            cards: CardList::Loading,
            maps: None,
            badge: None,
        }
    }

    /// The intro banner is only shown while no query is active.
    pub fn shows_intro(&self) -> bool {
        self.state.query.is_empty()
    }

    pub(crate) fn badge_for(state: &ViewState, total: usize, showing: usize) -> Badge {
        Badge {
            category: state.category.clone(),
            label: label(&state.category),
            total,
            showing,
        }
    }
}
