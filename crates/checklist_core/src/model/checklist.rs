//! Checklist domain model.
//!
//! # Responsibility
//! - Define the list/item records shared by Store, Sync and FFI layers.
//! - Own id generation and creation-date formatting.
//!
//! # Invariants
//! - `id` values are never reassigned once a list or item exists.
//! - `title` and `name` are non-empty after trimming at creation time.
//! - `quantity` starts at 1 and no core operation changes it.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Display format used for `created_at` (day/month/year).
pub const CREATED_AT_FORMAT: &str = "%d/%m/%Y";

/// Identifier of a [`Checklist`]. Opaque string on the wire.
pub type ListId = String;

/// Identifier of a [`ChecklistItem`]. Opaque string on the wire.
pub type ItemId = String;

/// Rejection reason for user-entered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyListTitle,
    EmptyItemName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyListTitle => write!(f, "list title cannot be empty"),
            Self::EmptyItemName => write!(f, "item name cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ItemId,
    pub name: String,
    /// Kept for payload compatibility; nothing reads or edits it yet.
    pub quantity: u32,
    pub completed: bool,
}

impl ChecklistItem {
    /// Creates a pending item with a fresh id.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if is_blank(&name) {
            return Err(ValidationError::EmptyItemName);
        }

        Ok(Self {
            id: new_item_id(),
            name,
            quantity: 1,
            completed: false,
        })
    }
}

/// Named, ordered container of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: ListId,
    pub title: String,
    /// Local creation date rendered with [`CREATED_AT_FORMAT`].
    pub created_at: String,
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Creates an empty list dated today (local time).
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        Self::created_on(title, Local::now().date_naive())
    }

    /// Creates an empty list with an explicit creation date.
    ///
    /// The title is stored as typed; only the emptiness check trims it.
    pub fn created_on(title: impl Into<String>, date: NaiveDate) -> Result<Self, ValidationError> {
        let title = title.into();
        if is_blank(&title) {
            return Err(ValidationError::EmptyListTitle);
        }

        Ok(Self {
            id: new_list_id(),
            title,
            created_at: format_created_at(date),
            items: Vec::new(),
        })
    }

    pub fn item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// Ordered set of all lists; the unit of persistence.
///
/// Serialized as a bare JSON array of lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    pub lists: Vec<Checklist>,
}

impl Collection {
    pub fn new(lists: Vec<Checklist>) -> Self {
        Self { lists }
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn list(&self, list_id: &str) -> Option<&Checklist> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    pub fn contains_list(&self, list_id: &str) -> bool {
        self.list(list_id).is_some()
    }
}

/// Formats a calendar date the way `created_at` is displayed.
pub fn format_created_at(date: NaiveDate) -> String {
    date.format(CREATED_AT_FORMAT).to_string()
}

fn new_list_id() -> ListId {
    format!("list-{}", Uuid::new_v4())
}

fn new_item_id() -> ItemId {
    format!("item-{}", Uuid::new_v4())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{format_created_at, Checklist, ChecklistItem, ValidationError};
    use chrono::NaiveDate;

    #[test]
    fn created_at_uses_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date");
        assert_eq!(format_created_at(date), "07/03/2024");
    }

    #[test]
    fn ids_carry_kind_prefix_and_differ() {
        let first = Checklist::new("a").expect("title is valid");
        let second = Checklist::new("b").expect("title is valid");
        assert!(first.id.starts_with("list-"));
        assert_ne!(first.id, second.id);

        let item = ChecklistItem::new("milk").expect("name is valid");
        assert!(item.id.starts_with("item-"));
        assert_eq!(item.quantity, 1);
        assert!(!item.completed);
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            Checklist::new(" \t ").expect_err("blank title"),
            ValidationError::EmptyListTitle
        );
        assert_eq!(
            ChecklistItem::new("").expect_err("empty name"),
            ValidationError::EmptyItemName
        );
    }

    #[test]
    fn title_is_kept_as_typed() {
        let list = Checklist::new("  Groceries ").expect("title is valid");
        assert_eq!(list.title, "  Groceries ");
    }
}
