//! Snapshot-producing collection operations.
//!
//! # Responsibility
//! - Implement create/delete list and add/toggle/delete item as pure
//!   functions from one `Collection` value to the next.
//!
//! # Invariants
//! - Inputs are never mutated; every call returns a new value.
//! - Validation failures return `Err` and produce no new value.
//! - Unmatched ids are `Ok` no-ops whose result equals the input.
//! - Item operations touch at most one list, even when ids repeat.

use crate::model::checklist::{Checklist, ChecklistItem, Collection, ValidationError};
use chrono::NaiveDate;

/// Appends a new empty list dated today.
pub fn create_list(collection: &Collection, title: &str) -> Result<Collection, ValidationError> {
    Ok(push_list(collection, Checklist::new(title)?))
}

/// Appends a new empty list with an explicit creation date.
pub fn create_list_on(
    collection: &Collection,
    title: &str,
    date: NaiveDate,
) -> Result<Collection, ValidationError> {
    Ok(push_list(collection, Checklist::created_on(title, date)?))
}

/// Removes one list together with all of its items.
///
/// Confirmation is the caller's job; this always deletes when matched.
pub fn delete_list(collection: &Collection, list_id: &str) -> Collection {
    Collection::new(
        collection
            .lists
            .iter()
            .filter(|list| list.id != list_id)
            .cloned()
            .collect(),
    )
}

/// Appends a pending item to the matching list.
pub fn add_item(
    collection: &Collection,
    list_id: &str,
    name: &str,
) -> Result<Collection, ValidationError> {
    let item = ChecklistItem::new(name)?;
    Ok(map_list(collection, list_id, |list| {
        let mut items = list.items.clone();
        items.push(item);
        Checklist {
            items,
            ..list.clone()
        }
    }))
}

/// Flips `completed` on the matching item of the matching list.
pub fn toggle_item(collection: &Collection, list_id: &str, item_id: &str) -> Collection {
    map_list(collection, list_id, |list| Checklist {
        items: list
            .items
            .iter()
            .map(|item| {
                if item.id == item_id {
                    ChecklistItem {
                        completed: !item.completed,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect(),
        ..list.clone()
    })
}

/// Removes the matching item from the matching list.
pub fn delete_item(collection: &Collection, list_id: &str, item_id: &str) -> Collection {
    map_list(collection, list_id, |list| Checklist {
        items: list
            .items
            .iter()
            .filter(|item| item.id != item_id)
            .cloned()
            .collect(),
        ..list.clone()
    })
}

fn push_list(collection: &Collection, list: Checklist) -> Collection {
    let mut lists = collection.lists.clone();
    lists.push(list);
    Collection::new(lists)
}

/// Rewrites the first list whose id matches; later duplicates stay as they are.
fn map_list(
    collection: &Collection,
    list_id: &str,
    f: impl FnOnce(&Checklist) -> Checklist,
) -> Collection {
    let mut lists = collection.lists.clone();
    if let Some(index) = lists.iter().position(|list| list.id == list_id) {
        let updated = f(&lists[index]);
        lists[index] = updated;
    }
    Collection::new(lists)
}

#[cfg(test)]
mod tests {
    use super::{add_item, create_list, create_list_on, delete_item, delete_list, toggle_item};
    use crate::model::checklist::{Checklist, Collection, ValidationError};
    use chrono::NaiveDate;

    fn groceries() -> Collection {
        let collection = create_list(&Collection::default(), "Groceries").expect("valid title");
        let list_id = collection.lists[0].id.clone();
        let collection = add_item(&collection, &list_id, "Milk").expect("valid name");
        add_item(&collection, &list_id, "Bread").expect("valid name")
    }

    #[test]
    fn create_list_appends_empty_list() {
        let before = groceries();
        let after = create_list(&before, "Hardware").expect("valid title");

        assert_eq!(after.len(), before.len() + 1);
        let last = after.lists.last().expect("list appended");
        assert_eq!(last.title, "Hardware");
        assert!(last.items.is_empty());
        assert_eq!(before.lists[..], after.lists[..before.len()]);
    }

    #[test]
    fn create_list_on_stamps_given_date() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date");
        let collection = create_list_on(&Collection::default(), "Party", date).expect("valid title");
        assert_eq!(collection.lists[0].created_at, "31/12/2025");
    }

    #[test]
    fn create_list_rejects_blank_titles() {
        let before = groceries();
        for title in ["", "   "] {
            assert_eq!(
                create_list(&before, title).expect_err("blank title"),
                ValidationError::EmptyListTitle
            );
        }
    }

    #[test]
    fn add_item_rejects_blank_name_and_ignores_unknown_list() {
        let before = groceries();
        let list_id = before.lists[0].id.clone();

        assert_eq!(
            add_item(&before, &list_id, " ").expect_err("blank name"),
            ValidationError::EmptyItemName
        );
        assert_eq!(
            add_item(&before, "list-missing", "Eggs").expect("valid name"),
            before
        );
    }

    #[test]
    fn toggle_twice_restores_original() {
        let before = groceries();
        let list = &before.lists[0];
        let item_id = list.items[0].id.clone();

        let once = toggle_item(&before, &list.id, &item_id);
        assert!(once.lists[0].items[0].completed);
        assert!(!once.lists[0].items[1].completed);

        let twice = toggle_item(&once, &list.id, &item_id);
        assert_eq!(twice, before);
    }

    #[test]
    fn unmatched_ids_are_noops() {
        let before = groceries();
        let list_id = before.lists[0].id.clone();

        assert_eq!(delete_list(&before, "nonexistent"), before);
        assert_eq!(toggle_item(&before, &list_id, "item-missing"), before);
        assert_eq!(toggle_item(&before, "list-missing", "item-missing"), before);
        assert_eq!(delete_item(&before, &list_id, "item-missing"), before);
    }

    #[test]
    fn delete_item_keeps_remaining_order() {
        let before = groceries();
        let list_id = before.lists[0].id.clone();
        let milk_id = before.lists[0].items[0].id.clone();

        let after = delete_item(&before, &list_id, &milk_id);
        let names = after.lists[0]
            .items
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Bread"]);
    }

    #[test]
    fn item_operations_touch_only_first_list_with_repeated_id() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        let mut first = Checklist::created_on("Feira", date).expect("valid title");
        first.id = "list-1718000000000".to_string();
        let second = Checklist {
            title: "Feira copy".to_string(),
            ..first.clone()
        };
        let before = Collection::new(vec![first, second]);

        let after = add_item(&before, "list-1718000000000", "Banana").expect("valid name");
        assert_eq!(after.lists[0].items.len(), 1);
        assert!(after.lists[1].items.is_empty());

        let item_id = after.lists[0].items[0].id.clone();
        let toggled = toggle_item(&after, "list-1718000000000", &item_id);
        assert!(toggled.lists[0].items[0].completed);
        assert_eq!(toggled.lists[1], before.lists[1]);
    }
}
