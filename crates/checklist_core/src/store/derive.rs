//! Read-only projections computed from a snapshot.

use crate::model::checklist::{Checklist, ChecklistItem, Collection};

/// Completion counters for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListProgress {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// `round(100 * completed / total)`, or 0 for an empty list.
    pub percent: u8,
}

/// Home-screen counters across all lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    pub list_count: usize,
    pub item_count: usize,
}

/// A list's items split for display: pending first, then completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPartition<'a> {
    pub pending: Vec<&'a ChecklistItem>,
    pub completed: Vec<&'a ChecklistItem>,
}

impl Checklist {
    pub fn progress(&self) -> ListProgress {
        let total = self.items.len();
        let completed = self.items.iter().filter(|item| item.completed).count();
        ListProgress {
            total,
            completed,
            pending: total - completed,
            percent: progress_percent(completed, total),
        }
    }

    pub fn partition(&self) -> ItemPartition<'_> {
        let (completed, pending): (Vec<_>, Vec<_>) =
            self.items.iter().partition(|item| item.completed);
        ItemPartition { pending, completed }
    }
}

impl Collection {
    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            list_count: self.lists.len(),
            item_count: self.lists.iter().map(|list| list.items.len()).sum(),
        }
    }
}

/// Rounds half up, matching the percentage shown on list cards.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    // (2 * 100 * c + t) / (2 * t) == floor(100 * c / t + 0.5)
    let percent = (200 * completed + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::progress_percent;
    use crate::model::checklist::{Checklist, ChecklistItem, Collection};

    fn list_with(flags: &[bool]) -> Checklist {
        let mut list = Checklist::new("sample").expect("valid title");
        for (index, completed) in flags.iter().enumerate() {
            let mut item = ChecklistItem::new(format!("item {index}")).expect("valid name");
            item.completed = *completed;
            list.items.push(item);
        }
        list
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn progress_counts_items() {
        let progress = list_with(&[false, true, false]).progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.pending, 2);
        assert_eq!(progress.percent, 33);

        assert_eq!(list_with(&[]).progress().percent, 0);
    }

    #[test]
    fn partition_keeps_relative_order() {
        let list = list_with(&[true, false, true, false]);
        let partition = list.partition();

        let pending = partition
            .pending
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>();
        let completed = partition
            .completed
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(pending, vec!["item 1", "item 3"]);
        assert_eq!(completed, vec!["item 0", "item 2"]);
    }

    #[test]
    fn summary_counts_all_items() {
        let collection = Collection::new(vec![list_with(&[true, false]), list_with(&[false])]);
        let summary = collection.summary();
        assert_eq!(summary.list_count, 2);
        assert_eq!(summary.item_count, 3);
    }
}
