//! Screen navigation state.
//!
//! The app has two screens: the home overview and one open list.

use crate::model::checklist::{Checklist, Collection, ListId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    List(ListId),
}

impl Screen {
    pub fn open_list_id(&self) -> Option<&str> {
        match self {
            Self::Home => None,
            Self::List(list_id) => Some(list_id.as_str()),
        }
    }

    /// Resolves the open list against `collection`; `None` on Home or when
    /// the list no longer exists.
    pub fn resolve<'a>(&self, collection: &'a Collection) -> Option<&'a Checklist> {
        self.open_list_id()
            .and_then(|list_id| collection.list(list_id))
    }
}

#[cfg(test)]
mod tests {
    use super::Screen;
    use crate::model::checklist::Collection;
    use crate::store::ops::create_list;

    #[test]
    fn resolve_falls_back_when_list_is_gone() {
        let collection = create_list(&Collection::default(), "Groceries").expect("valid title");
        let list_id = collection.lists[0].id.clone();

        let screen = Screen::List(list_id);
        assert!(screen.resolve(&collection).is_some());
        assert!(screen.resolve(&Collection::default()).is_none());
        assert!(Screen::Home.resolve(&collection).is_none());
    }
}
