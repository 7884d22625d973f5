//! Validated query handed to the data-access layer

use serde::{Deserialize, Serialize};

use crate::filter::Predicate;
use crate::pagination::PageWindow;
use crate::record::Record;
use crate::sort::SortToken;

/// Order, optional filter and optional window of a list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub order: SortToken,
    pub predicate: Option<Predicate>,
    pub window: Option<PageWindow>,
}

impl RecordQuery {
    pub fn ordered_by(order: SortToken) -> Self {
        Self {
            order,
            predicate: None,
            window: None,
        }
    }

    pub fn filtered(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn paged(mut self, window: PageWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.predicate
            .as_ref()
            .map_or(true, |predicate| predicate.matches(record))
    }

    /// Reference execution over an in-memory collection.
    ///
    /// `total` counts every matching record, before the window is applied.
    pub fn apply<'a, R, I>(&self, records: I) -> Page<R>
    where
        R: Record + Clone + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut matching: Vec<R> = records
            .into_iter()
            .filter(|record| self.matches(*record))
            .cloned()
            .collect();
        matching.sort_by(|left, right| self.order.compare(left, right));

        let total = matching.len() as u64;
        let items = match self.window {
            Some(window) => {
                let range = window.range(matching.len());
                matching.drain(range).collect()
            }
            None => matching,
        };

        Page { total, items }
    }
}

/// Items of one page plus the size of the whole matching collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::build_predicate;
    use crate::record::AttributeValue;
    use crate::sort::SortDirection;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    impl Record for Row {
        fn attribute(&self, name: &str) -> Option<AttributeValue> {
            match name {
                "id" => Some(self.id.into()),
                "name" => Some(self.name.into()),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        ["Ann", "Bob", "Anna", "Carl", "Joanna"]
            .into_iter()
            .enumerate()
            .map(|(index, name)| Row {
                id: index as i64 + 1,
                name,
            })
            .collect()
    }

    #[test]
    fn test_apply_window_counts_everything() {
        let query = RecordQuery::ordered_by(SortToken::ascending("id"))
            .paged(PageWindow::new(2, 2).unwrap());
        let page = query.apply(&rows());

        assert_eq!(page.total, 5);
        let ids: Vec<_> = page.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_apply_filter_and_order() {
        let query = RecordQuery::ordered_by(SortToken::new("name", SortDirection::Descending))
            .filtered(build_predicate("name", "ann"));
        let page = query.apply(&rows());

        assert_eq!(page.total, 3);
        let names: Vec<_> = page.items.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Joanna", "Anna", "Ann"]);
    }

    #[test]
    fn test_apply_past_the_end_is_empty() {
        let query = RecordQuery::ordered_by(SortToken::ascending("id"))
            .paged(PageWindow::new(5, 20).unwrap());
        let page = query.apply(&rows());
        assert_eq!(page.total, 5);
        assert!(page.is_empty());
    }
}
