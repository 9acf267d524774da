//! Copy-on-write row storage shared by every container.

use std::sync::Arc;

use fibertrack_core::error::CoreError;

/// A row type stored in a [`Collection`].
pub trait Record: Clone {
    /// Entity name used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

/// Ordered rows behind an `Arc`.
///
/// [`snapshot`](Collection::snapshot) hands out the current `Arc`; a later
/// mutation clones the rows first if a snapshot is still alive, so snapshot
/// holders keep seeing exactly the rows they were given.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    rows: Arc<Vec<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(Vec::new()),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full current contents.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Rows matching `predicate`, in insertion order.
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        self.rows.iter().filter(|row| predicate(*row)).cloned().collect()
    }

    /// Append a row. Fails with `Conflict` if the id is already present.
    pub fn insert(&mut self, row: T) -> Result<(), CoreError> {
        if self.contains(row.id()) {
            return Err(CoreError::Conflict(format!(
                "{} with id {} already exists",
                T::ENTITY,
                row.id()
            )));
        }
        tracing::debug!(entity = T::ENTITY, id = row.id(), "Row inserted");
        Arc::make_mut(&mut self.rows).push(row);
        Ok(())
    }

    /// Apply `f` to the row with `id` and return the updated row.
    ///
    /// Returns `None` without touching the rows when `id` is absent.
    pub fn update_with(&mut self, id: &str, f: impl FnOnce(&mut T)) -> Option<T> {
        let pos = self.position(id)?;
        let row = &mut Arc::make_mut(&mut self.rows)[pos];
        f(row);
        tracing::debug!(entity = T::ENTITY, id, "Row updated");
        Some(row.clone())
    }

    /// Like [`update_with`](Collection::update_with), but `f` works on a copy
    /// and the row is replaced only when `f` succeeds.
    pub fn try_update_with(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut T) -> Result<(), CoreError>,
    ) -> Result<Option<T>, CoreError> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };
        let mut candidate = self.rows[pos].clone();
        f(&mut candidate)?;
        Arc::make_mut(&mut self.rows)[pos] = candidate.clone();
        tracing::debug!(entity = T::ENTITY, id, "Row updated");
        Ok(Some(candidate))
    }

    /// Apply `f` to every row matching `predicate`. Returns the number changed.
    pub fn update_where(
        &mut self,
        mut predicate: impl FnMut(&T) -> bool,
        mut f: impl FnMut(&mut T),
    ) -> usize {
        let positions: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate(*row))
            .map(|(pos, _)| pos)
            .collect();
        if positions.is_empty() {
            return 0;
        }
        let rows = Arc::make_mut(&mut self.rows);
        for &pos in &positions {
            f(&mut rows[pos]);
        }
        positions.len()
    }

    /// Remove the row with `id`, returning it. `None` if absent.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.position(id)?;
        let row = Arc::make_mut(&mut self.rows).remove(pos);
        tracing::debug!(entity = T::ENTITY, id, "Row removed");
        Some(row)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        value: i32,
    }

    impl Record for Row {
        const ENTITY: &'static str = "row";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, value: i32) -> Row {
        Row {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn snapshot_is_unaffected_by_later_mutation() {
        let mut rows = Collection::new();
        rows.insert(row("a", 1)).unwrap();
        let before = rows.snapshot();

        rows.update_with("a", |r| r.value = 2);
        rows.insert(row("b", 3)).unwrap();

        assert_eq!(*before, vec![row("a", 1)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.get("a").unwrap().value, 2);
    }

    #[test]
    fn duplicate_id_is_a_conflict() {
        let mut rows = Collection::new();
        rows.insert(row("a", 1)).unwrap();
        assert_matches!(rows.insert(row("a", 2)), Err(CoreError::Conflict(_)));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn update_of_absent_id_leaves_rows_identical() {
        let mut rows = Collection::new();
        rows.insert(row("a", 1)).unwrap();
        let before = rows.snapshot();

        assert!(rows.update_with("missing", |r| r.value = 99).is_none());

        // Same allocation: nothing was cloned or touched.
        assert!(Arc::ptr_eq(&before, &rows.snapshot()));
    }

    #[test]
    fn rejected_checked_update_keeps_original_row() {
        let mut rows = Collection::new();
        rows.insert(row("a", 1)).unwrap();
        let before = rows.snapshot();

        let result = rows.try_update_with("a", |r| {
            r.value = -5;
            Err(CoreError::Validation("negative".into()))
        });

        assert_matches!(result, Err(CoreError::Validation(_)));
        assert!(Arc::ptr_eq(&before, &rows.snapshot()));
        assert_eq!(rows.get("a").unwrap().value, 1);
        assert_matches!(rows.try_update_with("missing", |_| Ok(())), Ok(None));
        assert_eq!(rows.try_update_with("a", |r| {
            r.value = 7;
            Ok(())
        }).unwrap(), Some(row("a", 7)));
    }

    #[test]
    fn remove_returns_row_and_absent_is_none() {
        let mut rows = Collection::new();
        rows.insert(row("a", 1)).unwrap();
        assert_eq!(rows.remove("a"), Some(row("a", 1)));
        assert_eq!(rows.remove("a"), None);
        assert!(rows.is_empty());
    }

    #[test]
    fn update_where_counts_changed_rows() {
        let mut rows = Collection::new();
        for (id, v) in [("a", 1), ("b", 2), ("c", 3)] {
            rows.insert(row(id, v)).unwrap();
        }
        let changed = rows.update_where(|r| r.value >= 2, |r| r.value *= 10);
        assert_eq!(changed, 2);
        assert_eq!(
            rows.iter().map(|r| r.value).collect::<Vec<_>>(),
            vec![1, 20, 30]
        );
        assert_eq!(rows.update_where(|r| r.value > 100, |r| r.value = 0), 0);
    }
}
