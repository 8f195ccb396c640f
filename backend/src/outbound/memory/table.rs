//! Mutex-guarded row vector shared by the in-memory repositories.

use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::{Replaced, RepositoryError};

#[derive(Debug)]
pub(super) struct Table<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> Table<T> {
    pub(super) fn lock(&self) -> Result<MutexGuard<'_, Vec<T>>, RepositoryError> {
        self.rows
            .lock()
            .map_err(|_| RepositoryError::query("in-memory table lock poisoned"))
    }

    pub(super) fn find(&self, matches: impl Fn(&T) -> bool) -> Result<Option<T>, RepositoryError> {
        Ok(self.lock()?.iter().find(|row| matches(row)).cloned())
    }

    pub(super) fn all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    pub(super) fn remove(&self, matches: impl Fn(&T) -> bool) -> Result<Option<T>, RepositoryError> {
        let mut rows = self.lock()?;
        Ok(rows
            .iter()
            .position(|row| matches(row))
            .map(|index| rows.remove(index)))
    }

    /// Swap every row for `incoming` under one lock. Rows whose `key`
    /// matches an earlier incoming row are dropped.
    pub(super) fn replace_unique<K: PartialEq>(
        &self,
        incoming: &[T],
        key: impl Fn(&T) -> K,
    ) -> Result<Replaced<T>, RepositoryError> {
        let mut stored: Vec<T> = Vec::with_capacity(incoming.len());
        for row in incoming {
            let candidate = key(row);
            if !stored.iter().any(|kept| key(kept) == candidate) {
                stored.push(row.clone());
            }
        }
        let mut rows = self.lock()?;
        let cleared = rows.len();
        rows.clone_from(&stored);
        Ok(Replaced { cleared, stored })
    }
}
