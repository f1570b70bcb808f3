//! In-memory list that applies mutations before the server confirms them.
//!
//! Every mutation hands back what is needed to undo it: a [`ProvisionalKey`]
//! for inserts, a [`Snapshot`] for patches and a [`Removed`] for removals.

use std::fmt;

use shared_types::{Contact, Deal, Task};
use uuid::Uuid;

/// A record with a server-assigned id
pub trait Record: Clone {
    fn id(&self) -> i64;
}

impl Record for Contact {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Deal {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Task {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Local identity of a record the server has not accepted yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProvisionalKey(Uuid);

impl ProvisionalKey {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ProvisionalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tmp-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKey {
    Saved(i64),
    Provisional(ProvisionalKey),
}

#[derive(Debug, Clone)]
pub struct Row<T> {
    pub key: RowKey,
    pub record: T,
}

impl<T> Row<T> {
    pub fn is_provisional(&self) -> bool {
        matches!(self.key, RowKey::Provisional(_))
    }
}

/// A saved record as it was before [`OptimisticList::patch`]
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    id: i64,
    record: T,
}

/// A row taken out by [`OptimisticList::remove`] and where it was
#[derive(Debug, Clone)]
pub struct Removed<T> {
    index: usize,
    row: Row<T>,
}

impl<T> Removed<T> {
    pub fn record(&self) -> &T {
        &self.row.record
    }
}

#[derive(Debug, Clone)]
pub struct OptimisticList<T> {
    rows: Vec<Row<T>>,
}

impl<T> Default for OptimisticList<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Record> OptimisticList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` at the top of the list
    pub fn insert_provisional(&mut self, record: T) -> ProvisionalKey {
        let key = ProvisionalKey::new();
        self.rows.insert(
            0,
            Row {
                key: RowKey::Provisional(key),
                record,
            },
        );
        key
    }

    /// Swaps the provisional row for the server's record, in place.
    /// When a refresh has dropped the row, the record goes back on top
    /// unless the refreshed list already holds it. Returns whether the
    /// provisional row was still there.
    pub fn confirm(&mut self, key: ProvisionalKey, saved: T) -> bool {
        let row = Row {
            key: RowKey::Saved(saved.id()),
            record: saved,
        };
        match self.position(RowKey::Provisional(key)) {
            Some(index) => {
                self.rows[index] = row;
                true
            }
            None => {
                if self.position(row.key).is_none() {
                    self.rows.insert(0, row);
                }
                false
            }
        }
    }

    pub fn discard(&mut self, key: ProvisionalKey) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.key != RowKey::Provisional(key));
        self.rows.len() != before
    }

    /// Applies `f` to the saved record `id` and returns its prior state
    pub fn patch(&mut self, id: i64, f: impl FnOnce(&mut T)) -> Option<Snapshot<T>> {
        let index = self.position(RowKey::Saved(id))?;
        let record = &mut self.rows[index].record;
        let snapshot = Snapshot {
            id,
            record: record.clone(),
        };
        f(record);
        Some(snapshot)
    }

    pub fn replace(&mut self, id: i64, saved: T) -> bool {
        match self.position(RowKey::Saved(id)) {
            Some(index) => {
                self.rows[index] = Row {
                    key: RowKey::Saved(saved.id()),
                    record: saved,
                };
                true
            }
            None => false,
        }
    }

    pub fn revert(&mut self, snapshot: Snapshot<T>) -> bool {
        self.replace(snapshot.id, snapshot.record)
    }

    pub fn remove(&mut self, id: i64) -> Option<Removed<T>> {
        let index = self.position(RowKey::Saved(id))?;
        let row = self.rows.remove(index);
        Some(Removed { index, row })
    }

    /// Puts a removed row back at its former position, or at the end when
    /// the list has since shrunk below it
    pub fn restore(&mut self, removed: Removed<T>) {
        let index = removed.index.min(self.rows.len());
        self.rows.insert(index, removed.row);
    }

    pub fn replace_all(&mut self, records: Vec<T>) {
        self.rows = records
            .into_iter()
            .map(|record| Row {
                key: RowKey::Saved(record.id()),
                record,
            })
            .collect();
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.position(RowKey::Saved(id))
            .map(|index| &self.rows[index].record)
    }

    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position(&self, key: RowKey) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }
}
