//! Order Store - append-only record of accepted meal orders
//!
//! The record file is the source of truth; the in-memory index is rebuilt
//! from it on startup by replaying every line.
//!
//! # Invariants
//!
//! 1. **Append-Only**: records are never rewritten or removed
//! 2. **One per passenger/flight**: the duplicate check and the append run
//!    under the same lock, so concurrent identical submissions store one row
//! 3. **Whole lines**: each record is a single `write_all` of a complete line

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core_types::{MealCode, OrderKey};
use crate::csv_io::{order_to_csv_line, parse_order_line};
use crate::error::StoreError;
use crate::models::Order;

/// Result of [`OrderStore::insert_if_absent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Key already present; carries the meal code stored first
    Existing(MealCode),
}

struct StoreInner {
    file: File,
    index: HashMap<OrderKey, MealCode>,
}

pub struct OrderStore {
    path: PathBuf,
    sync_on_write: bool,
    inner: Mutex<StoreInner>,
}

impl OrderStore {
    /// Open (or create) the record file and replay it into the index.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn open(path: impl Into<PathBuf>, sync_on_write: bool) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let index = replay(&path)?;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        tracing::info!(
            "[ORDERS] Opened {} with {} existing orders",
            path.display(),
            index.len()
        );

        Ok(Self {
            path,
            sync_on_write,
            inner: Mutex::new(StoreInner { file, index }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Meal code already stored for this passenger/flight, if any
    pub fn get(&self, key: &OrderKey) -> Result<Option<MealCode>, StoreError> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.index.get(key).copied())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.index.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Append the order unless its passenger/flight already has one.
    ///
    /// The index is only updated after the line reached the file, so a failed
    /// write leaves the store unchanged.
    pub fn insert_if_absent(&self, order: &Order) -> Result<InsertOutcome, StoreError> {
        let key = order.key();
        let mut inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;

        if let Some(existing) = inner.index.get(&key) {
            return Ok(InsertOutcome::Existing(*existing));
        }

        let line = order_to_csv_line(order);
        inner.file.write_all(line.as_bytes())?;
        inner.file.flush()?;
        if self.sync_on_write {
            inner.file.sync_data()?;
        }

        inner.index.insert(key, order.meal_code);
        Ok(InsertOutcome::Inserted)
    }
}

/// Rebuild the index from the record file. Missing file = empty store.
fn replay(path: &Path) -> io::Result<HashMap<OrderKey, MealCode>> {
    let mut index = HashMap::new();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(index),
        Err(e) => return Err(e),
    };

    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_order_line(&line) {
            Ok(order) => {
                index.entry(order.key()).or_insert(order.meal_code);
            }
            Err(e) => {
                tracing::warn!("[ORDERS] {}:{} skipped: {:#}", path.display(), line_num + 1, e);
            }
        }
    }
    Ok(index)
}
