//! Flight-delay reference table
//!
//! The externally maintained export is read once into an indexed map so a
//! lookup is a single hash probe. A background watcher swaps in a fresh table
//! when the file changes, and keeps the old one when the new file is bad.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::config::ReferenceColumns;
use crate::core_types::FlightKey;
use crate::csv_io::load_flight_records;
use crate::error::ReferenceError;
use crate::models::FlightDelayRecord;

pub type SharedFlightTable = Arc<RwLock<FlightTable>>;

#[derive(Debug, Default)]
pub struct FlightTable {
    delays: FxHashMap<FlightKey, Duration>,
    skipped_rows: usize,
}

impl FlightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// First row wins when a key repeats.
    pub fn from_records(records: impl IntoIterator<Item = FlightDelayRecord>) -> Self {
        let mut delays = FxHashMap::default();
        for record in records {
            delays.entry(record.key()).or_insert(record.delay_duration);
        }
        Self {
            delays,
            skipped_rows: 0,
        }
    }

    pub fn load(path: &Path, columns: &ReferenceColumns) -> Result<Self, ReferenceError> {
        let load = load_flight_records(path, columns).map_err(|e| ReferenceError::Load {
            path: path.display().to_string(),
            reason: format!("{:#}", e),
        })?;
        let mut table = Self::from_records(load.records);
        table.skipped_rows = load.skipped;
        Ok(table)
    }

    /// Startup load: a read error is logged and yields an empty table, so
    /// every lookup reports "no match" until a reload succeeds.
    pub fn load_or_empty(path: &Path, columns: &ReferenceColumns) -> Self {
        match Self::load(path, columns) {
            Ok(table) => {
                tracing::info!(
                    "[REFERENCE] Loaded {} flights from {} ({} rows skipped)",
                    table.len(),
                    path.display(),
                    table.skipped_rows
                );
                table
            }
            Err(e) => {
                tracing::error!("[REFERENCE] {}; starting with an empty table", e);
                Self::new()
            }
        }
    }

    pub fn delay_for(&self, key: &FlightKey) -> Option<Duration> {
        self.delays.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

/// Outcome of one watcher tick
#[derive(Debug)]
pub enum ReloadResult {
    Unchanged,
    Reloaded(usize),
    /// File read or parse failed, old table kept
    ReadError(String),
    /// New file parsed but was unusable, old table kept
    ValidationError(String),
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Watches the reference export and hot-swaps the table
pub struct ReferenceWatcher {
    path: PathBuf,
    columns: ReferenceColumns,
    table: SharedFlightTable,
    last_modified: Option<SystemTime>,
}

impl ReferenceWatcher {
    pub fn new(path: impl Into<PathBuf>, columns: ReferenceColumns, table: SharedFlightTable) -> Self {
        let path = path.into();
        let last_modified = modified_at(&path);
        Self {
            path,
            columns,
            table,
            last_modified,
        }
    }

    /// Reload if the file's modification time moved since the last look.
    pub async fn check(&mut self) -> ReloadResult {
        let current = modified_at(&self.path);
        if current.is_none() || current == self.last_modified {
            return ReloadResult::Unchanged;
        }
        self.last_modified = current;

        match FlightTable::load(&self.path, &self.columns) {
            Ok(new_table) if new_table.is_empty() => {
                let e = ReferenceError::Empty(self.path.display().to_string());
                tracing::error!("[REFERENCE] {}, keeping old table", e);
                ReloadResult::ValidationError(e.to_string())
            }
            Ok(new_table) => {
                let count = new_table.len();
                *self.table.write().await = new_table;
                tracing::info!("[REFERENCE] Reference table reloaded: {} flights", count);
                ReloadResult::Reloaded(count)
            }
            Err(e) => {
                tracing::error!("[REFERENCE] {}, keeping old table", e);
                ReloadResult::ReadError(e.to_string())
            }
        }
    }

    /// Background loop; never returns.
    pub async fn run(mut self, check_interval: Duration) {
        loop {
            tokio::time::sleep(check_interval).await;
            self.check().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(flight: &str, origin: &str, destination: &str, secs: u64) -> FlightDelayRecord {
        FlightDelayRecord {
            flight_number: flight.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            delay_duration: Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_lookup_is_keyed_by_flight_and_route() {
        let table = FlightTable::from_records(vec![
            record("LA800", "SCL", "IPC", 19_200),
            record("LA800", "IPC", "SCL", 18_000),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.delay_for(&FlightKey::new("la800", "scl", "ipc")),
            Some(Duration::from_secs(19_200))
        );
        assert_eq!(
            table.delay_for(&FlightKey::new("LA800", "IPC", "SCL")),
            Some(Duration::from_secs(18_000))
        );
        assert_eq!(table.delay_for(&FlightKey::new("LA800", "SCL", "LIM")), None);
        assert_eq!(table.delay_for(&FlightKey::new("LA801", "SCL", "IPC")), None);
    }

    #[test]
    fn test_first_row_wins() {
        let table = FlightTable::from_records(vec![
            record("LA33", "SCL", "JFK", 100),
            record("LA33", "SCL", "JFK", 200),
        ]);
        assert_eq!(
            table.delay_for(&FlightKey::new("LA33", "SCL", "JFK")),
            Some(Duration::from_secs(100))
        );
    }

    #[test]
    fn test_missing_file_yields_empty_table() {
        let table = FlightTable::load_or_empty(
            Path::new("target/no_such_reference.csv"),
            &ReferenceColumns::default(),
        );
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_watcher_reloads_and_keeps_old_on_error() {
        let path = format!("target/test_reference_watch_{}.csv", std::process::id());
        fs::create_dir_all("target").unwrap();
        fs::write(&path, "Flt Desg,Dept Arp,Arvl Arp,demora\nLA800,SCL,IPC,05:00:00\n").unwrap();

        let columns = ReferenceColumns::default();
        let table = Arc::new(RwLock::new(
            FlightTable::load(Path::new(&path), &columns).unwrap(),
        ));
        let mut watcher = ReferenceWatcher::new(&path, columns, table.clone());

        assert!(matches!(watcher.check().await, ReloadResult::Unchanged));

        // Force a different mtime regardless of filesystem timestamp granularity
        watcher.last_modified = Some(SystemTime::UNIX_EPOCH);
        fs::write(
            &path,
            "Flt Desg,Dept Arp,Arvl Arp,demora\nLA800,SCL,IPC,05:00:00\nLA33,SCL,JFK,10:00:00\n",
        )
        .unwrap();
        assert!(matches!(watcher.check().await, ReloadResult::Reloaded(2)));
        assert_eq!(table.read().await.len(), 2);

        watcher.last_modified = Some(SystemTime::UNIX_EPOCH);
        fs::write(&path, "wrong,header\n").unwrap();
        assert!(matches!(watcher.check().await, ReloadResult::ReadError(_)));
        assert_eq!(table.read().await.len(), 2);

        watcher.last_modified = Some(SystemTime::UNIX_EPOCH);
        fs::write(&path, "Flt Desg,Dept Arp,Arvl Arp,demora\n").unwrap();
        assert!(matches!(watcher.check().await, ReloadResult::ValidationError(_)));
        assert_eq!(table.read().await.len(), 2);

        let _ = fs::remove_file(&path);
    }
}
