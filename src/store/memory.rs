use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::{debug, trace};
use uuid::Uuid;

use super::records::{Record, ScanRecord};
use crate::common::{CodeError, CodeResult};

// Store trait
//------------------------------------------------------------------------------

/// CRUD surface over one kind of record.
pub trait RecordStore<R: Record> {
    fn insert(&self, record: R) -> CodeResult<Uuid>;

    fn update(&self, record: R) -> CodeResult<()>;

    fn delete(&self, id: Uuid) -> CodeResult<()>;

    fn get_by_id(&self, id: Uuid) -> CodeResult<R>;

    /// All records, most recently updated first.
    fn get_all(&self) -> CodeResult<Vec<R>>;

    fn search(&self, query: &str) -> CodeResult<Vec<R>>;

    fn get_by_type(&self, kind: &str) -> CodeResult<Vec<R>>;

    fn count(&self) -> CodeResult<usize>;

    fn clear(&self) -> CodeResult<()>;

    /// Flips the favorite flag and returns its new value.
    fn toggle_favorite(&self, id: Uuid) -> CodeResult<bool> {
        let mut record = self.get_by_id(id)?;
        let favorite = !record.is_favorite();
        record.set_favorite(favorite);
        self.update(record)?;
        Ok(favorite)
    }

    fn favorites(&self) -> CodeResult<Vec<R>> {
        Ok(self.get_all()?.into_iter().filter(|r| r.is_favorite()).collect())
    }
}

// Memory store
//------------------------------------------------------------------------------

/// In-memory `RecordStore` whose subscribers receive the full ordered list
/// after every mutation.
pub struct MemoryStore<R: Record> {
    records: RwLock<HashMap<Uuid, R>>,
    tx: watch::Sender<Vec<R>>,
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { records: RwLock::new(HashMap::new()), tx }
    }

    /// Receiver holding the current list, refreshed on each change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<R>> {
        self.tx.subscribe()
    }

    fn read(&self) -> CodeResult<RwLockReadGuard<'_, HashMap<Uuid, R>>> {
        self.records.read().map_err(poisoned)
    }

    fn write(&self) -> CodeResult<RwLockWriteGuard<'_, HashMap<Uuid, R>>> {
        self.records.write().map_err(poisoned)
    }

    fn sorted(map: &HashMap<Uuid, R>) -> Vec<R> {
        let mut all: Vec<R> = map.values().cloned().collect();
        all.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()).then_with(|| a.id().cmp(&b.id())));
        all
    }

    fn filtered(&self, pred: impl Fn(&R) -> bool) -> CodeResult<Vec<R>> {
        Ok(Self::sorted(&*self.read()?).into_iter().filter(|r| pred(r)).collect())
    }

    // Caller holds the write guard for `map`
    fn insert_locked(&self, map: &mut HashMap<Uuid, R>, record: R) -> CodeResult<Uuid> {
        let id = record.id();
        if map.contains_key(&id) {
            return Err(CodeError::Storage(format!("record {id} already exists")));
        }
        map.insert(id, record);
        debug!(%id, "inserted record");
        self.publish(map);
        Ok(id)
    }

    fn publish(&self, map: &HashMap<Uuid, R>) {
        self.tx.send_replace(Self::sorted(map));
    }
}

fn poisoned<T>(_: PoisonError<T>) -> CodeError {
    CodeError::Storage("record lock poisoned".to_string())
}

impl<R: Record> RecordStore<R> for MemoryStore<R> {
    fn insert(&self, record: R) -> CodeResult<Uuid> {
        let mut map = self.write()?;
        self.insert_locked(&mut *map, record)
    }

    fn update(&self, record: R) -> CodeResult<()> {
        let id = record.id();
        let mut map = self.write()?;
        let slot = map.get_mut(&id).ok_or(CodeError::RecordNotFound(id))?;
        *slot = record;
        debug!(%id, "updated record");
        self.publish(&map);
        Ok(())
    }

    fn delete(&self, id: Uuid) -> CodeResult<()> {
        let mut map = self.write()?;
        map.remove(&id).ok_or(CodeError::RecordNotFound(id))?;
        debug!(%id, "deleted record");
        self.publish(&map);
        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> CodeResult<R> {
        self.read()?.get(&id).cloned().ok_or(CodeError::RecordNotFound(id))
    }

    fn get_all(&self) -> CodeResult<Vec<R>> {
        Ok(Self::sorted(&*self.read()?))
    }

    fn search(&self, query: &str) -> CodeResult<Vec<R>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.get_all();
        }
        self.filtered(|r| r.matches(&query))
    }

    fn get_by_type(&self, kind: &str) -> CodeResult<Vec<R>> {
        self.filtered(|r| r.kind().eq_ignore_ascii_case(kind))
    }

    fn count(&self) -> CodeResult<usize> {
        Ok(self.read()?.len())
    }

    fn clear(&self) -> CodeResult<()> {
        let mut map = self.write()?;
        let n = map.len();
        map.clear();
        debug!(removed = n, "cleared records");
        self.publish(&map);
        Ok(())
    }
}

impl MemoryStore<ScanRecord> {
    /// Saves a scan. With `dedupe`, an existing scan of the same format and
    /// payload gets its timestamp refreshed instead of a second entry.
    /// Returns the id of the stored record.
    pub fn record_scan(&self, record: ScanRecord, dedupe: bool) -> CodeResult<Uuid> {
        let mut map = self.write()?;
        if dedupe {
            if let Some(existing) = map.values_mut().find(|r| r.is_duplicate_of(&record)) {
                existing.scanned_at = record.scanned_at;
                let id = existing.id;
                trace!(%id, "refreshed duplicate scan");
                self.publish(&map);
                return Ok(id);
            }
        }
        self.insert_locked(&mut *map, record)
    }
}
