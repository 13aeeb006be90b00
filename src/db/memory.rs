// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run store.
//!
//! Runs live in a concurrent map keyed by id. When a snapshot file is
//! configured, every insert and delete rewrites it (temp file + rename), so a
//! restart picks up exactly the runs that were acknowledged.

use crate::error::AppError;
use crate::models::{NewRun, Run};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Run list orderings. All are descending (newest, longest, fastest first).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortType {
    #[default]
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "time")]
    RunningTime,
    #[serde(rename = "distance")]
    Distance,
    #[serde(rename = "speed")]
    AvgSpeed,
    #[serde(rename = "calories")]
    CaloriesBurned,
}

impl SortType {
    fn compare(self, a: &Run, b: &Run) -> Ordering {
        let primary = match self {
            SortType::Date => b.timestamp.cmp(&a.timestamp),
            SortType::RunningTime => b.time_in_millis.cmp(&a.time_in_millis),
            SortType::Distance => b.distance_in_meters.cmp(&a.distance_in_meters),
            SortType::AvgSpeed => b.avg_speed_kmh.total_cmp(&a.avg_speed_kmh),
            SortType::CaloriesBurned => b.calories_burned.cmp(&a.calories_burned),
        };
        primary.then_with(|| b.id.cmp(&a.id))
    }
}

/// On-disk snapshot layout.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    /// Next id to hand out, so ids of deleted runs are never reused
    next_id: u64,
    runs: Vec<Run>,
}

/// Run store handle. Clones share the same data.
#[derive(Clone)]
pub struct RunDb {
    inner: Arc<Inner>,
}

struct Inner {
    runs: DashMap<u64, Run>,
    next_id: AtomicU64,
    snapshot_path: Option<PathBuf>,
    /// Held across every mutation and its snapshot write, so each snapshot
    /// reflects a prefix of the acknowledged mutations
    write_lock: Mutex<()>,
}

impl RunDb {
    /// Create an empty store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::from_parts(Vec::new(), 1, None)
    }

    /// Open a store backed by a JSON snapshot file.
    ///
    /// A missing file starts an empty store; the file is created on the first write.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        let snapshot = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str::<Snapshot>(&contents).map_err(|e| {
                AppError::Database(format!("Corrupt run snapshot {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No run snapshot yet, starting empty");
                Snapshot {
                    next_id: 1,
                    runs: Vec::new(),
                }
            }
            Err(e) => {
                return Err(AppError::Database(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        // Never hand out an id at or below one already stored.
        let max_id = snapshot.runs.iter().map(|r| r.id).max().unwrap_or(0);
        let next_id = snapshot.next_id.max(max_id + 1);

        tracing::info!(
            path = %path.display(),
            count = snapshot.runs.len(),
            next_id,
            "Loaded run snapshot"
        );

        Ok(Self::from_parts(snapshot.runs, next_id, Some(path)))
    }

    fn from_parts(runs: Vec<Run>, next_id: u64, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                runs: runs.into_iter().map(|r| (r.id, r)).collect(),
                next_id: AtomicU64::new(next_id),
                snapshot_path,
                write_lock: Mutex::new(()),
            }),
        }
    }

    // ─── Run Operations ──────────────────────────────────────────

    /// Store a new run and return it with its assigned id.
    pub async fn insert_run(&self, new_run: NewRun) -> Result<Run, AppError> {
        let guard = self.inner.write_lock.lock().await;

        let id = self.inner.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let run = new_run.into_run(id);
        self.inner.runs.insert(id, run.clone());

        if let Err(e) = self.write_snapshot(&guard).await {
            self.inner.runs.remove(&id);
            return Err(e);
        }

        tracing::debug!(run_id = id, "Run stored");
        Ok(run)
    }

    /// Get a run by id.
    pub fn get_run(&self, id: u64) -> Option<Run> {
        self.inner.runs.get(&id).map(|r| r.value().clone())
    }

    /// Delete a run. Returns `false` if no run had that id.
    pub async fn delete_run(&self, id: u64) -> Result<bool, AppError> {
        let guard = self.inner.write_lock.lock().await;

        let Some((_, removed)) = self.inner.runs.remove(&id) else {
            return Ok(false);
        };

        if let Err(e) = self.write_snapshot(&guard).await {
            self.inner.runs.insert(id, removed);
            return Err(e);
        }

        tracing::debug!(run_id = id, "Run deleted");
        Ok(true)
    }

    /// All runs in the given order.
    pub fn list_runs(&self, sort: SortType) -> Vec<Run> {
        let mut runs: Vec<Run> = self.inner.runs.iter().map(|r| r.value().clone()).collect();
        runs.sort_by(|a, b| sort.compare(a, b));
        runs
    }

    /// All runs, oldest first (chart order).
    pub fn runs_sorted_by_date_ascending(&self) -> Vec<Run> {
        let mut runs = self.list_runs(SortType::Date);
        runs.reverse();
        runs
    }

    pub fn count(&self) -> usize {
        self.inner.runs.len()
    }

    // ─── Snapshot ────────────────────────────────────────────────

    /// Rewrite the snapshot file from the current map. The guard proves the
    /// caller holds `write_lock`.
    async fn write_snapshot(&self, _guard: &MutexGuard<'_, ()>) -> Result<(), AppError> {
        let Some(path) = &self.inner.snapshot_path else {
            return Ok(());
        };

        let mut runs: Vec<Run> = self.inner.runs.iter().map(|r| r.value().clone()).collect();
        runs.sort_by_key(|r| r.id);
        let snapshot = Snapshot {
            next_id: self.inner.next_id.load(AtomicOrdering::SeqCst),
            runs,
        };
        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| AppError::Database(format!("Failed to encode runs: {}", e)))?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| AppError::Database(format!("Failed to write {}: {}", tmp_path.display(), e)))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to replace {}: {}", path.display(), e)))?;

        Ok(())
    }
}
