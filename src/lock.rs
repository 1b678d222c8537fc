//! Per-record lock files.
//!
//! A lock is a file named `<record-id>.lock` holding the owning process ID.
//! It is created with `create_new`, so at most one holder exists at a time,
//! and removed when the guard is dropped. A lock left behind by a process
//! that no longer runs is reclaimed by the next caller.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

const RETRY_INTERVAL: Duration = Duration::from_millis(10);
const MAX_ATTEMPTS: u32 = 500;
/// Holder liveness is checked on the first busy attempt and then every
/// this many attempts.
const STALE_CHECK_EVERY: u32 = 50;
/// A lock file with no readable PID is treated as abandoned after this long.
const UNREADABLE_GRACE: Duration = Duration::from_secs(2);

/// Exclusive hold on one record's lock file.
#[derive(Debug)]
pub struct RecordLock {
    path: PathBuf,
}

impl RecordLock {
    /// Acquire the lock for `record_id`, waiting for a current holder to
    /// release it.
    pub fn acquire(locks_dir: &Path, record_id: &str) -> Result<Self> {
        fs::create_dir_all(locks_dir)
            .with_context(|| format!("Failed to create {}", locks_dir.display()))?;
        let path = lock_path(locks_dir, record_id);

        for attempt in 0..MAX_ATTEMPTS {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    write!(file, "{}", std::process::id())
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::debug!(record = record_id, "lock acquired");
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if attempt % STALE_CHECK_EVERY == 0 && reclaim_stale(locks_dir, record_id)? {
                        continue;
                    }
                    tracing::trace!(record = record_id, "lock busy, retrying");
                    thread::sleep(RETRY_INTERVAL)
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to create {}", path.display()))
                }
            }
        }

        let holder = read_lock(locks_dir, record_id).ok().flatten();
        anyhow::bail!(
            "Record {} is locked{}",
            record_id,
            holder
                .map(|pid| format!(" by process {}", pid))
                .unwrap_or_default()
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RecordLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove lock file");
        }
    }
}

/// Read the PID from a lock file
pub fn read_lock(locks_dir: &Path, record_id: &str) -> Result<Option<u32>> {
    let path = lock_path(locks_dir, record_id);

    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let pid: u32 = content.trim().parse()?;
    Ok(Some(pid))
}

/// Remove the lock for `record_id` if its holder is gone. Returns whether a
/// lock was removed.
fn reclaim_stale(locks_dir: &Path, record_id: &str) -> Result<bool> {
    let path = lock_path(locks_dir, record_id);
    let stale = match read_lock(locks_dir, record_id) {
        Ok(Some(pid)) => !is_process_running(pid),
        Ok(None) => return Ok(false),
        // Holder may be between create and write; only give up on it once old.
        Err(_) => lock_age(&path).is_some_and(|age| age > UNREADABLE_GRACE),
    };
    if !stale {
        return Ok(false);
    }

    match fs::remove_file(&path) {
        Ok(()) => {
            tracing::warn!(record = record_id, "removed stale lock file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e).with_context(|| format!("Failed to remove stale lock {}", path.display())),
    }
}

fn lock_age(path: &Path) -> Option<Duration> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    SystemTime::now().duration_since(modified).ok()
}

/// Check if a process with the given PID is running
pub fn is_process_running(pid: u32) -> bool {
    if pid == std::process::id() {
        return true;
    }

    #[cfg(unix)]
    {
        use std::process::Command;

        // `kill -0` checks existence without sending a signal
        Command::new("kill")
            .args(["-0", &pid.to_string()])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    // Liveness cannot be checked here; treat the holder as alive.
    #[cfg(not(unix))]
    {
        true
    }
}

fn lock_path(locks_dir: &Path, record_id: &str) -> PathBuf {
    locks_dir.join(format!("{}.lock", record_id))
}
