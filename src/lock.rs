//! Single instance lock, cron může pustit další běh dřív než doběhne tenhle

use std::fs::{File, OpenOptions};
use std::path::Path;

use fd_lock::{RwLock, RwLockWriteGuard};
use logger::Logger;

use crate::error::RunError;

pub const LOCK_FILE_NAME: &str = "dynamo_next_match.lock";

/// Otevře (případně vytvoří) lock soubor. Když to nejde, běh končí chybou.
pub fn open_lock(path: &Path) -> Result<RwLock<File>, RunError> {
    OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map(RwLock::new)
        .map_err(|source| RunError::Lock {
            path: path.display().to_string(),
            source,
        })
}

/// `None` = lock drží jiná instance, volající má skončit bez práce
pub fn try_acquire<'a>(lock: &'a mut RwLock<File>, log: &Logger) -> Option<RwLockWriteGuard<'a, File>> {
    match lock.try_write() {
        Ok(guard) => {
            log.debug("Acquired single-instance lock.");
            Some(guard)
        }
        Err(_) => {
            log.warn("Another instance of next-match is already running! Exiting.");
            None
        }
    }
}
