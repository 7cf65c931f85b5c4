// File: src/storage.rs
// Local file storage for the task list.
//
// One JSON document holds the whole list as a plain array of task
// records; the list is small and rewritten in full after every
// mutation (write-through, no batching).
use crate::context::AppContext;
use crate::model::Task;
use anyhow::Result;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ListStorage;

impl ListStorage {
    /// Sidecar lock file path: tasks.json -> tasks.json.lock
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock on the
    /// sidecar file. Guards against a second running instance.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: write to a .tmp file then rename over the target.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Loads the persisted list.
    ///
    /// A missing file is a fresh install and loads as an empty list.
    /// Malformed content also loads as an empty list: the record shape
    /// is flat and stable, so a parse failure means the file was
    /// corrupted externally, and an empty list beats refusing to start.
    /// The failure is logged so the user can still recover the file by
    /// hand before the next save overwrites it.
    pub fn load(ctx: &dyn AppContext) -> Result<Vec<Task>> {
        let path = ctx.get_task_file_path()?;
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;
            match serde_json::from_str::<Vec<Task>>(&json) {
                Ok(tasks) => Ok(tasks),
                Err(e) => {
                    log::warn!(
                        "Could not parse task file {:?} ({}); starting with an empty list",
                        path,
                        e
                    );
                    Ok(vec![])
                }
            }
        })
    }

    /// Serializes the full list to disk.
    pub fn save(ctx: &dyn AppContext, tasks: &[Task]) -> Result<()> {
        let path = ctx.get_task_file_path()?;
        Self::with_lock(&path, || {
            let json = serde_json::to_string_pretty(tasks)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }
}
