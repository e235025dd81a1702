// File: ./src/storage.rs
// Persists the task list as one line per task in a flat text file.
//
// Line layout (see `Task::to_data`):
//   T | <done> | <description>
//   D | <done> | <description> | <by>
//   E | <done> | <description> | <from> | <to>
use crate::error::{LictError, Result};
use crate::model::Task;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_FILENAME: &str = "lict.txt";

/// Anything the commands can write the task list through.
pub trait TaskStorage {
    fn load(&mut self) -> Result<Vec<Task>>;
    fn save(&mut self, tasks: &[Task]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    /// Never attempted to load
    Uninitialized,
    /// Last load succeeded
    Success,
    /// Last load failed; the file on disk still holds data we could not read.
    Failed,
}

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    load_state: LoadState,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            load_state: LoadState::Uninitialized,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable data file is moved before it gets overwritten.
    pub fn corrupt_path(&self) -> PathBuf {
        let mut p = self.path.clone().into_os_string();
        p.push(".corrupt");
        PathBuf::from(p)
    }

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

    /// Runs `f` while holding an exclusive advisory lock on a sidecar file.
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

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                LictError::storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    fn read_tasks(path: &Path) -> Result<Vec<Task>> {
        let content = fs::read_to_string(path).map_err(|e| {
            LictError::storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(Task::from_data)
            .collect()
    }
}

impl TaskStorage for FileStorage {
    fn load(&mut self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            log::info!("No data file at {}, starting fresh", self.path.display());
            self.load_state = LoadState::Success;
            return Ok(vec![]);
        }

        let path = self.path.clone();
        let result = Self::with_lock(&path, || Self::read_tasks(&path));

        match &result {
            Ok(tasks) => {
                log::info!("Loaded {} tasks from {}", tasks.len(), path.display());
                self.load_state = LoadState::Success;
            }
            Err(e) => {
                log::warn!("Could not load {}: {}", path.display(), e);
                self.load_state = LoadState::Failed;
            }
        }
        result
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        self.ensure_parent()?;

        if self.load_state == LoadState::Failed && self.path.exists() {
            // Keep the unreadable file instead of overwriting it.
            let backup = self.corrupt_path();
            fs::rename(&self.path, &backup).map_err(|e| {
                LictError::storage(format!(
                    "Failed to move unreadable {} aside: {}",
                    self.path.display(),
                    e
                ))
            })?;
            log::warn!("Moved unreadable data file to {}", backup.display());
        }
        self.load_state = LoadState::Success;

        let mut content = String::new();
        for task in tasks {
            content.push_str(&task.to_data());
            content.push('\n');
        }

        let path = self.path.clone();
        Self::with_lock(&path, || Self::atomic_write(&path, &content)).map_err(|e| {
            LictError::storage(format!("Failed to save {}: {}", path.display(), e))
        })?;
        log::debug!("Saved {} tasks to {}", tasks.len(), path.display());
        Ok(())
    }
}

/// Keeps the serialized lines in memory. Used when no data file is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    lines: Vec<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl TaskStorage for MemoryStorage {
    fn load(&mut self) -> Result<Vec<Task>> {
        self.lines.iter().map(|l| Task::from_data(l)).collect()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        self.lines = tasks.iter().map(Task::to_data).collect();
        Ok(())
    }
}
