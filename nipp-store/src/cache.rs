//! Session-scoped memo of parsed input files.

use anyhow::Context;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Parsed files keyed by path. The first access reads and parses the file;
/// later accesses share the same value. Entries are never invalidated.
///
/// Clones share the same entries.
pub struct FileCache<T> {
    entries: Rc<RefCell<HashMap<PathBuf, Rc<T>>>>,
}

impl<T> Clone for FileCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<T> Default for FileCache<T> {
    fn default() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl<T> FileCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `path`, or read the file and run `parse` on its
    /// contents. A failed parse leaves nothing cached.
    pub fn get_or_load<F>(&self, path: &Path, parse: F) -> anyhow::Result<Rc<T>>
    where
        F: FnOnce(&str) -> anyhow::Result<T>,
    {
        let key = path.to_path_buf();
        if let Some(hit) = self.entries.borrow().get(&key) {
            log::debug!("cache: hit {}", key.display());
            return Ok(Rc::clone(hit));
        }

        let contents = std::fs::read_to_string(&key)
            .with_context(|| format!("reading {}", key.display()))?;
        let value = Rc::new(parse(&contents).with_context(|| format!("parsing {}", key.display()))?);
        log::info!("cache: loaded {}", key.display());
        self.entries.borrow_mut().insert(key, Rc::clone(&value));
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
