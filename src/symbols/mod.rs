//! Symbol table: outputs committed by completed stages.
//!
//! A symbol maps a name such as `PATH_PRD` to a value (normally the path of
//! the document a stage produced). The table is owned by the caller and passed
//! explicitly to the resolver; when it is backed by a [`StateStore`], every
//! `set` is flushed to disk before it returns, so the next invocation sees it.

mod store;

#[cfg(test)]
mod tests;

pub use store::{ProjectState, STATE_VERSION, StateStore};

use crate::error::Result;
use chrono::Utc;
use std::collections::BTreeMap;

/// Reserved symbol bound to the invoked stage's own output path.
pub const TARGET_DOCUMENT: &str = "TARGET_DOCUMENT";

/// Reserved symbol holding the workflow language.
pub const LANGUAGE: &str = "LANGUAGE";

/// Reserved symbol holding the invoked stage name.
pub const STAGE: &str = "STAGE";

/// Reserved symbol holding the invoked action name.
pub const ACTION: &str = "ACTION";

/// Symbols bound by the resolver itself. A workflow may neither produce nor
/// consume them.
pub const BUILTIN_SYMBOLS: [&str; 4] = [TARGET_DOCUMENT, LANGUAGE, STAGE, ACTION];

/// Whether `name` is one of [`BUILTIN_SYMBOLS`].
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_SYMBOLS.contains(&name)
}

/// Lookup result for a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A value has been committed.
    Resolved(String),
    /// No stage has committed this symbol yet.
    Unresolved,
}

impl Binding {
    pub fn value(&self) -> Option<&str> {
        match self {
            Binding::Resolved(value) => Some(value),
            Binding::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Binding::Resolved(_))
    }
}

/// Symbol name to committed value, optionally persisted.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: BTreeMap<String, String>,
    workflow: Option<String>,
    store: Option<StateStore>,
}

impl SymbolTable {
    /// A table that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the table persisted by `store`, loading any prior entries.
    pub fn open(store: StateStore) -> Result<Self> {
        let state = store.read()?;
        tracing::debug!(
            path = %store.path().display(),
            symbols = state.symbols.len(),
            "loaded project state"
        );

        Ok(Self {
            entries: state.symbols,
            workflow: state.workflow,
            store: Some(store),
        })
    }

    /// Look up a symbol.
    pub fn get(&self, name: &str) -> Binding {
        match self.entries.get(name) {
            Some(value) => Binding::Resolved(value.clone()),
            None => Binding::Unresolved,
        }
    }

    /// Commit a value, overwriting any previous one, and flush it.
    ///
    /// If flushing fails the in-memory table is rolled back, so a failed
    /// `set` leaves the table exactly as it was.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), value.into());

        if let Err(e) = self.flush() {
            match previous {
                Some(prev) => self.entries.insert(name, prev),
                None => self.entries.remove(&name),
            };
            return Err(e);
        }

        Ok(())
    }

    /// Copy of every entry, for persistence or display.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }

    /// Replace all entries with `mapping`. Does not flush.
    pub fn load(&mut self, mapping: BTreeMap<String, String>) {
        self.entries = mapping;
    }

    /// Workflow recorded at init, if the table came from a state file.
    pub fn workflow(&self) -> Option<&str> {
        self.workflow.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };

        store.write(&ProjectState {
            version: STATE_VERSION,
            workflow: self.workflow.clone(),
            symbols: self.entries.clone(),
            updated_at: Some(Utc::now()),
        })
    }
}
