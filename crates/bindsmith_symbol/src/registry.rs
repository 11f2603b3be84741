use std::fmt;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::symbol::DottedId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Overload,
    Chooser,
    Constructor,
    Destructor,
    Liveness,
    ToString,
    Opener,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Overload => write!(f, "overload"),
            SymbolKind::Chooser => write!(f, "chooser"),
            SymbolKind::Constructor => write!(f, "constructor"),
            SymbolKind::Destructor => write!(f, "destructor"),
            SymbolKind::Liveness => write!(f, "liveness"),
            SymbolKind::ToString => write!(f, "tostring"),
            SymbolKind::Opener => write!(f, "opener"),
        }
    }
}

/// One generated C symbol and the entity it binds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub symbol: String,
    pub owner: DottedId,
    pub kind: SymbolKind,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("generated symbol `{symbol}` for {owner} collides with {previous}")]
pub struct DuplicateSymbol {
    pub symbol: String,
    pub owner: DottedId,
    pub previous: DottedId,
}

/// Table of every symbol emitted during one generation run.
///
/// Iteration follows registration order so that two runs over the same
/// input list symbols identically.
#[derive(Default, Debug)]
pub struct SymbolTable {
    index: AHashMap<String, usize>,
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: SymbolEntry) -> Result<(), DuplicateSymbol> {
        if let Some(&idx) = self.index.get(&entry.symbol) {
            let previous = &self.entries[idx];
            return Err(DuplicateSymbol {
                symbol: entry.symbol,
                owner: entry.owner,
                previous: previous.owner.clone(),
            });
        }
        self.index.insert(entry.symbol.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn register_many<I>(&mut self, entries: I) -> Result<(), DuplicateSymbol>
    where
        I: IntoIterator<Item = SymbolEntry>,
    {
        for entry in entries {
            self.register(entry)?;
        }
        Ok(())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn resolve(&self, symbol: &str) -> Option<&SymbolEntry> {
        self.index.get(symbol).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> &[SymbolEntry] {
        &self.entries
    }
}
