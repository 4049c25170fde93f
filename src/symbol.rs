use std::{error::Error, fmt};

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

use crate::memory::{DATA_START, MEMORY_MAX};

type FxMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Most symbols that fit in the data segment.
pub const SYMBOL_MAX: usize = MEMORY_MAX - DATA_START;

/// Symbol table of symbol -> data segment address.
///
/// Addresses are handed out in first-reference order, starting at [`DATA_START`], and are never
/// reused. Insertion order of the map is therefore also address order.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    table: FxMap<String, usize>,
}

/// Every data segment address is already taken by a symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationExhausted {
    pub symbol: String,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            table: IndexMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Address of `name`, allocating the next free data address on first reference.
    pub fn resolve(&mut self, name: &str) -> Result<usize, AllocationExhausted> {
        if let Some(addr) = self.table.get(name) {
            return Ok(*addr);
        }
        if self.table.len() >= SYMBOL_MAX {
            return Err(AllocationExhausted {
                symbol: name.to_string(),
            });
        }
        let addr = DATA_START + self.table.len();
        self.table.insert(name.to_string(), addr);
        Ok(addr)
    }

    /// Address of `name` without allocating.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.table.get(name).copied()
    }

    /// Reverse lookup, for printing data memory.
    pub fn name_at(&self, addr: usize) -> Option<&str> {
        let idx = addr.checked_sub(DATA_START)?;
        self.table.get_index(idx).map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.table.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Error for AllocationExhausted {}

impl fmt::Display for AllocationExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot allocate symbol `{}`: all {} data addresses are in use.",
            self.symbol, SYMBOL_MAX
        )
    }
}
