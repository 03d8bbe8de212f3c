use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Handle to one identifier entity in a [`SymbolTable`]
///
/// Every AST node that mentions a name holds the same `SymbolId`, so all
/// of them observe the same declared/initialized state and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(usize);

/// State of a single identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    name: String,
    value: Option<i64>,
    declared: bool,
}

impl Symbol {
    fn new(name: &str) -> Self {
        Symbol {
            name: name.to_string(),
            value: None,
            declared: false,
        }
    }

    /// Identifier spelling
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, `None` until the first assignment or read
    pub fn value(&self) -> Option<i64> {
        self.value
    }

    /// True once the owning declaration has executed
    pub fn is_declared(&self) -> bool {
        self.declared
    }

    /// True once the identifier has received a value
    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }
}

/// The single global namespace of a run
///
/// Arena of [`Symbol`]s indexed by [`SymbolId`], plus a name index used
/// for interning while parsing. Entities are never removed.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_name: HashMap<String, SymbolId>,
}

impl SymbolTable {
    /// Creates an empty table
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Returns the entity for `name`, creating it on first sight
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }

        let id = SymbolId(self.symbols.len());
        self.symbols.push(Symbol::new(name));
        self.by_name.insert(name.to_string(), id);
        tracing::trace!(name, index = id.0, "interned identifier");
        id
    }

    /// Finds an existing entity by name
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.by_name.get(name).copied()
    }

    /// Borrow the entity behind `id`
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    /// Spelling of the identifier behind `id`
    pub fn name(&self, id: SymbolId) -> &str {
        &self.symbols[id.0].name
    }

    /// Marks the identifier declared; fails if it already is
    pub fn declare(&mut self, id: SymbolId) -> Result<()> {
        let symbol = &mut self.symbols[id.0];
        if symbol.declared {
            return Err(Error::AlreadyDeclared {
                name: symbol.name.clone(),
            });
        }
        symbol.declared = true;
        Ok(())
    }

    /// Stores a value and marks the identifier initialized
    pub fn assign(&mut self, id: SymbolId, value: i64) {
        self.symbols[id.0].value = Some(value);
    }

    /// Current value; fails if the identifier was never initialized
    pub fn value(&self, id: SymbolId) -> Result<i64> {
        let symbol = &self.symbols[id.0];
        symbol.value.ok_or_else(|| Error::NotInitialized {
            name: symbol.name.clone(),
        })
    }

    /// Number of distinct names seen
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when no name has been interned
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Entities in first-sight order
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId(index), symbol))
    }
}
