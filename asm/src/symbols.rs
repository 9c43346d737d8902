use crate::error::Error;
use arch::reg::{PREDEFINED, VAR_BASE};
use indexmap::IndexMap;

/// Name-to-address map for one assembly run. Seeded with the predefined
/// platform symbols; grows with label declarations (pass 1) and implicit
/// variable allocations (pass 2).
pub struct SymbolTable {
    table: IndexMap<String, u16>,
    next_var: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = IndexMap::new();
        for (name, addr) in PREDEFINED {
            table.insert(name.to_string(), addr);
        }
        SymbolTable {
            table,
            next_var: VAR_BASE,
        }
    }

    /// Bind a `(name)` declaration to an instruction address. Colliding
    /// with any existing entry is fatal.
    pub fn declare_label(&mut self, name: &str, addr: u16) -> Result<(), Error> {
        if self.table.contains_key(name) {
            return Err(Error::DuplicateLabel(name.to_string()));
        }
        self.table.insert(name.to_string(), addr);
        Ok(())
    }

    /// Look up a symbol, allocating the next free variable register on
    /// first sight. Never fails.
    pub fn resolve(&mut self, name: &str) -> u16 {
        if let Some(&addr) = self.table.get(name) {
            return addr;
        }
        let addr = self.next_var;
        self.next_var += 1;
        self.table.insert(name.to_string(), addr);
        addr
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.table.get(name).copied()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined() {
        let mut table = SymbolTable::new();
        assert_eq!(table.resolve("SP"), 0);
        assert_eq!(table.resolve("R0"), 0);
        assert_eq!(table.resolve("R15"), 15);
        assert_eq!(table.resolve("SCREEN"), 16384);
        assert_eq!(table.resolve("KBD"), 24576);
    }

    #[test]
    fn labels() {
        let mut table = SymbolTable::new();
        table.declare_label("LOOP", 4).unwrap();
        assert_eq!(table.resolve("LOOP"), 4);
        assert!(matches!(
            table.declare_label("LOOP", 9),
            Err(Error::DuplicateLabel(_))
        ));
        assert!(matches!(
            table.declare_label("SP", 1),
            Err(Error::DuplicateLabel(_))
        ));
    }

    #[test]
    fn variables_in_first_occurrence_order() {
        let mut table = SymbolTable::new();
        assert_eq!(table.resolve("i"), 16);
        assert_eq!(table.resolve("sum"), 17);
        assert_eq!(table.resolve("i"), 16);
        assert_eq!(table.resolve("j"), 18);
    }

    #[test]
    fn label_wins_over_variable_slot() {
        let mut table = SymbolTable::new();
        table.declare_label("END", 100).unwrap();
        assert_eq!(table.resolve("END"), 100);
        assert_eq!(table.resolve("x"), 16);
    }
}
