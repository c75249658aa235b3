use std::collections::HashMap;

use crate::instr::Word;

/// A sparse tape: only visited cells are stored, every other cell reads as 0.
#[derive(Debug, Default, Clone)]
pub struct Tape {
    cells: HashMap<Word, Word>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a cell without creating it.
    pub fn get(&self, addr: Word) -> Word {
        self.cells.get(&addr).copied().unwrap_or(0)
    }

    /// Access a cell, creating it with value 0 on first use.
    pub fn cell_mut(&mut self, addr: Word) -> &mut Word {
        self.cells.entry(addr).or_insert(0)
    }

    /// Number of cells touched so far.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unvisited_cells_read_zero() {
        let tape = Tape::new();
        assert_eq!(tape.get(0), 0);
        assert_eq!(tape.get(Word::MAX), 0);
        assert!(tape.is_empty());
    }

    #[test]
    fn cells_are_created_lazily() {
        let mut tape = Tape::new();
        *tape.cell_mut(7) += 3;
        let _ = tape.cell_mut(Word::MAX);
        assert_eq!(tape.get(7), 3);
        assert_eq!(tape.len(), 2);
    }
}
