use num_bigint::BigInt;

use crate::instruction::Instruction;

/// ALI can address 256 cells of memory.
pub const MEMORY_MAX: usize = 256;
/// First address of the data segment. Everything below holds instructions.
pub const DATA_START: usize = 128;

/// A single memory slot.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    /// Nothing has been written here yet. Distinct from `Value(0)`.
    #[default]
    Empty,
    Instruction(Instruction),
    Value(BigInt),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Integer content of a data cell. Empty cells read as zero.
    ///
    /// Instruction cells also read as zero, since opcodes never place them in the data segment.
    pub fn value(&self) -> BigInt {
        match self {
            Cell::Value(val) => val.clone(),
            Cell::Empty | Cell::Instruction(_) => BigInt::default(),
        }
    }
}

/// Fixed-size store for instructions (`0..128`) and data (`128..256`).
///
/// Segment typing is not enforced here, only by which opcodes write where.
#[derive(Clone, Debug)]
pub struct MemoryBank {
    cells: Box<[Cell; MEMORY_MAX]>,
}

impl MemoryBank {
    pub fn new() -> Self {
        MemoryBank {
            cells: Box::new(std::array::from_fn(|_| Cell::Empty)),
        }
    }

    /// Panics if `addr` is outside of memory.
    pub fn get(&self, addr: usize) -> &Cell {
        assert!(addr < MEMORY_MAX, "memory address {addr} out of range");
        &self.cells[addr]
    }

    /// Panics if `addr` is outside of memory.
    pub fn set(&mut self, addr: usize, cell: Cell) {
        assert!(addr < MEMORY_MAX, "memory address {addr} out of range");
        self.cells[addr] = cell;
    }

    pub fn instructions(&self) -> impl Iterator<Item = (usize, &Instruction)> {
        self.cells[..DATA_START]
            .iter()
            .enumerate()
            .filter_map(|(addr, cell)| match cell {
                Cell::Instruction(instr) => Some((addr, instr)),
                _ => None,
            })
    }

    /// Occupied cells of the data segment, with their absolute address.
    pub fn data(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells[DATA_START..]
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(offs, cell)| (DATA_START + offs, cell))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl Default for MemoryBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_is_not_zero() {
        let mut mem = MemoryBank::new();
        assert_eq!(mem.get(130), &Cell::Empty);
        mem.set(130, Cell::Value(0.into()));
        assert_eq!(mem.get(130), &Cell::Value(0.into()));
        assert_ne!(mem.get(130), mem.get(131));
        assert_eq!(mem.get(131).value(), BigInt::from(0));
    }

    #[test]
    fn segment_iterators() {
        let mut mem = MemoryBank::new();
        mem.set(0, Cell::Instruction(Instruction::Xch));
        mem.set(3, Cell::Instruction(Instruction::Hlt));
        mem.set(128, Cell::Value(7.into()));
        mem.set(255, Cell::Value((-1).into()));

        let instrs: Vec<_> = mem.instructions().map(|(addr, _)| addr).collect();
        assert_eq!(instrs, [0, 3]);
        let data: Vec<_> = mem.data().map(|(addr, cell)| (addr, cell.value())).collect();
        assert_eq!(data, [(128, BigInt::from(7)), (255, BigInt::from(-1))]);
    }

    #[test]
    #[should_panic]
    fn address_past_end() {
        MemoryBank::new().get(MEMORY_MAX);
    }
}
