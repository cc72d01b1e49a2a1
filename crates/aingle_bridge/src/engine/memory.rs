//! In-memory engine
//!
//! A small cell store implementing [`NativeEngine`]. Every slot is a cell;
//! aliasing and binding turn a cell into a reference to another cell, and
//! reads follow references to the end of the chain. There is no unification
//! or search here: bindings are made explicitly with [`MemoryEngine::bind`].

use super::{NativeEngine, NativeView, TermRef, VarKey};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    /// Allocated but never written.
    Empty,
    Unbound,
    Ref(usize),
    Atom(String),
    Integer(i64),
    Float(f64),
    Text(String),
    Compound { name: String, args: Vec<usize> },
}

/// Counters for the primitives a [`MemoryEngine`] has served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Slots allocated with `new_term_ref`.
    pub term_refs: usize,
    /// Fresh variables written with `put_variable`.
    pub variables: usize,
    /// Slots aliased to another with `put_term`.
    pub aliases: usize,
    /// Variables bound with `bind`.
    pub binds: usize,
}

/// In-process reference engine.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    cells: Vec<Cell>,
    stats: EngineStats,
}

impl MemoryEngine {
    /// Create a new empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            stats: EngineStats::default(),
        }
    }

    /// Number of allocated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Counters since creation.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Binds the unbound variable `var` refers to so that it refers to `value`.
    ///
    /// This stands in for the bindings a real engine would produce while
    /// solving a goal.
    pub fn bind(&mut self, var: TermRef, value: TermRef) -> Result<()> {
        let target = self.deref(var)?;
        if self.cells[target] != Cell::Unbound {
            return Err(Error::AlreadyBound(var));
        }
        let value_cell = self.written(value)?;
        if value_cell != target {
            self.cells[target] = Cell::Ref(value_cell);
        }
        self.stats.binds += 1;
        Ok(())
    }

    fn index(&self, slot: TermRef) -> Result<usize> {
        usize::try_from(slot.0)
            .ok()
            .filter(|&i| i < self.cells.len())
            .ok_or(Error::DanglingHandle(slot))
    }

    /// Follows references from `slot` to the end of the chain.
    fn deref(&self, slot: TermRef) -> Result<usize> {
        let mut i = self.index(slot)?;
        while let Cell::Ref(next) = self.cells[i] {
            i = next;
        }
        Ok(i)
    }

    /// Like `deref`, but rejects slots that were never written.
    fn written(&self, slot: TermRef) -> Result<usize> {
        let i = self.deref(slot)?;
        match self.cells[i] {
            Cell::Empty => Err(Error::DanglingHandle(slot)),
            _ => Ok(i),
        }
    }

    fn set(&mut self, slot: TermRef, cell: Cell) -> Result<()> {
        let i = self.index(slot)?;
        self.cells[i] = cell;
        Ok(())
    }
}

impl NativeEngine for MemoryEngine {
    fn new_term_ref(&mut self) -> TermRef {
        self.cells.push(Cell::Empty);
        self.stats.term_refs += 1;
        TermRef((self.cells.len() - 1) as u64)
    }

    fn put_variable(&mut self, slot: TermRef) -> Result<()> {
        self.set(slot, Cell::Unbound)?;
        self.stats.variables += 1;
        Ok(())
    }

    fn put_term(&mut self, slot: TermRef, existing: TermRef) -> Result<()> {
        let i = self.index(slot)?;
        let target = self.written(existing)?;
        if target != i {
            self.cells[i] = Cell::Ref(target);
        }
        self.stats.aliases += 1;
        Ok(())
    }

    fn put_atom(&mut self, slot: TermRef, name: &str) -> Result<()> {
        self.set(slot, Cell::Atom(name.to_string()))
    }

    fn put_integer(&mut self, slot: TermRef, value: i64) -> Result<()> {
        self.set(slot, Cell::Integer(value))
    }

    fn put_float(&mut self, slot: TermRef, value: f64) -> Result<()> {
        self.set(slot, Cell::Float(value))
    }

    fn put_string(&mut self, slot: TermRef, value: &str) -> Result<()> {
        self.set(slot, Cell::Text(value.to_string()))
    }

    fn cons_functor(&mut self, slot: TermRef, name: &str, args: &[TermRef]) -> Result<()> {
        let args = args
            .iter()
            .map(|&arg| self.written(arg))
            .collect::<Result<Vec<_>>>()?;
        self.set(
            slot,
            Cell::Compound {
                name: name.to_string(),
                args,
            },
        )
    }

    fn read(&self, slot: TermRef) -> Result<NativeView> {
        let i = self.written(slot)?;
        Ok(match &self.cells[i] {
            Cell::Unbound => NativeView::Variable(VarKey(i as u64)),
            Cell::Atom(a) => NativeView::Atom(a.clone()),
            Cell::Integer(n) => NativeView::Integer(*n),
            Cell::Float(x) => NativeView::Float(*x),
            Cell::Text(s) => NativeView::String(s.clone()),
            Cell::Compound { name, args } => NativeView::Compound {
                name: name.clone(),
                args: args.iter().map(|&a| TermRef(a as u64)).collect(),
            },
            Cell::Empty | Cell::Ref(_) => unreachable!("written() returns a dereferenced, written cell"),
        })
    }
}
