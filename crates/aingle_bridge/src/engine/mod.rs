//! Native engine interface.
//!
//! The bridge talks to a logic engine only through [`NativeEngine`]: slot
//! allocation, a handful of `put_*` primitives that write a value into a slot,
//! and [`NativeEngine::read`] which dereferences a slot and reports what it is
//! currently bound to.
//!
//! Engines:
//! - Memory: in-process cell store for tests and embedding ([`MemoryEngine`])
//! - Foreign engines implement the trait over their own term references.

pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use memory::{EngineStats, MemoryEngine};

/// An engine term reference ("slot").
///
/// A slot is a place the engine can write a term into. Two slots may end up
/// referring to the same engine variable after [`NativeEngine::put_term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermRef(pub u64);

impl fmt::Display for TermRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Canonical identity of an unbound engine variable.
///
/// Every slot that dereferences to the same engine variable reports the same
/// key, so keys can be compared and hashed where raw slots cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarKey(pub u64);

/// What a slot dereferences to.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeView {
    /// An unbound engine variable.
    Variable(VarKey),
    /// An atom.
    Atom(String),
    /// An integer.
    Integer(i64),
    /// A float.
    Float(f64),
    /// A string object.
    String(String),
    /// A compound; each argument is itself a readable slot.
    Compound { name: String, args: Vec<TermRef> },
}

/// Primitives a logic engine provides for building and reading terms.
///
/// Implementations are synchronous; none of these calls may block on solving.
pub trait NativeEngine {
    /// Allocates a fresh, unwritten slot.
    fn new_term_ref(&mut self) -> TermRef;

    /// Allocates `n` fresh slots.
    fn new_term_refs(&mut self, n: usize) -> Vec<TermRef> {
        (0..n).map(|_| self.new_term_ref()).collect()
    }

    /// Writes a brand-new unbound variable into `slot`.
    fn put_variable(&mut self, slot: TermRef) -> Result<()>;

    /// Makes `slot` refer to whatever `existing` refers to.
    fn put_term(&mut self, slot: TermRef, existing: TermRef) -> Result<()>;

    /// Writes an atom into `slot`.
    fn put_atom(&mut self, slot: TermRef, name: &str) -> Result<()>;

    /// Writes an integer into `slot`.
    fn put_integer(&mut self, slot: TermRef, value: i64) -> Result<()>;

    /// Writes a float into `slot`.
    fn put_float(&mut self, slot: TermRef, value: f64) -> Result<()>;

    /// Writes a string object into `slot`.
    fn put_string(&mut self, slot: TermRef, value: &str) -> Result<()>;

    /// Writes `name(args...)` into `slot`, sharing the terms the arg slots refer to.
    fn cons_functor(&mut self, slot: TermRef, name: &str, args: &[TermRef]) -> Result<()>;

    /// Dereferences `slot` and reports its current value.
    fn read(&self, slot: TermRef) -> Result<NativeView>;
}
