//! Term projection: writing host terms into engine slots.
//!
//! Projection walks host terms and writes them into engine slots. Variables go
//! through a [`ProjectionFrame`], which interns names to the slot of their
//! first occurrence so that every later occurrence of the same name becomes an
//! alias of that slot. The anonymous variable `_` is never interned: each
//! occurrence gets its own fresh engine variable.
//!
//! A frame belongs to exactly one invocation. It also records, per variable
//! occurrence, the slot that extraction must later read; this side table
//! replaces any per-`Variable` scratch state, so the same `Variable` values can
//! be projected by any number of invocations, concurrently or not.

use indexmap::IndexMap;
use log::trace;

use crate::engine::{NativeEngine, TermRef};
use crate::error::Result;
use crate::term::Term;
use crate::variable::Variable;

/// One projected variable occurrence.
#[derive(Debug, Clone)]
pub struct ProjectedVariable {
    /// The host variable.
    pub variable: Variable,
    /// The slot holding the engine variable this occurrence resolves to.
    pub term: TermRef,
    /// Zero-based arrival order of the distinct variable among those seen so far.
    pub index: usize,
}

/// Per-invocation projection state.
#[derive(Debug, Default)]
pub struct ProjectionFrame {
    /// Forward interning table: variable name to the slot of its first occurrence.
    varnames_to_refs: IndexMap<String, TermRef>,
    /// Every variable occurrence, in projection order.
    occurrences: Vec<ProjectedVariable>,
}

impl ProjectionFrame {
    /// Creates an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot interned for `name`, if it has been projected in this frame.
    pub fn get(&self, name: &str) -> Option<TermRef> {
        self.varnames_to_refs.get(name).copied()
    }

    /// The arrival index of `name`, if it has been projected in this frame.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.varnames_to_refs.get_index_of(name)
    }

    /// Number of distinct interned (non-anonymous) names.
    pub fn len(&self) -> usize {
        self.varnames_to_refs.len()
    }

    /// Check if no name has been interned
    pub fn is_empty(&self) -> bool {
        self.varnames_to_refs.is_empty()
    }

    /// Interned names with their slots, in arrival order.
    pub fn names(&self) -> impl Iterator<Item = (&str, TermRef)> {
        self.varnames_to_refs.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// All variable occurrences, in projection order.
    pub fn occurrences(&self) -> &[ProjectedVariable] {
        &self.occurrences
    }

    /// Forgets everything; the frame can then serve a new invocation.
    pub fn clear(&mut self) {
        self.varnames_to_refs.clear();
        self.occurrences.clear();
    }
}

impl Variable {
    /// Makes `slot` represent this variable in the engine.
    ///
    /// If the variable is anonymous, or its name has not been seen in `frame`,
    /// a fresh engine variable is written into `slot` and (unless anonymous)
    /// the name is interned to `slot`. Otherwise `slot` is aliased to the slot
    /// interned for the name.
    ///
    /// # Returns
    ///
    /// The slot extraction must read for this occurrence.
    pub fn project<E: NativeEngine + ?Sized>(
        &self,
        engine: &mut E,
        slot: TermRef,
        frame: &mut ProjectionFrame,
    ) -> Result<TermRef> {
        let interned = if self.is_anonymous() {
            None
        } else {
            frame
                .varnames_to_refs
                .get_full(self.name())
                .map(|(index, _, &existing)| (index, existing))
        };

        let (term, index) = match interned {
            Some((index, existing)) => {
                engine.put_term(slot, existing)?;
                trace!("Shared variable {} at {} -> {}", self.name(), slot, existing);
                (existing, index)
            }
            None => {
                let index = frame.varnames_to_refs.len();
                engine.put_variable(slot)?;
                if !self.is_anonymous() {
                    frame.varnames_to_refs.insert(self.name().to_string(), slot);
                }
                trace!("Fresh variable {} #{} at {}", self.name(), index, slot);
                (slot, index)
            }
        };

        frame.occurrences.push(ProjectedVariable {
            variable: self.clone(),
            term,
            index,
        });
        Ok(term)
    }
}

impl Term {
    /// Writes this term into `slot`, projecting its variables through `frame`.
    pub fn put<E: NativeEngine + ?Sized>(
        &self,
        engine: &mut E,
        slot: TermRef,
        frame: &mut ProjectionFrame,
    ) -> Result<()> {
        match self {
            Term::Variable(v) => v.project(engine, slot, frame).map(|_| ()),
            Term::Atom(a) => engine.put_atom(slot, a),
            Term::Integer(i) => engine.put_integer(slot, *i),
            Term::Float(x) => engine.put_float(slot, *x),
            Term::String(s) => engine.put_string(slot, s),
            Term::Compound(c) => {
                let args = put_terms(engine, &c.args, frame)?;
                engine.cons_functor(slot, &c.name, &args)
            }
        }
    }
}

/// Writes `terms` into freshly allocated consecutive slots, sharing `frame`.
///
/// # Returns
///
/// The slots, one per term, suitable as an engine argument vector.
pub fn put_terms<E: NativeEngine + ?Sized>(
    engine: &mut E,
    terms: &[Term],
    frame: &mut ProjectionFrame,
) -> Result<Vec<TermRef>> {
    let slots = engine.new_term_refs(terms.len());
    for (term, &slot) in terms.iter().zip(&slots) {
        term.put(engine, slot, frame)?;
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MemoryEngine, NativeView};

    fn var(name: &str) -> Variable {
        Variable::named(name).unwrap()
    }

    #[test]
    fn test_repeated_name_shares_slot() {
        let mut engine = MemoryEngine::new();
        let mut frame = ProjectionFrame::new();
        let slots = engine.new_term_refs(2);

        let first = var("X").project(&mut engine, slots[0], &mut frame).unwrap();
        let second = var("X").project(&mut engine, slots[1], &mut frame).unwrap();

        assert_eq!(first, second);
        assert_eq!(engine.read(slots[0]).unwrap(), engine.read(slots[1]).unwrap());
        assert_eq!(frame.len(), 1);
        assert_eq!(engine.stats().variables, 1);
        assert_eq!(engine.stats().aliases, 1);
    }

    #[test]
    fn test_anonymous_never_interned() {
        let mut engine = MemoryEngine::new();
        let mut frame = ProjectionFrame::new();
        let slots = engine.new_term_refs(2);

        Variable::anonymous().project(&mut engine, slots[0], &mut frame).unwrap();
        Variable::anonymous().project(&mut engine, slots[1], &mut frame).unwrap();

        assert!(frame.is_empty());
        assert!(frame.get("_").is_none());
        assert_ne!(engine.read(slots[0]).unwrap(), engine.read(slots[1]).unwrap());
        assert_eq!(engine.stats().variables, 2);
    }

    #[test]
    fn test_arrival_indices() {
        let mut engine = MemoryEngine::new();
        let mut frame = ProjectionFrame::new();
        let goal = Term::compound(
            "p",
            vec![
                Term::var("A").unwrap(),
                Term::anonymous(),
                Term::var("B").unwrap(),
                Term::var("A").unwrap(),
            ],
        );
        let slot = engine.new_term_ref();
        goal.put(&mut engine, slot, &mut frame).unwrap();

        let indices: Vec<_> = frame
            .occurrences()
            .iter()
            .map(|o| (o.variable.name().to_string(), o.index))
            .collect();
        assert_eq!(
            indices,
            vec![
                ("A".to_string(), 0),
                ("_".to_string(), 1),
                ("B".to_string(), 1),
                ("A".to_string(), 0),
            ]
        );
        assert_eq!(frame.index_of("B"), Some(1));
    }

    #[test]
    fn test_put_compound() {
        let mut engine = MemoryEngine::new();
        let mut frame = ProjectionFrame::new();
        let term = Term::compound("f", vec![Term::atom("a"), Term::integer(1)]);
        let slots = put_terms(&mut engine, &[term], &mut frame).unwrap();

        match engine.read(slots[0]).unwrap() {
            NativeView::Compound { name, args } => {
                assert_eq!(name, "f");
                assert_eq!(args.len(), 2);
                assert_eq!(engine.read(args[1]).unwrap(), NativeView::Integer(1));
            }
            other => panic!("expected compound, got {:?}", other),
        }
        assert!(frame.occurrences().is_empty());
    }

    #[test]
    fn test_sharing_across_terms_of_one_frame() {
        let mut engine = MemoryEngine::new();
        let mut frame = ProjectionFrame::new();
        let terms = vec![
            Term::compound("f", vec![Term::var("X").unwrap()]),
            Term::var("X").unwrap(),
        ];
        let slots = put_terms(&mut engine, &terms, &mut frame).unwrap();

        let inner = match engine.read(slots[0]).unwrap() {
            NativeView::Compound { args, .. } => args[0],
            other => panic!("expected compound, got {:?}", other),
        };
        assert_eq!(engine.read(inner).unwrap(), engine.read(slots[1]).unwrap());
    }

    #[test]
    fn test_clear_resets_frame() {
        let mut engine = MemoryEngine::new();
        let mut frame = ProjectionFrame::new();
        let slot = engine.new_term_ref();
        var("X").project(&mut engine, slot, &mut frame).unwrap();
        frame.clear();
        assert!(frame.is_empty());
        assert!(frame.occurrences().is_empty());
    }
}
