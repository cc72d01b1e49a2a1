//! Reading engine terms back into host terms.

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::engine::{NativeEngine, NativeView, TermRef, VarKey};
use crate::error::{Error, Result};
use crate::term::Term;
use crate::variable::Variable;

/// Reverse interning table: engine variable to the host variable standing for it.
///
/// Built lazily while reading one solution. An engine variable seen for the
/// first time is given a fresh auto-named [`Variable`]; every later sighting
/// within the same table yields that same variable, so sharing between
/// unbound engine variables survives the trip back to the host.
#[derive(Debug, Default, Clone)]
pub struct VariableTable {
    vars: HashMap<VarKey, Variable>,
}

impl VariableTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The host variable recorded for `key`, if any.
    pub fn get(&self, key: VarKey) -> Option<&Variable> {
        self.vars.get(&key)
    }

    /// Records `var` for `key` unless the key is already mapped.
    ///
    /// # Returns
    ///
    /// The variable now recorded for `key`.
    pub fn insert(&mut self, key: VarKey, var: Variable) -> &Variable {
        self.vars.entry(key).or_insert(var)
    }

    /// The host variable for `key`, synthesizing and recording one if unseen.
    pub fn resolve(&mut self, key: VarKey) -> Variable {
        self.vars
            .entry(key)
            .or_insert_with(|| {
                let var = Variable::new();
                trace!("Materialized engine variable {:?} as {}", key, var);
                var
            })
            .clone()
    }

    /// Number of mapped engine variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Term {
    /// Reads the term `slot` currently refers to.
    ///
    /// Atoms, numbers, strings and compounds are copied out. Unbound engine
    /// variables, at any depth, become host variables through `vars`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicTerm`] if a compound contains itself, as after
    /// binding `X = f(X)` without an occurs check. Any error from the engine is
    /// returned unchanged.
    pub fn from_native<E: NativeEngine + ?Sized>(
        engine: &E,
        slot: TermRef,
        vars: &mut VariableTable,
    ) -> Result<Term> {
        read_term(engine, slot, vars, &mut HashSet::new())
    }
}

/// `path` holds the compound slots currently being read, outermost first.
fn read_term<E: NativeEngine + ?Sized>(
    engine: &E,
    slot: TermRef,
    vars: &mut VariableTable,
    path: &mut HashSet<TermRef>,
) -> Result<Term> {
    Ok(match engine.read(slot)? {
        NativeView::Variable(key) => Term::Variable(vars.resolve(key)),
        NativeView::Atom(a) => Term::Atom(a),
        NativeView::Integer(i) => Term::Integer(i),
        NativeView::Float(x) => Term::Float(x),
        NativeView::String(s) => Term::String(s),
        NativeView::Compound { name, args } => {
            if !path.insert(slot) {
                return Err(Error::CyclicTerm(slot));
            }
            let args = args
                .into_iter()
                .map(|arg| read_term(engine, arg, vars, path))
                .collect::<Result<Vec<_>>>()?;
            path.remove(&slot);
            Term::compound(name, args)
        }
    })
}
