//! Substitution extraction: reading solved bindings back by variable name.
//!
//! After the engine has solved a goal, every projected variable occurrence is
//! visited in projection order. Occurrences that should be told (see
//! [`Variable::should_tell`]) and whose name is not yet present are read with
//! [`Term::from_native`] and recorded; the first value recorded for a name
//! wins.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::BridgeConfig;
use crate::engine::{NativeEngine, TermRef};
use crate::error::Result;
use crate::projection::ProjectionFrame;
use crate::reader::VariableTable;
use crate::term::Term;
use crate::variable::Variable;

/// A mapping from variable names to the terms they are bound to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Substitution {
    bindings: IndexMap<String, Term>,
}

impl Substitution {
    /// Creates an empty substitution.
    pub fn new() -> Self {
        Self::default()
    }

    /// The term bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.bindings.get(name)
    }

    /// Whether `name` has an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Records `name -> term` unless `name` already has an entry.
    ///
    /// # Returns
    ///
    /// `true` if the entry was added.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, term: Term) -> bool {
        match self.bindings.entry(name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(term);
                true
            }
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Entries in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bound variable names in the order they were recorded.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Serializes the substitution as a JSON object keyed by variable name.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl IntoIterator for Substitution {
    type Item = (String, Term);
    type IntoIter = indexmap::map::IntoIter<String, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

impl Variable {
    /// Adds this variable's current binding to `subst`, if policy allows.
    ///
    /// Nothing happens if the variable is anonymous, if it is a don't-tell-me
    /// variable and `config.dont_tell_me` is set, or if `subst` already has an
    /// entry for the name. Otherwise the term `term` refers to is read,
    /// materializing nested engine variables through `vars`.
    ///
    /// # Arguments
    ///
    /// * `engine` - The engine that solved the goal.
    /// * `term` - The slot recorded for this variable at projection time.
    /// * `subst` - The substitution being assembled.
    /// * `vars` - The reverse table for this solution.
    /// * `config` - Supplies the don't-tell-me mode.
    ///
    /// # Returns
    ///
    /// `true` if an entry was added.
    pub fn contribute_substitution<E: NativeEngine + ?Sized>(
        &self,
        engine: &E,
        term: TermRef,
        subst: &mut Substitution,
        vars: &mut VariableTable,
        config: &BridgeConfig,
    ) -> Result<bool> {
        if !self.should_tell(config) || subst.contains(self.name()) {
            return Ok(false);
        }
        let value = Term::from_native(engine, term, vars)?;
        Ok(subst.insert_if_absent(self.name(), value))
    }
}

impl ProjectionFrame {
    /// Contributes every projected occurrence to `subst`, in projection order.
    pub fn contribute_substitutions<E: NativeEngine + ?Sized>(
        &self,
        engine: &E,
        subst: &mut Substitution,
        vars: &mut VariableTable,
        config: &BridgeConfig,
    ) -> Result<()> {
        for occurrence in self.occurrences() {
            occurrence.variable.contribute_substitution(
                engine,
                occurrence.term,
                subst,
                vars,
                config,
            )?;
        }
        debug!(
            "Substitution assembled: {} of {} occurrences told",
            subst.len(),
            self.occurrences().len()
        );
        Ok(())
    }
}
