//! Query invocations
//!
//! An [`Invocation`] ties projection and extraction together for one query:
//! [`Invocation::open`] projects the goal's arguments once, sharing a single
//! [`ProjectionFrame`] across all of them, and [`Invocation::substitution`]
//! reads a solution back after the engine has solved the goal. The engine call
//! itself happens between the two and is not part of this crate.
//!
//! ```
//! use aingle_bridge::{BridgeConfig, Invocation, MemoryEngine, NativeEngine, Term};
//!
//! let mut engine = MemoryEngine::new();
//! let args = vec![Term::var("X")?, Term::var("X")?];
//! let query = Invocation::open(&mut engine, &args, BridgeConfig::default())?;
//!
//! // Stand-in for the engine solving the goal.
//! let value = engine.new_term_ref();
//! engine.put_atom(value, "done")?;
//! engine.bind(query.args()[0], value)?;
//!
//! let subst = query.substitution(&engine)?;
//! assert_eq!(subst.get("X"), Some(&Term::atom("done")));
//! assert_eq!(subst.len(), 1);
//! # Ok::<(), aingle_bridge::Error>(())
//! ```

use log::debug;

use crate::config::BridgeConfig;
use crate::engine::{NativeEngine, TermRef};
use crate::error::Result;
use crate::projection::{put_terms, ProjectionFrame};
use crate::reader::VariableTable;
use crate::substitution::Substitution;
use crate::term::Term;

/// The host-side state of one open query.
///
/// An invocation owns its tables; concurrent queries each need their own.
#[derive(Debug)]
pub struct Invocation {
    frame: ProjectionFrame,
    args: Vec<TermRef>,
    config: BridgeConfig,
}

impl Invocation {
    /// Projects `args` into fresh engine slots.
    ///
    /// # Arguments
    ///
    /// * `engine` - The engine that will solve the goal.
    /// * `args` - The goal's arguments, in order.
    /// * `config` - Configuration used when reading solutions.
    ///
    /// # Returns
    ///
    /// The open invocation; its [`args`](Invocation::args) are the engine
    /// argument vector for the goal.
    pub fn open<E: NativeEngine + ?Sized>(
        engine: &mut E,
        args: &[Term],
        config: BridgeConfig,
    ) -> Result<Self> {
        let mut frame = ProjectionFrame::new();
        let slots = put_terms(engine, args, &mut frame)?;
        debug!(
            "Opened invocation: arity {}, {} distinct variables, {} occurrences",
            slots.len(),
            frame.len(),
            frame.occurrences().len()
        );
        Ok(Self {
            frame,
            args: slots,
            config,
        })
    }

    /// The engine argument vector.
    pub fn args(&self) -> &[TermRef] {
        &self.args
    }

    /// Number of goal arguments.
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// The projection state for this invocation.
    pub fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    /// The configuration solutions are read with.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The arrival index of a projected variable name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.frame.index_of(name)
    }

    /// Reads the engine's current bindings as a substitution.
    ///
    /// Each call starts with a fresh reverse table, so it can be repeated for
    /// every solution of a re-satisfiable query.
    pub fn substitution<E: NativeEngine + ?Sized>(&self, engine: &E) -> Result<Substitution> {
        let mut subst = Substitution::new();
        let mut vars = VariableTable::new();
        self.frame
            .contribute_substitutions(engine, &mut subst, &mut vars, &self.config)?;
        Ok(subst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;

    #[test]
    fn test_open_projects_each_argument() {
        let mut engine = MemoryEngine::new();
        let args = vec![
            Term::var("X").unwrap(),
            Term::atom("a"),
            Term::var("X").unwrap(),
        ];
        let query = Invocation::open(&mut engine, &args, BridgeConfig::default()).unwrap();

        assert_eq!(query.arity(), 3);
        assert_eq!(query.index_of("X"), Some(0));
        assert_eq!(
            engine.read(query.args()[0]).unwrap(),
            engine.read(query.args()[2]).unwrap()
        );
    }

    #[test]
    fn test_substitution_per_solution() {
        let mut engine = MemoryEngine::new();
        let args = vec![Term::var("X").unwrap()];
        let query = Invocation::open(&mut engine, &args, BridgeConfig::default()).unwrap();

        let unbound = query.substitution(&engine).unwrap();
        assert!(unbound.get("X").unwrap().is_variable());

        let value = engine.new_term_ref();
        engine.put_integer(value, 1).unwrap();
        engine.bind(query.args()[0], value).unwrap();
        let bound = query.substitution(&engine).unwrap();
        assert_eq!(bound.get("X"), Some(&Term::integer(1)));
    }

    #[test]
    fn test_quiet_invocation_hides_underscored() {
        let mut engine = MemoryEngine::new();
        let args = vec![Term::var("_Hidden").unwrap(), Term::var("Shown").unwrap()];
        let query = Invocation::open(&mut engine, &args, BridgeConfig::quiet()).unwrap();

        let subst = query.substitution(&engine).unwrap();
        assert!(!subst.contains("_Hidden"));
        assert!(subst.contains("Shown"));
    }
}
