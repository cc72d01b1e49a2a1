//! AIngle Bridge - Term Exchange with Native Logic Engines
//!
//! This crate moves terms between the AIngle host representation and the
//! handle-based terms of a native logic engine. It reconciles two identity
//! models: host variables are *named* values, possibly repeated across a goal,
//! while engine variables are unnamed cells identified by runtime handles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       AIngle Bridge                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                   Invocation                          │   │
//! │  │        open (project) │ substitution (extract)        │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │            │                              │                  │
//! │  ┌──────────────────────┐   ┌──────────────────────────┐   │
//! │  │   ProjectionFrame    │   │ VariableTable + Subst.   │   │
//! │  │  name -> handle      │   │ handle -> Variable       │   │
//! │  └──────────────────────┘   └──────────────────────────┘   │
//! │                           │                                  │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                  NativeEngine                         │   │
//! │  │          Memory │ foreign engine bindings             │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use aingle_bridge::{BridgeConfig, Invocation, MemoryEngine, NativeEngine, Term};
//!
//! let mut engine = MemoryEngine::new();
//!
//! // likes(X, X, _)
//! let args = vec![Term::var("X")?, Term::var("X")?, Term::anonymous()];
//! let query = Invocation::open(&mut engine, &args, BridgeConfig::default())?;
//!
//! // Both X occurrences share one engine variable.
//! assert_eq!(engine.read(query.args()[0])?, engine.read(query.args()[1])?);
//!
//! let subst = query.substitution(&engine)?;
//! assert!(subst.contains("X"));
//! assert!(!subst.contains("_"));
//! # Ok::<(), aingle_bridge::Error>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod invocation;
pub mod naming;
pub mod projection;
pub mod reader;
pub mod substitution;
pub mod term;
pub mod variable;

// Re-exports
pub use config::BridgeConfig;
pub use engine::{EngineStats, MemoryEngine, NativeEngine, NativeView, TermRef, VarKey};
pub use error::{Error, Result};
pub use invocation::Invocation;
pub use naming::NameSequence;
pub use projection::{put_terms, ProjectedVariable, ProjectionFrame};
pub use reader::VariableTable;
pub use substitution::Substitution;
pub use term::{Compound, Term};
pub use variable::{NamePolicy, Variable, ANONYMOUS};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
