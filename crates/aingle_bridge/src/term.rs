//! Host-side term trees.
//!
//! A [`Term`] is a closed set of variants. Callers match on the variant they
//! expect; the structural accessors (`args`, `arity`, `has_functor`) are
//! defined for every variant except [`Term::Variable`], where they fail with
//! [`Error::Unsupported`](crate::Error::Unsupported).

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::variable::Variable;

/// A host-side term.
///
/// Deserialization goes through [`Term::compound`], so a compound with no
/// arguments is read as an atom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TermRepr")]
pub enum Term {
    /// A logical variable.
    Variable(Variable),
    /// A symbolic constant such as `foo` or `[]`.
    Atom(String),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit float.
    Float(f64),
    /// A string object (distinct from an atom).
    String(String),
    /// A functor applied to one or more arguments.
    Compound(Compound),
}

/// Serialized form of [`Term`], before normalization.
#[derive(Deserialize)]
enum TermRepr {
    Variable(Variable),
    Atom(String),
    Integer(i64),
    Float(f64),
    String(String),
    Compound(Compound),
}

impl From<TermRepr> for Term {
    fn from(repr: TermRepr) -> Self {
        match repr {
            TermRepr::Variable(v) => Term::Variable(v),
            TermRepr::Atom(a) => Term::Atom(a),
            TermRepr::Integer(i) => Term::Integer(i),
            TermRepr::Float(x) => Term::Float(x),
            TermRepr::String(s) => Term::String(s),
            TermRepr::Compound(c) => c.into(),
        }
    }
}

/// A compound term `name(arg1, ..., argN)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    /// The functor name.
    pub name: String,
    /// The arguments, in order.
    pub args: Vec<Term>,
}

impl Compound {
    /// Creates a compound term.
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Number of arguments.
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl Term {
    /// Creates an atom.
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    /// Creates an integer.
    pub fn integer(value: i64) -> Self {
        Term::Integer(value)
    }

    /// Creates a float.
    pub fn float(value: f64) -> Self {
        Term::Float(value)
    }

    /// Creates a string object.
    pub fn string(value: impl Into<String>) -> Self {
        Term::String(value.into())
    }

    /// Creates a compound term. A zero-argument compound is represented as an atom.
    pub fn compound(name: impl Into<String>, args: Vec<Term>) -> Self {
        if args.is_empty() {
            Term::Atom(name.into())
        } else {
            Term::Compound(Compound::new(name, args))
        }
    }

    /// Creates a variable term with an explicit name.
    pub fn var(name: impl Into<String>) -> Result<Self> {
        Ok(Term::Variable(Variable::named(name)?))
    }

    /// Creates an anonymous variable term.
    pub fn anonymous() -> Self {
        Term::Variable(Variable::anonymous())
    }

    /// Returns `true` if this term is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Returns the variable if this term is one.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// The arguments of this term; empty for atomic terms.
    pub fn args(&self) -> Result<&[Term]> {
        match self {
            Term::Variable(v) => v.args(),
            Term::Compound(c) => Ok(&c.args),
            Term::Atom(_) | Term::Integer(_) | Term::Float(_) | Term::String(_) => Ok(&[]),
        }
    }

    /// The arity of this term; zero for atomic terms.
    pub fn arity(&self) -> Result<usize> {
        match self {
            Term::Variable(v) => v.arity(),
            Term::Compound(c) => Ok(c.arity()),
            Term::Atom(_) | Term::Integer(_) | Term::Float(_) | Term::String(_) => Ok(0),
        }
    }

    /// Whether this term has the functor `name/arity`.
    ///
    /// Atoms have functor `name/0`. Numbers and strings have no named functor.
    pub fn has_functor(&self, name: &str, arity: usize) -> Result<bool> {
        match self {
            Term::Variable(v) => v.has_functor(name, arity),
            Term::Atom(a) => Ok(arity == 0 && a == name),
            Term::Compound(c) => Ok(c.arity() == arity && c.name == name),
            Term::Integer(_) | Term::Float(_) | Term::String(_) => Ok(false),
        }
    }

    /// A short name for the kind of this term.
    pub fn type_name(&self) -> &'static str {
        match self {
            Term::Variable(v) => v.type_name(),
            Term::Atom(_) => "Atom",
            Term::Integer(_) => "Integer",
            Term::Float(_) => "Float",
            Term::String(_) => "String",
            Term::Compound(_) => "Compound",
        }
    }

    /// Distinct non-anonymous variable names in first-occurrence order.
    pub fn variable_names(&self) -> Vec<String> {
        let mut names = IndexSet::new();
        self.collect_variable_names(&mut names);
        names.into_iter().collect()
    }

    fn collect_variable_names(&self, names: &mut IndexSet<String>) {
        match self {
            Term::Variable(v) if !v.is_anonymous() => {
                names.insert(v.name().to_string());
            }
            Term::Compound(c) => {
                for arg in &c.args {
                    arg.collect_variable_names(names);
                }
            }
            _ => {}
        }
    }

    /// Visits every variable occurrence, depth-first, left to right.
    pub fn for_each_variable<'a>(&'a self, f: &mut impl FnMut(&'a Variable)) {
        match self {
            Term::Variable(v) => f(v),
            Term::Compound(c) => {
                for arg in &c.args {
                    arg.for_each_variable(f);
                }
            }
            _ => {}
        }
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

impl From<Compound> for Term {
    fn from(c: Compound) -> Self {
        Term::compound(c.name, c.args)
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Term::Integer(i)
    }
}

impl From<f64> for Term {
    fn from(f: f64) -> Self {
        Term::Float(f)
    }
}

/// Whether `name` can be written without quotes.
fn is_plain_atom(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => name == "[]" || name == "{}" || name == "!" || name == ";",
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    write!(f, "{}", quote)?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "{}", quote)
}

fn write_atom(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_atom(name) {
        f.write_str(name)
    } else {
        write_quoted(f, name, '\'')
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Atom(a) => write_atom(f, a),
            Term::Integer(i) => write!(f, "{}", i),
            Term::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Term::Float(x) => write!(f, "{}", x),
            Term::String(s) => write_quoted(f, s, '"'),
            Term::Compound(c) => write!(f, "{}", c),
        }
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_atom(f, &self.name)?;
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn x() -> Term {
        Term::var("X").unwrap()
    }

    #[test]
    fn test_structural_accessors() {
        let t = Term::compound("f", vec![Term::atom("a"), x()]);
        assert_eq!(t.arity().unwrap(), 2);
        assert_eq!(t.args().unwrap().len(), 2);
        assert!(t.has_functor("f", 2).unwrap());
        assert!(!t.has_functor("f", 1).unwrap());

        let a = Term::atom("a");
        assert_eq!(a.arity().unwrap(), 0);
        assert!(a.has_functor("a", 0).unwrap());
        assert!(!Term::integer(3).has_functor("3", 0).unwrap());
    }

    #[test]
    fn test_variable_accessors_fail() {
        let v = x();
        assert!(matches!(v.args(), Err(Error::Unsupported { .. })));
        assert!(matches!(v.arity(), Err(Error::Unsupported { .. })));
        assert!(matches!(v.has_functor("X", 0), Err(Error::Unsupported { .. })));
        assert_eq!(v.type_name(), "Variable");
    }

    #[test]
    fn test_zero_arity_compound_is_atom() {
        assert_eq!(Term::compound("nil", vec![]), Term::atom("nil"));
    }

    #[test]
    fn test_variable_names() {
        let t = Term::compound(
            "p",
            vec![
                x(),
                Term::anonymous(),
                Term::compound("q", vec![Term::var("Y").unwrap(), x()]),
            ],
        );
        assert_eq!(t.variable_names(), vec!["X".to_string(), "Y".to_string()]);

        let mut count = 0;
        t.for_each_variable(&mut |_| count += 1);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_display() {
        let t = Term::compound(
            "point",
            vec![
                Term::integer(1),
                Term::float(2.0),
                Term::atom("Hello World"),
                Term::string("it\"s"),
                x(),
            ],
        );
        assert_eq!(t.to_string(), r#"point(1, 2.0, 'Hello World', "it\"s", X)"#);
        assert_eq!(Term::atom("[]").to_string(), "[]");
        assert_eq!(Term::atom("don't").to_string(), r"'don\'t'");
    }

    #[test]
    fn test_deserialize_normalizes_empty_compound() {
        let t: Term = serde_json::from_str(r#"{"Compound":{"name":"f","args":[]}}"#).unwrap();
        assert_eq!(t, Term::atom("f"));

        let nested: Term = serde_json::from_str(
            r#"{"Compound":{"name":"g","args":[{"Compound":{"name":"nil","args":[]}},{"Integer":1}]}}"#,
        )
        .unwrap();
        assert_eq!(
            nested,
            Term::compound("g", vec![Term::atom("nil"), Term::integer(1)])
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = Term::compound("p", vec![x(), Term::string("s"), Term::float(0.5)]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(serde_json::from_str::<Term>(&json).unwrap(), t);
    }

    #[test]
    fn test_anonymous_terms_unequal() {
        assert_ne!(Term::anonymous(), Term::anonymous());
        assert_eq!(x(), x());
    }
}
