//! Host-side logical variables.
//!
//! A [`Variable`] is the host representation of a variable as it appears in a
//! fragment of source text. It is *not* a live engine variable: a matching
//! engine variable exists only while an [`Invocation`](crate::Invocation) that
//! projected it is open, and the link between the two lives in that
//! invocation's tables, never on the `Variable` itself.
//!
//! # Naming
//!
//! - `"_"` is the anonymous marker. Every occurrence is a distinct variable and
//!   never reported in a substitution.
//! - Any other name starting with `_` is a *don't-tell-me* variable. It shares
//!   normally, but is left out of substitutions while don't-tell-me mode is on.
//! - [`Variable::new`] picks a fresh `_N` name from the process-wide
//!   [`NameSequence`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::naming::NameSequence;
use crate::term::Term;

/// The name of the anonymous variable.
pub const ANONYMOUS: &str = "_";

static LEXICAL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[_A-Z][_A-Za-z0-9]*$").expect("static regex"));

/// How strictly explicit variable names are checked at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// Any non-empty name is accepted, even one that reads like a constant.
    #[default]
    Lax,
    /// Names must look like source variables: `_` or an uppercase letter,
    /// followed by letters, digits or underscores.
    Lexical,
}

impl NamePolicy {
    /// Checks `name` against this policy.
    pub fn check(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidName("name cannot be empty String".to_string()));
        }
        match self {
            NamePolicy::Lax => Ok(()),
            NamePolicy::Lexical if LEXICAL_NAME.is_match(name) => Ok(()),
            NamePolicy::Lexical => Err(Error::InvalidName(format!(
                "'{}' is not a lexically valid variable name",
                name
            ))),
        }
    }
}

impl FromStr for NamePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(NamePolicy::Lax),
            "lexical" | "strict" => Ok(NamePolicy::Lexical),
            other => Err(Error::Config(format!("unknown name policy '{}'", other))),
        }
    }
}

/// A named logical variable.
///
/// Two variables are equal when they carry the same name and that name is not
/// the anonymous marker; `Variable::anonymous()` is unequal even to itself.
/// For that reason `Variable` implements `PartialEq` but not `Eq`.
///
/// # Examples
///
/// ```
/// use aingle_bridge::Variable;
///
/// let x1 = Variable::named("X").unwrap();
/// let x2 = Variable::named("X").unwrap();
/// assert_eq!(x1, x2);
///
/// let anon = Variable::anonymous();
/// assert_ne!(anon, anon.clone());
///
/// assert!(Variable::named("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Creates a variable with a fresh process-unique name such as `_42`.
    pub fn new() -> Self {
        Self {
            name: NameSequence::global().next_name(),
        }
    }

    /// Creates a variable with an explicit name.
    ///
    /// Fails with [`Error::InvalidName`] if `name` is empty. No further lexical
    /// checks are applied; use [`Variable::with_policy`] for those.
    pub fn named(name: impl Into<String>) -> Result<Self> {
        Self::with_policy(name, NamePolicy::Lax)
    }

    /// Creates a variable with an explicit name checked against `policy`.
    pub fn with_policy(name: impl Into<String>, policy: NamePolicy) -> Result<Self> {
        let name = name.into();
        policy.check(&name)?;
        Ok(Self { name })
    }

    /// Creates an anonymous (`_`) variable.
    pub fn anonymous() -> Self {
        Self {
            name: ANONYMOUS.to_string(),
        }
    }

    /// The source name of this variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` iff this is the anonymous marker `_`.
    pub fn is_anonymous(&self) -> bool {
        self.name == ANONYMOUS
    }

    /// `true` if the name starts with `_` but is not the anonymous marker.
    pub fn is_dont_tell_me(&self) -> bool {
        self.name.starts_with('_') && !self.is_anonymous()
    }

    /// `true` if this variable is hidden from substitutions under the given mode.
    pub fn is_suppressible(&self, dont_tell_me: bool) -> bool {
        dont_tell_me && self.name.starts_with('_')
    }

    /// Whether this variable's binding belongs in a substitution under `config`.
    pub fn should_tell(&self, config: &BridgeConfig) -> bool {
        !(self.is_anonymous() || self.is_suppressible(config.dont_tell_me))
    }

    /// Always fails: variables have no arguments.
    pub fn args(&self) -> Result<&[Term]> {
        Err(Error::unsupported("args", "Variable"))
    }

    /// Always fails: variables have no arity.
    pub fn arity(&self) -> Result<usize> {
        Err(Error::unsupported("arity", "Variable"))
    }

    /// Always fails: variables have no functor.
    pub fn has_functor(&self, _name: &str, _arity: usize) -> Result<bool> {
        Err(Error::unsupported("has_functor", "Variable"))
    }

    /// The kind name reported for this term, `"Variable"`.
    pub fn type_name(&self) -> &'static str {
        "Variable"
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        !self.is_anonymous() && self.name == other.name
    }
}

// Consistent with `eq`: equal variables share a name, and anonymous ones are
// never equal to anything, so hashing the name alone is sound.
impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<String> for Variable {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::named(name)
    }
}

impl TryFrom<&str> for Variable {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        Self::named(name)
    }
}

impl TryFrom<Option<String>> for Variable {
    type Error = Error;

    fn try_from(name: Option<String>) -> Result<Self> {
        match name {
            Some(name) => Self::named(name),
            None => Err(Error::InvalidName("name cannot be null".to_string())),
        }
    }
}

impl FromStr for Variable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::named(s)
    }
}

impl From<Variable> for String {
    fn from(var: Variable) -> Self {
        var.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_equality() {
        let a = Variable::named("X").unwrap();
        let b = Variable::named("X").unwrap();
        let c = Variable::named("Y").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    #[allow(clippy::eq_op)]
    fn test_anonymous_never_equal() {
        let a = Variable::anonymous();
        let b = Variable::named("_").unwrap();
        assert!(a.is_anonymous());
        assert_ne!(a, b);
        assert!(a != a);
    }

    #[test]
    fn test_construction_validation() {
        assert!(matches!(Variable::named(""), Err(Error::InvalidName(_))));
        assert!(matches!(
            Variable::try_from(None::<String>),
            Err(Error::InvalidName(_))
        ));
        let x = Variable::named("X").unwrap();
        assert_eq!(x.name(), "X");
    }

    #[test]
    fn test_lax_accepts_irregular_names() {
        assert!(Variable::named("foo").is_ok());
        assert!(Variable::named("9lives").is_ok());
        assert!(Variable::named("a b").is_ok());
    }

    #[test]
    fn test_lexical_policy() {
        assert!(Variable::with_policy("X", NamePolicy::Lexical).is_ok());
        assert!(Variable::with_policy("_Foo1", NamePolicy::Lexical).is_ok());
        assert!(Variable::with_policy("_", NamePolicy::Lexical).is_ok());
        assert!(Variable::with_policy("foo", NamePolicy::Lexical).is_err());
        assert!(Variable::with_policy("X-1", NamePolicy::Lexical).is_err());
        assert!(Variable::with_policy("", NamePolicy::Lexical).is_err());
    }

    #[test]
    fn test_default_names_are_fresh() {
        let a = Variable::new();
        let b = Variable::new();
        assert!(a.name().starts_with('_'));
        assert_ne!(a, b);
        let na: u64 = a.name()[1..].parse().unwrap();
        let nb: u64 = b.name()[1..].parse().unwrap();
        assert!(nb > na);
    }

    #[test]
    fn test_tell_policy() {
        let quiet = BridgeConfig::quiet();
        let loud = BridgeConfig::default();

        let x = Variable::named("X").unwrap();
        let foo = Variable::named("_Foo").unwrap();
        let anon = Variable::anonymous();

        assert!(x.should_tell(&quiet) && x.should_tell(&loud));
        assert!(!foo.should_tell(&quiet));
        assert!(foo.should_tell(&loud));
        assert!(!anon.should_tell(&quiet) && !anon.should_tell(&loud));
        assert!(foo.is_dont_tell_me());
        assert!(!anon.is_dont_tell_me());
    }

    #[test]
    fn test_structural_ops_fail() {
        let x = Variable::named("X").unwrap();
        assert!(matches!(x.args(), Err(Error::Unsupported { .. })));
        assert!(matches!(x.arity(), Err(Error::Unsupported { .. })));
        assert!(matches!(x.has_functor("f", 1), Err(Error::Unsupported { .. })));
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let x: Variable = serde_json::from_str("\"X\"").unwrap();
        assert_eq!(x.name(), "X");
        assert_eq!(serde_json::to_string(&x).unwrap(), "\"X\"");
        assert!(serde_json::from_str::<Variable>("\"\"").is_err());
        assert!(serde_json::from_str::<Variable>("null").is_err());
    }

    #[test]
    fn test_name_policy_from_str() {
        assert_eq!("lax".parse::<NamePolicy>().unwrap(), NamePolicy::Lax);
        assert_eq!("Lexical".parse::<NamePolicy>().unwrap(), NamePolicy::Lexical);
        assert!("loose".parse::<NamePolicy>().is_err());
    }
}
