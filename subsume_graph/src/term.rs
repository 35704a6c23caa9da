//! RDF-style terms: the vertices of a triple graph.

use std::fmt::Display;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    // ?name
    static ref VAR_RE: Regex = Regex::new(r"^\?(\S+)$").unwrap();
    // _:name
    static ref BLANK_RE: Regex = Regex::new(r"^_:(\S+)$").unwrap();
    // "lexical form"
    static ref LITERAL_RE: Regex = Regex::new("^\"(.*)\"$").unwrap();
    // bare numbers are literals too
    static ref NUMBER_RE: Regex = Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").unwrap();
}

/// A vertex of a triple graph.
///
/// Variables and blanks are renameable and participate in isomorphism
/// mapping; IRIs and literals are concrete labels, fixed under every
/// mapping, and double as the tags of a graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Var(String),
    Blank(String),
    Iri(String),
    Lit(String),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn blank(name: impl Into<String>) -> Self {
        Term::Blank(name.into())
    }

    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    pub fn lit(value: impl Into<String>) -> Self {
        Term::Lit(value.into())
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Term::Iri(_) | Term::Lit(_))
    }

    pub fn is_renameable(&self) -> bool {
        matches!(self, Term::Var(_) | Term::Blank(_))
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Var(name) => write!(f, "?{name}"),
            Term::Blank(name) => write!(f, "_:{name}"),
            Term::Iri(value) => write!(f, "{value}"),
            Term::Lit(value) => write!(f, "\"{value}\""),
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty term")]
    EmptyTerm,
    #[error("expected `subject predicate object`, got {0:?}")]
    MalformedTriple(String),
}

impl FromStr for Term {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(ParseError::EmptyTerm);
        }
        if let Some(caps) = VAR_RE.captures(value) {
            Ok(Term::Var(caps[1].to_string()))
        } else if let Some(caps) = BLANK_RE.captures(value) {
            Ok(Term::Blank(caps[1].to_string()))
        } else if let Some(caps) = LITERAL_RE.captures(value) {
            Ok(Term::Lit(caps[1].to_string()))
        } else if NUMBER_RE.is_match(value) {
            Ok(Term::Lit(value.to_string()))
        } else {
            Ok(Term::Iri(value.to_string()))
        }
    }
}
