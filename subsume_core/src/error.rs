use thiserror::Error;

/// Caller-facing errors raised by index mutation.
///
/// Recoverable conditions inside a traversal (mapping collisions,
/// incompatible candidate isomorphisms) never surface here; they are skipped
/// locally. Invariant breaches panic instead.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum IndexError {
    #[error("key is already bound to a different graph; remove it first")]
    KeyInUse,
}
