use tracing::debug;

use crate::errors::VfsResult;

/// Outcome of a read-only query that never fails.
///
/// A provider fault does not abort the caller; the query substitutes a safe
/// default and says so by returning [`Lookup::Fallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The provider answered.
    Resolved(T),
    /// The provider failed; this is the substituted default.
    Fallback(T),
}

impl<T> Lookup<T> {
    /// Turn a provider result into a lookup, substituting `default` on error.
    pub fn from_result(result: VfsResult<T>, default: T, what: &str) -> Self {
        match result {
            Ok(value) => Lookup::Resolved(value),
            Err(e) => {
                debug!(query = what, "Provider query failed, using default: {e}");
                Lookup::Fallback(default)
            }
        }
    }

    pub fn value(self) -> T {
        match self {
            Lookup::Resolved(v) | Lookup::Fallback(v) => v,
        }
    }

    pub fn get(&self) -> &T {
        match self {
            Lookup::Resolved(v) | Lookup::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Lookup::Fallback(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Resolved(v) => Lookup::Resolved(f(v)),
            Lookup::Fallback(v) => Lookup::Fallback(f(v)),
        }
    }
}
