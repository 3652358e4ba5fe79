use crate::infrastructure::transport::TransportError;

/// Result of a data-access operation that never fails outright.
///
/// A failed transport call is downgraded to `Degraded`: the caller gets a
/// safe fallback value and the UI keeps working, but unlike a plain value
/// the outcome still tells "fetch failed, fallback shown" apart from
/// "fetch succeeded, collection is empty".
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ok(T),
    Degraded { fallback: T, cause: TransportError },
}

impl<T> Outcome<T> {
    /// Unwraps to the value either way; degraded outcomes yield the fallback.
    pub fn into_value(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Ok(value) => value,
            Self::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn cause(&self) -> Option<&TransportError> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded { cause, .. } => Some(cause),
        }
    }
}
