//! Outcome of reading an optional local file

/// Result of looking up an optional value on disk
///
/// Callers that only care about the value use [`Lookup::found`]; tests and
/// diagnostics can still tell a missing file from a broken one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The value was present and usable
    Found(T),
    /// Nothing to read at this location
    NotFound,
    /// Something was there but could not be used
    Malformed(String),
}

impl<T> Lookup<T> {
    /// The value, if one was found
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Malformed(_) => None,
        }
    }
}
