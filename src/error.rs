use core::fmt;

/// A specialized [`Result`](core::result::Result) for tree operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors signaled by the ordered maps.
///
/// A missing key is never an error: lookups and removals report it as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `remove` was called on a tree with no entries.
    Empty,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => f.write_str("cannot remove from an empty tree"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn empty_error_display() {
        assert_eq!(Error::Empty.to_string(), "cannot remove from an empty tree");
    }
}
