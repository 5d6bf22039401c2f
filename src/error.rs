// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur in the map
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// An argument was out of its valid range
    ///
    /// Currently raised for a negative capacity at construction, and for a
    /// non-positive divisor in the capacity calculation.
    InvalidArgument(&'static str),

    /// The key is already present (`LargeMap::add`)
    DuplicateKey(i64),

    /// The key is not present (`LargeMap::get`)
    KeyNotFound(i64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(reason) => write!(f, "LargeMapError: invalid argument: {reason}"),
            Self::DuplicateKey(key) => {
                write!(f, "LargeMapError: an item with the same key has already been added (key: {key})")
            }
            Self::KeyNotFound(key) => {
                write!(f, "LargeMapError: the given key '{key}' was not present in the map")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Map result
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn error_display_names_key() {
        assert!(Error::DuplicateKey(1).to_string().contains("key: 1"));
        assert!(Error::KeyNotFound(-7).to_string().contains("'-7'"));
        assert!(Error::InvalidArgument("capacity may not be negative")
            .to_string()
            .contains("capacity may not be negative"));
    }
}
