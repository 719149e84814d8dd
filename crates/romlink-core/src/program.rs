// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Primitive types describing a loadable program image.

use crate::error::RetrievalError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The symbolic identifier of a program, as shown to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramName(String);

impl ProgramName {
    /// Wraps a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProgramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProgramName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ProgramName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The retrieval address of a program image.
///
/// Locators are opaque to everything but the fetchers. A locator is either a
/// URI (`https://...`, `file:///...`) or a bare filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Wraps a locator string.
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Returns the locator as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the URI scheme (lower-cased), or `None` for a bare path.
    ///
    /// A single-letter scheme is treated as a Windows drive letter, not a scheme.
    pub fn scheme(&self) -> Option<String> {
        let (scheme, _) = self.0.split_once("://")?;
        let valid = scheme.len() > 1
            && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        valid.then(|| scheme.to_ascii_lowercase())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}

impl From<String> for Locator {
    fn from(locator: String) -> Self {
        Self(locator)
    }
}

/// The decoded content of a program image.
///
/// The bytes are exactly the retrieved content: same length, same order,
/// no padding. An empty sequence is the universal "nothing to run" value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramBytes(Vec<u8>);

impl ProgramBytes {
    /// The empty program, delivered whenever a load cannot produce content.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the bytes as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the program.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the program holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the program and returns the raw bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for ProgramBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ProgramBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// The internal result of one load, before the fail-open conversion.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The program was retrieved and decoded.
    Loaded(ProgramBytes),
    /// The name is not in the registry. Nothing was fetched.
    NotFound,
    /// Retrieval failed.
    Failed(RetrievalError),
}

impl LoadOutcome {
    /// Applies the fail-open policy: anything but a successful load is empty.
    pub fn into_bytes(self) -> ProgramBytes {
        match self {
            LoadOutcome::Loaded(bytes) => bytes,
            LoadOutcome::NotFound | LoadOutcome::Failed(_) => ProgramBytes::empty(),
        }
    }

    /// Whether this outcome carries retrieved content.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_scheme_detection() {
        assert_eq!(
            Locator::from("https://example.org/MISSILE").scheme().as_deref(),
            Some("https")
        );
        assert_eq!(
            Locator::from("FILE:///tmp/PONG").scheme().as_deref(),
            Some("file")
        );
        assert_eq!(Locator::from("roms/PUZZLE").scheme(), None);
        assert_eq!(Locator::from("C://roms/PUZZLE").scheme(), None);
    }

    #[test]
    fn failed_outcomes_become_empty() {
        let failed = LoadOutcome::Failed(RetrievalError::Transport {
            locator: "http://127.0.0.1:1/".into(),
            message: "connection refused".into(),
        });
        assert!(failed.into_bytes().is_empty());
        assert!(LoadOutcome::NotFound.into_bytes().is_empty());

        let loaded = LoadOutcome::Loaded(ProgramBytes::from(vec![0x12, 0x34]));
        assert!(loaded.is_loaded());
        assert_eq!(loaded.into_bytes().as_slice(), &[0x12, 0x34]);
    }

    #[test]
    fn program_bytes_serialize_as_integer_array() {
        let bytes = ProgramBytes::from(vec![0u8, 1, 255]);
        let json = serde_json::to_string(&bytes).unwrap();
        assert_eq!(json, "[0,1,255]");
        let back: ProgramBytes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bytes);
    }
}
