// Copyright 2025 Fernando Borretti
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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::pairing::Pairing;
use crate::types::timestamp::Timestamp;

/// Number of hex digits kept from the hash.
const CODE_LEN: usize = 8;

/// Opaque code identifying a draw in the messages sent for it, so a resend
/// can be matched to the original.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunCode(String);

impl RunCode {
    /// Wrap an existing code, such as one imported from an older history.
    pub fn new(code: impl Into<String>) -> Fallible<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(ErrorReport::new("run code must not be blank"));
        }
        Ok(Self(code))
    }

    /// Derive a code from everything that identifies a draw.
    pub fn derive(group: &str, drawn_at: Timestamp, pairings: &[Pairing]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(group.as_bytes());
        hasher.update(&[0]);
        hasher.update(drawn_at.to_string().as_bytes());
        for pairing in pairings {
            hasher.update(&[0]);
            hasher.update(pairing.giver.as_bytes());
            hasher.update(&[0]);
            hasher.update(pairing.recipient.as_bytes());
        }
        let hex = hasher.finalize().to_hex();
        Self(hex.as_str()[..CODE_LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RunCode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RunCode {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RunCode::new(value)
    }
}

impl From<RunCode> for String {
    fn from(code: RunCode) -> String {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> Timestamp {
        Timestamp::try_from("2024-12-01T20:00:00.000".to_string()).unwrap()
    }

    #[test]
    fn test_derive_is_stable() {
        let pairings = vec![Pairing::new("juli", "marce"), Pairing::new("marce", "juli")];
        let a = RunCode::derive("family", ts(), &pairings);
        let b = RunCode::derive("family", ts(), &pairings);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), CODE_LEN);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_derive_depends_on_pairings() {
        let one = vec![Pairing::new("juli", "marce"), Pairing::new("marce", "juli")];
        let other = vec![Pairing::new("juli", "marc"), Pairing::new("emarce", "juli")];
        assert_ne!(
            RunCode::derive("family", ts(), &one),
            RunCode::derive("family", ts(), &other)
        );
        assert_ne!(
            RunCode::derive("family", ts(), &one),
            RunCode::derive("friends", ts(), &one)
        );
    }

    #[test]
    fn test_blank_rejected() {
        assert!(RunCode::new("  ").is_err());
        assert_eq!(RunCode::new("14:30").unwrap().to_string(), "14:30");
    }
}
