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

use chrono::NaiveDateTime;
use chrono::SubsecRound;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A timestamp without a timezone and millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(ndt: NaiveDateTime) -> Self {
        Self(ndt.trunc_subsecs(3))
    }

    /// Converts a timestamp into a `NaiveDateTime`.
    pub fn into_inner(self) -> NaiveDateTime {
        self.0
    }

    /// The current timestamp in the user's local time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Local::now().naive_local().trunc_subsecs(3))
    }

    /// Short human form, used in listings.
    pub fn to_minutes(self) -> String {
        self.0.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let ndt = NaiveDateTime::parse_from_str(&value, FORMAT)
            .map_err(|_| ErrorReport::new(format!("Failed to parse timestamp: '{value}'.")))?;
        Ok(Timestamp(ndt))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let earlier = Timestamp::try_from("2016-12-01T10:00:00.000".to_string()).unwrap();
        let later = Timestamp::try_from("2016-12-01T10:00:00.001".to_string()).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_new_truncates_to_millis() {
        let ndt =
            NaiveDateTime::parse_from_str("2023-10-05T14:30:15.123456", "%Y-%m-%dT%H:%M:%S%.f")
                .unwrap();
        assert_eq!(Timestamp::new(ndt).to_string(), "2023-10-05T14:30:15.123");
        assert_eq!(Timestamp::new(ndt).to_minutes(), "2023-10-05 14:30");
    }

    #[test]
    fn test_serialize() {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.123".to_string()).unwrap();
        let serialized = serde_json::to_string(&ts).unwrap();
        assert_eq!(serialized, "\"2023-10-05T14:30:15.123\"");
    }

    #[test]
    fn test_invalid() {
        assert!(Timestamp::try_from("yesterday".to_string()).is_err());
    }
}
