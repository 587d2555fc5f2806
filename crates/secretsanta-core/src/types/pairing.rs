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

use serde::Deserialize;
use serde::Serialize;

use crate::types::run_code::RunCode;
use crate::types::timestamp::Timestamp;

/// One giver and the person they give to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub giver: String,
    pub recipient: String,
}

impl Pairing {
    pub fn new(giver: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            giver: giver.into(),
            recipient: recipient.into(),
        }
    }
}

/// The pairings of one draw, in the order they were made.
pub type Assignment = Vec<Pairing>;

/// A completed draw from a previous cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastDraw {
    drawn_at: Timestamp,
    pairings: Assignment,
    code: RunCode,
}

impl PastDraw {
    pub fn new(drawn_at: Timestamp, pairings: Assignment, code: RunCode) -> Self {
        Self {
            drawn_at,
            pairings,
            code,
        }
    }

    pub fn drawn_at(&self) -> Timestamp {
        self.drawn_at
    }

    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    pub fn code(&self) -> &RunCode {
        &self.code
    }

    /// Who `giver` gave to in this draw, if they took part.
    pub fn recipient_of(&self, giver: &str) -> Option<&str> {
        self.pairings
            .iter()
            .find(|p| p.giver == giver)
            .map(|p| p.recipient.as_str())
    }
}

/// The most recent draw by date. Among draws with the same timestamp the one
/// listed last wins.
pub fn latest(history: &[PastDraw]) -> Option<&PastDraw> {
    history.iter().max_by_key(|draw| draw.drawn_at)
}
