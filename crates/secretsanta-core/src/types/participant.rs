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

use std::collections::BTreeSet;

/// A member of a group taking part in the draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    /// Unique within the group.
    name: String,
    email: Vec<String>,
    /// Names this participant must never be drawn to give to.
    exceptions: BTreeSet<String>,
}

impl Participant {
    pub fn new(
        name: impl Into<String>,
        email: Vec<String>,
        exceptions: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            name: name.into(),
            email,
            exceptions: exceptions.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &[String] {
        &self.email
    }

    pub fn exceptions(&self) -> &BTreeSet<String> {
        &self.exceptions
    }

    /// Whether `name` is on this participant's exception list.
    pub fn excludes(&self, name: &str) -> bool {
        self.exceptions.contains(name)
    }
}
