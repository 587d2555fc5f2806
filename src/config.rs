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

use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

use secretsanta_core::error::ErrorReport;
use secretsanta_core::error::Fallible;
use secretsanta_core::error::fail;
use secretsanta_core::types::participant::Participant;
use serde::Deserialize;

const DEFAULT_SENDER_NAME: &str = "Secret Santa";
const DEFAULT_SUBJECT: &str = "Secret Santa (#{code})";

/// Who notices are sent from, and what they are titled.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Sender {
    pub address: String,
    #[serde(default = "default_sender_name")]
    pub name: String,
    /// Subject line. `{code}` is replaced with the draw's code.
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_sender_name() -> String {
    DEFAULT_SENDER_NAME.to_string()
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

/// A set of people who draw among themselves.
#[derive(Clone, Debug)]
pub struct Group {
    pub name: String,
    pub people: Vec<Participant>,
}

impl Group {
    pub fn person(&self, name: &str) -> Option<&Participant> {
        self.people.iter().find(|p| p.name() == name)
    }

    /// A draw needs somebody other than yourself to give to.
    pub fn check_drawable(&self) -> Fallible<()> {
        if self.people.len() < 2 {
            return fail(format!(
                "group '{}' needs at least two people to draw",
                self.name
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub sender: Sender,
    groups: Vec<Group>,
}

#[derive(Deserialize)]
struct RawConfig {
    sender: Sender,
    #[serde(default)]
    groups: Vec<RawGroup>,
}

#[derive(Deserialize)]
struct RawGroup {
    name: String,
    #[serde(default)]
    people: Vec<RawPerson>,
}

#[derive(Deserialize)]
struct RawPerson {
    name: String,
    email: Addresses,
    #[serde(default)]
    exceptions: Vec<String>,
}

/// Either a single string, possibly holding several `;`-separated
/// addresses, or a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum Addresses {
    One(String),
    Many(Vec<String>),
}

impl Addresses {
    fn into_list(self) -> Vec<String> {
        let raw = match self {
            Addresses::One(s) => vec![s],
            Addresses::Many(v) => v,
        };
        raw.iter()
            .flat_map(|s| s.split(';'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

impl Config {
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail(format!("config file not found: {}", path.display()));
        }
        log::debug!("Loading config from {}", path.display());
        let text = read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        let raw: RawConfig = toml::from_str(text)
            .map_err(|e| ErrorReport::new(format!("Failed to parse config: {e}")))?;
        if raw.sender.address.trim().is_empty() {
            return fail("sender address must not be empty");
        }
        let mut group_names: HashSet<String> = HashSet::new();
        let mut groups = Vec::with_capacity(raw.groups.len());
        for group in raw.groups {
            if !group_names.insert(group.name.clone()) {
                return fail(format!("duplicate group: '{}'", group.name));
            }
            groups.push(Self::build_group(group)?);
        }
        Ok(Self {
            sender: raw.sender,
            groups,
        })
    }

    fn build_group(raw: RawGroup) -> Fallible<Group> {
        let mut names: HashSet<String> = HashSet::new();
        for person in &raw.people {
            if person.name.trim().is_empty() {
                return fail(format!("group '{}' has a person with no name", raw.name));
            }
            if !names.insert(person.name.clone()) {
                return fail(format!(
                    "group '{}' lists '{}' more than once",
                    raw.name, person.name
                ));
            }
        }
        let mut people = Vec::with_capacity(raw.people.len());
        for person in raw.people {
            for exception in &person.exceptions {
                if !names.contains(exception) {
                    log::warn!(
                        "'{}' in group '{}' has an exception for unknown person '{}'",
                        person.name,
                        raw.name,
                        exception
                    );
                }
            }
            let email = person.email.into_list();
            if email.is_empty() {
                return fail(format!("'{}' has no email address", person.name));
            }
            people.push(Participant::new(person.name, email, person.exceptions));
        }
        Ok(Group {
            name: raw.name,
            people,
        })
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look up a group by name. With no name, the only group is used.
    pub fn group(&self, name: Option<&str>) -> Fallible<&Group> {
        match name {
            Some(name) => self
                .groups
                .iter()
                .find(|g| g.name == name)
                .ok_or_else(|| ErrorReport::new(format!("no such group: '{name}'"))),
            None => match self.groups.as_slice() {
                [only] => Ok(only),
                [] => fail("the config defines no groups"),
                _ => fail(format!(
                    "several groups are defined, pick one with --group: {}",
                    self.group_names().join(", ")
                )),
            },
        }
    }

    fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }
}
