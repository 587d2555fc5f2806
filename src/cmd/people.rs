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

use secretsanta_core::error::Fallible;

use crate::config::Config;
use crate::config::Group;
use crate::data_dir::DataDir;

/// List the people in one group, or in every group.
pub fn list_people(directory: Option<String>, group: Option<String>) -> Fallible<()> {
    let dir = DataDir::open(directory)?;
    let config = Config::load(&dir.config_path())?;
    let groups: Vec<&Group> = match group.as_deref() {
        Some(name) => vec![config.group(Some(name))?],
        None => config.groups().iter().collect(),
    };
    for group in groups {
        println!("{}:", group.name);
        for line in people_lines(group) {
            println!("  {line}");
        }
        println!();
    }
    Ok(())
}

fn people_lines(group: &Group) -> Vec<String> {
    let mut people: Vec<_> = group.people.iter().collect();
    people.sort_by(|a, b| a.name().cmp(b.name()));
    people
        .into_iter()
        .map(|person| {
            let mut line = format!("{} <{}>", person.name(), person.email().join(", "));
            if !person.exceptions().is_empty() {
                let exceptions: Vec<&str> =
                    person.exceptions().iter().map(String::as_str).collect();
                line.push_str(&format!(" (never: {})", exceptions.join(", ")));
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::TEST_CONFIG;

    #[test]
    fn test_people_lines_sorted() -> Fallible<()> {
        let config = Config::parse(TEST_CONFIG)?;
        let lines = people_lines(config.group(Some("family"))?);
        assert_eq!(
            lines,
            vec![
                "guli <guli@example.com, guli@work.example.com> (never: neitana)",
                "juli <juli@example.com>",
                "marce <marce@example.com, marce@home.example.com>",
                "neitana <neitana@example.com> (never: guli)",
            ]
        );
        Ok(())
    }
}
