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

use clap::Parser;
use secretsanta_core::error::Fallible;
use secretsanta_core::lottery::AttemptLimit;

use crate::cmd::dry_run::dry_run;
use crate::cmd::generate::generate;
use crate::cmd::import::import_history;
use crate::cmd::people::list_people;
use crate::cmd::resend::resend;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Draw a new assignment, save it, and notify every giver.
    Generate {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which group to draw for. May be left out when the config defines only one.
        #[arg(long)]
        group: Option<String>,
        /// Give up after this many failed attempts. By default, keep trying.
        #[arg(long)]
        max_attempts: Option<usize>,
        /// Print the notices instead of writing them to the outbox.
        #[arg(long)]
        console: bool,
    },
    /// Notify every giver of the most recent draw again.
    Resend {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which group to resend for. May be left out when the config defines only one.
        #[arg(long)]
        group: Option<String>,
        /// Print the notices instead of writing them to the outbox.
        #[arg(long)]
        console: bool,
    },
    /// Draw and print an assignment without saving it or notifying anyone.
    Test {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which group to draw for. May be left out when the config defines only one.
        #[arg(long)]
        group: Option<String>,
        /// Give up after this many failed attempts. By default, keep trying.
        #[arg(long)]
        max_attempts: Option<usize>,
    },
    /// List the people in the configuration.
    People {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Only list this group.
        #[arg(long)]
        group: Option<String>,
    },
    /// Import draws from a legacy JSON history file.
    Import {
        /// Path to the legacy history file.
        file: String,
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which group the draws belong to. May be left out when the config defines only one.
        #[arg(long)]
        group: Option<String>,
        /// Only import lotteries tagged with this group id.
        #[arg(long)]
        legacy_group_id: Option<String>,
    },
}

fn attempt_limit(max_attempts: Option<usize>) -> AttemptLimit {
    max_attempts.map_or(AttemptLimit::Unbounded, AttemptLimit::AtMost)
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Generate {
            directory,
            group,
            max_attempts,
            console,
        } => generate(directory, group, attempt_limit(max_attempts), console),
        Command::Resend {
            directory,
            group,
            console,
        } => resend(directory, group, console),
        Command::Test {
            directory,
            group,
            max_attempts,
        } => dry_run(directory, group, attempt_limit(max_attempts)),
        Command::People { directory, group } => list_people(directory, group),
        Command::Import {
            file,
            directory,
            group,
            legacy_group_id,
        } => import_history(file, directory, group, legacy_group_id),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Command::try_parse_from([
            "secretsanta",
            "generate",
            "/tmp/santa",
            "--group",
            "family",
            "--max-attempts",
            "500",
        ])
        .unwrap();
        match cli {
            Command::Generate {
                directory,
                group,
                max_attempts,
                console,
            } => {
                assert_eq!(directory.as_deref(), Some("/tmp/santa"));
                assert_eq!(group.as_deref(), Some("family"));
                assert_eq!(attempt_limit(max_attempts), AttemptLimit::AtMost(500));
                assert!(!console);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_default_limit_is_unbounded() {
        assert_eq!(attempt_limit(None), AttemptLimit::Unbounded);
    }
}
