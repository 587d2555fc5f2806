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
use secretsanta_core::lottery::AttemptLimit;
use secretsanta_core::lottery::draw_until_valid;
use secretsanta_core::rng::OsRandom;
use secretsanta_core::rng::RandomSource;
use secretsanta_core::types::pairing::Assignment;

use crate::config::Config;
use crate::config::Group;
use crate::data_dir::DataDir;
use crate::db::Database;

/// Draw without saving or notifying anyone, and print the result.
pub fn dry_run(
    directory: Option<String>,
    group: Option<String>,
    limit: AttemptLimit,
) -> Fallible<()> {
    let dir = DataDir::open(directory)?;
    let config = Config::load(&dir.config_path())?;
    let group = config.group(group.as_deref())?;
    let db = Database::open(&dir.database_path())?;

    println!("Testing secret santa for '{}'...\n", group.name);
    let assignment = preview(&db, group, &mut OsRandom, limit)?;
    for pairing in &assignment {
        println!("{}\t-> {}", pairing.giver, pairing.recipient);
    }
    Ok(())
}

pub fn preview(
    db: &Database,
    group: &Group,
    rng: &mut dyn RandomSource,
    limit: AttemptLimit,
) -> Fallible<Assignment> {
    group.check_drawable()?;
    let history = db.history(&group.name)?;
    draw_until_valid(&group.people, &history, rng, limit)
}
