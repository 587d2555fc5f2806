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

use std::fs::read_to_string;
use std::path::Path;

use secretsanta_core::error::Fallible;
use secretsanta_core::error::fail;
use secretsanta_core::types::pairing::PastDraw;

use crate::config::Config;
use crate::data_dir::DataDir;
use crate::db::Database;
use crate::legacy::parse_legacy;

/// Import a legacy JSON history into a group.
pub fn import_history(
    file: String,
    directory: Option<String>,
    group: Option<String>,
    legacy_group_id: Option<String>,
) -> Fallible<()> {
    let dir = DataDir::open(directory)?;
    let config = Config::load(&dir.config_path())?;
    let group = config.group(group.as_deref())?;
    let path = Path::new(&file);
    if !path.exists() {
        return fail(format!("history file not found: {file}"));
    }
    let contents = read_to_string(path)?;
    let draws = parse_legacy(&contents, &group.name, legacy_group_id.as_deref())?;
    let mut db = Database::open(&dir.database_path())?;
    let (imported, skipped) = import_draws(&mut db, &group.name, draws)?;
    println!(
        "Imported {imported} draw(s) into '{}', skipped {skipped} already present.",
        group.name
    );
    Ok(())
}

/// Append the draws not already recorded. Returns (imported, skipped).
pub fn import_draws(
    db: &mut Database,
    group: &str,
    draws: Vec<PastDraw>,
) -> Fallible<(usize, usize)> {
    let mut imported = 0;
    let mut skipped = 0;
    for draw in draws {
        if db.contains(group, draw.drawn_at(), draw.code())? {
            skipped += 1;
            continue;
        }
        db.append(group, &draw)?;
        imported += 1;
    }
    Ok((imported, skipped))
}
