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
use secretsanta_core::types::pairing::PastDraw;
use secretsanta_core::types::run_code::RunCode;
use secretsanta_core::types::timestamp::Timestamp;

use crate::cmd::notifier_for;
use crate::config::Config;
use crate::config::Group;
use crate::data_dir::DataDir;
use crate::db::Database;
use crate::notify::notify_all;

pub fn generate(
    directory: Option<String>,
    group: Option<String>,
    limit: AttemptLimit,
    console: bool,
) -> Fallible<()> {
    let dir = DataDir::open(directory)?;
    let config = Config::load(&dir.config_path())?;
    let group = config.group(group.as_deref())?;
    let mut db = Database::open(&dir.database_path())?;

    println!("Generating secret santa for '{}'...", group.name);
    let draw = draw_and_save(&mut db, group, &mut OsRandom, limit)?;

    let mut notifier = notifier_for(&dir, draw.code(), console)?;
    let delivered = notify_all(
        notifier.as_mut(),
        &config.sender,
        group,
        draw.pairings(),
        draw.code(),
    )?;
    println!("Draw #{} saved, {delivered} notice(s) sent.", draw.code());
    Ok(())
}

/// Draw for `group` against its stored history and record the result.
///
/// The draw is saved before anyone is notified, so a failed delivery can be
/// repeated with `resend`.
pub fn draw_and_save(
    db: &mut Database,
    group: &Group,
    rng: &mut dyn RandomSource,
    limit: AttemptLimit,
) -> Fallible<PastDraw> {
    group.check_drawable()?;
    let history = db.history(&group.name)?;
    log::debug!(
        "Drawing for '{}': {} people, {} past draws, attempts {limit}",
        group.name,
        group.people.len(),
        history.len()
    );
    let pairings = draw_until_valid(&group.people, &history, rng, limit)?;
    let drawn_at = Timestamp::now();
    let code = RunCode::derive(&group.name, drawn_at, &pairings);
    let draw = PastDraw::new(drawn_at, pairings, code);
    db.append(&group.name, &draw)?;
    Ok(draw)
}
