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

use crate::cmd::notifier_for;
use crate::config::Config;
use crate::data_dir::DataDir;
use crate::db::Database;
use crate::notify::notify_all;

/// Send the notices for the most recent draw again, with its original code.
pub fn resend(directory: Option<String>, group: Option<String>, console: bool) -> Fallible<()> {
    let dir = DataDir::open(directory)?;
    let config = Config::load(&dir.config_path())?;
    let group = config.group(group.as_deref())?;
    let db = Database::open(&dir.database_path())?;

    let Some(draw) = db.latest(&group.name)? else {
        println!("No draws found for '{}'.", group.name);
        return Ok(());
    };
    println!(
        "Resending draw #{} from {}...",
        draw.code(),
        draw.drawn_at().to_minutes()
    );
    let mut notifier = notifier_for(&dir, draw.code(), console)?;
    let delivered = notify_all(
        notifier.as_mut(),
        &config.sender,
        group,
        draw.pairings(),
        draw.code(),
    )?;
    println!("{delivered} notice(s) sent.");
    Ok(())
}
