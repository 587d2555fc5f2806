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

pub mod dry_run;
pub mod generate;
pub mod import;
pub mod people;
pub mod resend;

use secretsanta_core::error::Fallible;
use secretsanta_core::types::run_code::RunCode;

use crate::data_dir::DataDir;
use crate::notify::Console;
use crate::notify::Notifier;
use crate::notify::Outbox;

/// The notifier selected on the command line.
fn notifier_for(dir: &DataDir, code: &RunCode, console: bool) -> Fallible<Box<dyn Notifier>> {
    if console {
        return Ok(Box::new(Console::stdout()));
    }
    let outbox = Outbox::create(dir.outbox_path(), code)?;
    println!("Writing notices to {}", outbox.dir().display());
    Ok(Box::new(outbox))
}
