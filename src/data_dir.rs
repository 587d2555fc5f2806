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

use std::env::current_dir;
use std::path::PathBuf;

use secretsanta_core::error::Fallible;
use secretsanta_core::error::fail;

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "history.db";
const OUTBOX_DIR: &str = "outbox";

/// The directory holding a configuration, its draw history, and the outbox.
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Open a data directory. By default, the current working directory is used.
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let root: PathBuf = match directory {
            Some(directory) => PathBuf::from(directory),
            None => current_dir()?,
        };
        if !root.exists() {
            return fail("directory does not exist.");
        }
        let root = root.canonicalize()?;
        log::debug!("Using data directory {}", root.display());
        Ok(Self { root })
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    pub fn outbox_path(&self) -> PathBuf {
        self.root.join(OUTBOX_DIR)
    }
}
