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

use std::fs::create_dir_all;
use std::fs::write;
use std::path::PathBuf;

use secretsanta_core::error::Fallible;
use tempfile::tempdir;

/// A fresh, empty directory that outlives the test.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir = tempdir()?.keep();
    create_dir_all(&dir)?;
    Ok(dir)
}

pub const TEST_CONFIG: &str = r#"
[sender]
address = "santa@example.com"
name = "Santa"
subject = "Secret Santa (#{code})"

[[groups]]
name = "family"

[[groups.people]]
name = "neitana"
email = "neitana@example.com"
exceptions = ["guli"]

[[groups.people]]
name = "guli"
email = ["guli@example.com", "guli@work.example.com"]
exceptions = ["neitana"]

[[groups.people]]
name = "marce"
email = "marce@example.com;marce@home.example.com"

[[groups.people]]
name = "juli"
email = "juli@example.com"

[[groups]]
name = "friends"

[[groups.people]]
name = "ana"
email = "ana@example.com"

[[groups.people]]
name = "beto"
email = "beto@example.com"

[[groups.people]]
name = "caro"
email = "caro@example.com"
"#;

/// A data directory containing [`TEST_CONFIG`].
pub fn create_tmp_data_directory() -> Fallible<String> {
    let dir = create_tmp_directory()?;
    write(dir.join("config.toml"), TEST_CONFIG)?;
    Ok(dir.display().to_string())
}
