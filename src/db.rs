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

use std::path::Path;

use rusqlite::Connection;
use rusqlite::params;
use secretsanta_core::error::ErrorReport;
use secretsanta_core::error::Fallible;
use secretsanta_core::types::pairing::Pairing;
use secretsanta_core::types::pairing::PastDraw;
use secretsanta_core::types::run_code::RunCode;
use secretsanta_core::types::timestamp::Timestamp;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS draws (
        draw_id INTEGER PRIMARY KEY AUTOINCREMENT,
        group_name TEXT NOT NULL,
        drawn_at TEXT NOT NULL,
        code TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS pairings (
        draw_id INTEGER NOT NULL REFERENCES draws(draw_id),
        position INTEGER NOT NULL,
        giver TEXT NOT NULL,
        recipient TEXT NOT NULL,
        PRIMARY KEY (draw_id, position)
    );
    CREATE INDEX IF NOT EXISTS idx_draws_group ON draws(group_name, drawn_at);
";

fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

/// Append-only log of past draws, per group.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Fallible<Self> {
        log::debug!("Opening history database {}", path.display());
        let conn = Connection::open(path).map_err(db_error)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(db_error)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute_batch(SCHEMA).map_err(db_error)?;
        Ok(Self { conn })
    }

    /// Every draw for `group`, oldest first.
    pub fn history(&self, group: &str) -> Fallible<Vec<PastDraw>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT draw_id, drawn_at, code FROM draws
                 WHERE group_name = ?1
                 ORDER BY drawn_at, draw_id",
            )
            .map_err(db_error)?;
        let rows = stmt
            .query_map(params![group], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(db_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error)?;

        let mut draws = Vec::with_capacity(rows.len());
        for (draw_id, drawn_at, code) in rows {
            let pairings = self.pairings(draw_id)?;
            draws.push(PastDraw::new(
                Timestamp::try_from(drawn_at)?,
                pairings,
                RunCode::new(code)?,
            ));
        }
        Ok(draws)
    }

    fn pairings(&self, draw_id: i64) -> Fallible<Vec<Pairing>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT giver, recipient FROM pairings
                 WHERE draw_id = ?1
                 ORDER BY position",
            )
            .map_err(db_error)?;
        let pairings = stmt
            .query_map(params![draw_id], |row| {
                let giver: String = row.get(0)?;
                let recipient: String = row.get(1)?;
                Ok(Pairing::new(giver, recipient))
            })
            .map_err(db_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error)?;
        Ok(pairings)
    }

    /// The most recent draw for `group`.
    pub fn latest(&self, group: &str) -> Fallible<Option<PastDraw>> {
        let history = self.history(group)?;
        Ok(secretsanta_core::types::pairing::latest(&history).cloned())
    }

    /// Whether a draw with this timestamp and code is already recorded.
    pub fn contains(&self, group: &str, drawn_at: Timestamp, code: &RunCode) -> Fallible<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM draws
                 WHERE group_name = ?1 AND drawn_at = ?2 AND code = ?3",
                params![group, drawn_at.to_string(), code.as_str()],
                |row| row.get(0),
            )
            .map_err(db_error)?;
        Ok(count > 0)
    }

    /// Record a completed draw.
    pub fn append(&mut self, group: &str, draw: &PastDraw) -> Fallible<()> {
        let tx = self.conn.transaction().map_err(db_error)?;
        tx.execute(
            "INSERT INTO draws (group_name, drawn_at, code) VALUES (?1, ?2, ?3)",
            params![group, draw.drawn_at().to_string(), draw.code().as_str()],
        )
        .map_err(db_error)?;
        let draw_id = tx.last_insert_rowid();
        for (position, pairing) in draw.pairings().iter().enumerate() {
            tx.execute(
                "INSERT INTO pairings (draw_id, position, giver, recipient)
                 VALUES (?1, ?2, ?3, ?4)",
                params![draw_id, position as i64, pairing.giver, pairing.recipient],
            )
            .map_err(db_error)?;
        }
        tx.commit().map_err(db_error)?;
        log::info!(
            "Saved draw {} for group '{group}' ({} pairings)",
            draw.code(),
            draw.pairings().len()
        );
        Ok(())
    }
}
