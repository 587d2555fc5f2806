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

//! Reading draw histories kept in the older JSON format.
//!
//! ```json
//! {"lotteries": [{"groupId": "…", "dateTime": "2018-12-01T19:23:45.123",
//!   "matches": [{"source": "juli", "destination": "guli"}],
//!   "emailCode": "19:23"}]}
//! ```

use chrono::DateTime;
use chrono::NaiveDateTime;
use secretsanta_core::error::ErrorReport;
use secretsanta_core::error::Fallible;
use secretsanta_core::types::pairing::Pairing;
use secretsanta_core::types::pairing::PastDraw;
use secretsanta_core::types::run_code::RunCode;
use secretsanta_core::types::timestamp::Timestamp;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyDatabase {
    #[serde(default)]
    lotteries: Vec<LegacyLottery>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyLottery {
    #[serde(default)]
    group_id: Option<String>,
    date_time: String,
    #[serde(default)]
    matches: Vec<LegacyMatch>,
    #[serde(default)]
    email_code: Option<String>,
}

#[derive(Deserialize)]
struct LegacyMatch {
    source: String,
    destination: String,
}

/// Parse a legacy history file into draws for `group`.
///
/// When `group_id` is given only lotteries tagged with it are kept. Lotteries
/// without a code get one derived the usual way.
pub fn parse_legacy(text: &str, group: &str, group_id: Option<&str>) -> Fallible<Vec<PastDraw>> {
    let database: LegacyDatabase = serde_json::from_str(text)?;
    let mut draws = Vec::new();
    for lottery in database.lotteries {
        if let Some(wanted) = group_id {
            if !lottery
                .group_id
                .as_deref()
                .is_some_and(|id| id.eq_ignore_ascii_case(wanted))
            {
                continue;
            }
        }
        let drawn_at = parse_date_time(&lottery.date_time)?;
        let pairings: Vec<Pairing> = lottery
            .matches
            .into_iter()
            .map(|m| Pairing::new(m.source, m.destination))
            .collect();
        let code = match lottery.email_code.filter(|c| !c.trim().is_empty()) {
            Some(code) => RunCode::new(code)?,
            None => RunCode::derive(group, drawn_at, &pairings),
        };
        draws.push(PastDraw::new(drawn_at, pairings, code));
    }
    Ok(draws)
}

/// Date-times with or without fractional seconds, with or without an offset.
/// Offsets are dropped, keeping the wall-clock time as written.
fn parse_date_time(s: &str) -> Fallible<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Timestamp::new(dt.naive_local()));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(Timestamp::new)
        .ok_or_else(|| ErrorReport::new(format!("invalid date-time in legacy history: '{s}'")))
}
