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

//! Weighted pool of candidate recipients for one giver.
//!
//! Every eligible candidate gets one ball per draw it is "behind" the
//! candidate this giver has drawn most often, plus one. Someone the giver has
//! never drawn therefore gets the most balls.

use std::collections::HashMap;
use std::iter::repeat_n;

use crate::types::pairing::PastDraw;
use crate::types::pairing::latest;

/// Multiset of candidate names, one entry per ball.
pub type WeightedPool<'a> = Vec<&'a str>;

/// Who `giver` gave to in the most recent draw.
pub fn last_recipient<'h>(history: &'h [PastDraw], giver: &str) -> Option<&'h str> {
    latest(history).and_then(|draw| draw.recipient_of(giver))
}

/// Build the pool for `giver` out of the names still available to them.
///
/// The giver and their most recent recipient are never in the pool. Past
/// pairings only count towards the weights when there is a most recent
/// recipient to compare against.
pub fn build_pool<'a>(
    candidates: &[&'a str],
    history: &[PastDraw],
    giver: &str,
) -> WeightedPool<'a> {
    let last = last_recipient(history, giver);

    let mut eligible: Vec<&'a str> = Vec::with_capacity(candidates.len());
    for &candidate in candidates {
        if candidate != giver && Some(candidate) != last && !eligible.contains(&candidate) {
            eligible.push(candidate);
        }
    }

    let mut past_counts: HashMap<&str, usize> = HashMap::new();
    if let Some(last) = last.filter(|name| !name.trim().is_empty()) {
        let past_recipients = history
            .iter()
            .flat_map(|draw| draw.pairings())
            .filter(|pairing| pairing.giver == giver)
            .map(|pairing| pairing.recipient.as_str())
            .filter(|recipient| *recipient != last && eligible.contains(recipient));
        for recipient in past_recipients {
            *past_counts.entry(recipient).or_insert(0) += 1;
        }
    }

    let max_occurrence = past_counts.values().copied().max().unwrap_or(0);

    eligible
        .into_iter()
        .flat_map(|candidate| {
            let seen = past_counts.get(candidate).copied().unwrap_or(0);
            repeat_n(candidate, max_occurrence + 1 - seen)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pairing::Pairing;
    use crate::types::run_code::RunCode;
    use crate::types::timestamp::Timestamp;

    /// History where `juli` gave to each of `recipients` in consecutive years
    /// starting in 2016.
    fn juli_history(recipients: &[&str]) -> Vec<PastDraw> {
        recipients
            .iter()
            .enumerate()
            .map(|(i, recipient)| {
                let ts = format!("{}-12-01T00:00:00.000", 2016 + i);
                PastDraw::new(
                    Timestamp::try_from(ts).unwrap(),
                    vec![Pairing::new("juli", *recipient)],
                    RunCode::new("1").unwrap(),
                )
            })
            .collect()
    }

    fn sorted_pool(people: &[&str], history: &[PastDraw], giver: &str) -> Vec<String> {
        let mut pool: Vec<String> = build_pool(people, history, giver)
            .into_iter()
            .map(String::from)
            .collect();
        pool.sort();
        pool
    }

    const PEOPLE: [&str; 3] = ["neitana", "marce", "juli"];

    #[test]
    fn test_no_history() {
        assert_eq!(sorted_pool(&PEOPLE, &[], "juli"), vec!["marce", "neitana"]);
    }

    #[test]
    fn test_never_drawn_candidate_gets_most_balls() {
        let history = juli_history(&["neitana", "neitana", "guli"]);
        assert_eq!(
            sorted_pool(&PEOPLE, &history, "juli"),
            vec!["marce", "marce", "marce", "neitana"]
        );
    }

    #[test]
    fn test_last_recipient_excluded() {
        let history = juli_history(&["neitana"]);
        assert_eq!(sorted_pool(&PEOPLE, &history, "juli"), vec!["marce"]);
    }

    /// Past recipients who are no longer candidates do not count.
    #[test]
    fn test_departed_recipients_ignored() {
        let history = juli_history(&["neitan", "neitana", "neitan", "guli"]);
        assert_eq!(
            sorted_pool(&PEOPLE, &history, "juli"),
            vec!["marce", "marce", "neitana"]
        );
    }

    #[test]
    fn test_weights_with_several_past_recipients() {
        let history = juli_history(&["neitan", "neitana", "neitan", "guli"]);
        let people = ["neitana", "marce", "juli", "neitan"];
        assert_eq!(
            sorted_pool(&people, &history, "juli"),
            vec!["marce", "marce", "marce", "neitan", "neitana", "neitana"]
        );
    }

    #[test]
    fn test_count_formula() {
        let history = juli_history(&["neitan", "neitana", "neitan", "guli"]);
        let people = ["neitana", "marce", "juli", "neitan"];
        let pool = build_pool(&people, &history, "juli");
        for (candidate, past) in [("marce", 0), ("neitana", 1), ("neitan", 2)] {
            let count = pool.iter().filter(|name| **name == candidate).count();
            assert_eq!(count, 2 + 1 - past);
        }
    }

    #[test]
    fn test_empty_when_nobody_eligible() {
        let history = juli_history(&["marce"]);
        assert!(build_pool(&["juli", "marce"], &history, "juli").is_empty());
        assert!(build_pool(&[], &[], "juli").is_empty());
    }

    /// A giver missing from the latest draw has no last recipient, so
    /// history does not weigh in.
    #[test]
    fn test_giver_absent_from_latest_draw() {
        let mut history = juli_history(&["neitana", "neitana"]);
        history.push(PastDraw::new(
            Timestamp::try_from("2020-12-01T00:00:00.000".to_string()).unwrap(),
            vec![Pairing::new("marce", "neitana")],
            RunCode::new("2").unwrap(),
        ));
        assert_eq!(sorted_pool(&PEOPLE, &history, "juli"), vec!["marce", "neitana"]);
    }
}
