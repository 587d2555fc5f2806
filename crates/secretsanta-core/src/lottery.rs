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

//! Drawing a complete assignment.
//!
//! A draw walks the participants in random order and greedily picks a
//! recipient for each from their weighted pool. It never backtracks, so it
//! can paint itself into a corner; such attempts are thrown away and the
//! whole draw starts over.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::DrawError;
use crate::error::Fallible;
use crate::error::Inconsistency;
use crate::error::fail;
use crate::pool::build_pool;
use crate::rng::RandomSource;
use crate::shuffle::pick_index;
use crate::shuffle::shuffle_times;
use crate::types::pairing::Assignment;
use crate::types::pairing::Pairing;
use crate::types::pairing::PastDraw;
use crate::types::participant::Participant;

/// How many shuffle-and-reverse rounds are applied before each choice.
const SHUFFLE_ROUNDS: usize = 2;

/// Bound on the number of attempts made by [`draw_until_valid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AttemptLimit {
    /// Keep drawing until an attempt succeeds. An exclusion graph with no
    /// valid assignment makes this loop forever.
    #[default]
    Unbounded,
    /// Give up after this many rejected attempts.
    AtMost(usize),
}

impl AttemptLimit {
    fn exhausted(self, attempts: usize) -> bool {
        match self {
            AttemptLimit::Unbounded => false,
            AttemptLimit::AtMost(max) => attempts >= max,
        }
    }
}

impl Display for AttemptLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptLimit::Unbounded => write!(f, "unbounded"),
            AttemptLimit::AtMost(max) => write!(f, "at most {max}"),
        }
    }
}

/// Make one attempt at a full assignment.
pub fn draw<R>(
    participants: &[Participant],
    history: &[PastDraw],
    rng: &mut R,
) -> Result<Assignment, DrawError>
where
    R: RandomSource + ?Sized,
{
    let names: Vec<&str> = participants.iter().map(Participant::name).collect();
    let order = shuffle_times(SHUFFLE_ROUNDS, participants.iter().collect::<Vec<_>>(), rng)?;

    order.into_iter().try_fold(
        Assignment::with_capacity(participants.len()),
        |mut assignment, giver| -> Result<Assignment, DrawError> {
            let remaining: Vec<&str> = names
                .iter()
                .copied()
                .filter(|name| !giver.excludes(name))
                .filter(|name| !assignment.iter().any(|p| p.recipient == *name))
                .collect();
            let pool = build_pool(&remaining, history, giver.name());
            if pool.is_empty() {
                return Err(DrawError::EmptyPool {
                    giver: giver.name().to_string(),
                });
            }
            let pool = shuffle_times(SHUFFLE_ROUNDS, pool, rng)?;
            let index = pick_index(pool.len(), rng)?;
            let recipient = pool.get(index).ok_or(DrawError::IndexFault {
                index,
                len: pool.len(),
            })?;
            assignment.push(Pairing::new(giver.name(), *recipient));
            Ok(assignment)
        },
    )
}

/// Check that everybody gives exactly once, receives exactly once, and
/// nobody gives to themselves.
pub fn check_consistency(
    participants: &[Participant],
    assignment: &[Pairing],
) -> Result<(), Inconsistency> {
    if participants.len() != assignment.len() {
        return Err(Inconsistency::CountMismatch {
            participants: participants.len(),
            pairings: assignment.len(),
        });
    }
    for participant in participants {
        let count = assignment
            .iter()
            .filter(|p| p.giver == participant.name())
            .count();
        if count != 1 {
            return Err(Inconsistency::GiverNotUnique {
                name: participant.name().to_string(),
                count,
            });
        }
    }
    for participant in participants {
        let count = assignment
            .iter()
            .filter(|p| p.recipient == participant.name())
            .count();
        if count != 1 {
            return Err(Inconsistency::RecipientNotUnique {
                name: participant.name().to_string(),
                count,
            });
        }
    }
    if let Some(pairing) = assignment.iter().find(|p| p.giver == p.recipient) {
        return Err(Inconsistency::SelfAssigned {
            name: pairing.giver.clone(),
        });
    }
    Ok(())
}

/// Draw repeatedly until an attempt passes [`check_consistency`].
///
/// Failed attempts are discarded whole. A failing randomness source is
/// reported immediately rather than retried.
pub fn draw_until_valid<R>(
    participants: &[Participant],
    history: &[PastDraw],
    rng: &mut R,
    limit: AttemptLimit,
) -> Fallible<Assignment>
where
    R: RandomSource + ?Sized,
{
    let mut attempts: usize = 0;
    loop {
        attempts += 1;
        let outcome = draw(participants, history, rng).and_then(|assignment| {
            check_consistency(participants, &assignment)?;
            Ok(assignment)
        });
        match outcome {
            Ok(assignment) => {
                log::debug!("Found a valid assignment after {attempts} attempt(s)");
                return Ok(assignment);
            }
            Err(err) if err.is_retryable() => {
                log::trace!("Attempt {attempts} rejected: {err}");
                if limit.exhausted(attempts) {
                    return fail(format!(
                        "no valid assignment after {attempts} attempts; check the exception lists"
                    ));
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}
