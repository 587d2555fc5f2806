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

//! secretsanta-core: the draw behind secretsanta.
//!
//! This library provides:
//! - A pluggable source of secure random bytes
//! - Unbiased shuffling and the legacy index picker
//! - History-weighted candidate pools
//! - Drawing and checking a complete giver/recipient assignment

pub mod error;
pub mod lottery;
pub mod pool;
pub mod rng;
pub mod shuffle;
pub mod types;

// Re-exports for convenience
pub use error::{DrawError, ErrorReport, Fallible, Inconsistency, fail};
pub use lottery::{AttemptLimit, check_consistency, draw, draw_until_valid};
pub use pool::{WeightedPool, build_pool};
pub use rng::{ByteSequence, OsRandom, RandomSource};
pub use types::pairing::{Assignment, Pairing, PastDraw};
pub use types::participant::Participant;
pub use types::run_code::RunCode;
pub use types::timestamp::Timestamp;
