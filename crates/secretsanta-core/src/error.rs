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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::string::FromUtf8Error;

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<FromUtf8Error> for ErrorReport {
    fn from(value: FromUtf8Error) -> Self {
        ErrorReport {
            message: format!("UTF-8 conversion error: {value:#?}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

impl From<getrandom::Error> for ErrorReport {
    fn from(value: getrandom::Error) -> Self {
        ErrorReport {
            message: format!("entropy source failed: {value}"),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {
    fn description(&self) -> &str {
        &self.message
    }
}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

/// Why a candidate assignment was rejected by the consistency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// The assignment does not have one pairing per participant.
    CountMismatch { participants: usize, pairings: usize },
    /// A participant gives zero times, or more than once.
    GiverNotUnique { name: String, count: usize },
    /// A participant receives zero times, or more than once.
    RecipientNotUnique { name: String, count: usize },
    /// A participant was drawn for themselves.
    SelfAssigned { name: String },
}

impl Display for Inconsistency {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Inconsistency::CountMismatch {
                participants,
                pairings,
            } => write!(f, "{participants} participants but {pairings} pairings"),
            Inconsistency::GiverNotUnique { name, count } => {
                write!(f, "'{name}' gives {count} times")
            }
            Inconsistency::RecipientNotUnique { name, count } => {
                write!(f, "'{name}' receives {count} times")
            }
            Inconsistency::SelfAssigned { name } => write!(f, "'{name}' gives to themselves"),
        }
    }
}

impl Error for Inconsistency {}

/// A failed draw attempt.
///
/// Everything except [`DrawError::Entropy`] is an expected outcome of the
/// greedy construction and is recovered by starting over.
#[derive(Debug, PartialEq)]
pub enum DrawError {
    /// No eligible recipient was left for this giver.
    EmptyPool { giver: String },
    /// The index picker produced an index outside the pool.
    IndexFault { index: usize, len: usize },
    /// The finished assignment failed the consistency check.
    Inconsistent(Inconsistency),
    /// The randomness source itself failed.
    Entropy(ErrorReport),
}

impl DrawError {
    /// Whether a fresh attempt can succeed where this one failed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, DrawError::Entropy(_))
    }
}

impl Display for DrawError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            DrawError::EmptyPool { giver } => write!(f, "no candidates left for '{giver}'"),
            DrawError::IndexFault { index, len } => {
                write!(f, "index {index} out of range for pool of {len}")
            }
            DrawError::Inconsistent(reason) => write!(f, "inconsistent assignment: {reason}"),
            DrawError::Entropy(report) => write!(f, "{report}"),
        }
    }
}

impl Error for DrawError {}

impl From<Inconsistency> for DrawError {
    fn from(value: Inconsistency) -> Self {
        DrawError::Inconsistent(value)
    }
}

impl From<ErrorReport> for DrawError {
    fn from(value: ErrorReport) -> Self {
        DrawError::Entropy(value)
    }
}

impl From<DrawError> for ErrorReport {
    fn from(value: DrawError) -> Self {
        match value {
            DrawError::Entropy(report) => report,
            other => ErrorReport::new(format!("draw failed: {other}")),
        }
    }
}
