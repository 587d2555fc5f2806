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

use crate::error::Fallible;
use crate::error::fail;

/// A source of uniformly distributed random bytes.
///
/// Every call must draw fresh bytes: implementations must not cache output
/// between attempts.
pub trait RandomSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Fallible<()>;
}

/// The operating system's cryptographically secure generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Fallible<()> {
        getrandom::getrandom(dest)?;
        Ok(())
    }
}

/// Replays a fixed byte sequence, wrapping around at the end.
///
/// For tests that need repeatable shuffles and picks.
#[derive(Debug, Clone)]
pub struct ByteSequence {
    bytes: Vec<u8>,
    cursor: usize,
}

impl ByteSequence {
    pub fn new(bytes: Vec<u8>) -> Fallible<Self> {
        if bytes.is_empty() {
            return fail("byte sequence must not be empty");
        }
        Ok(Self { bytes, cursor: 0 })
    }
}

impl RandomSource for ByteSequence {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Fallible<()> {
        for byte in dest.iter_mut() {
            *byte = self.bytes[self.cursor];
            self.cursor = (self.cursor + 1) % self.bytes.len();
        }
        Ok(())
    }
}
