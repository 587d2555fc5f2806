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

//! Unbiased shuffling and the legacy index picker.

use crate::error::DrawError;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::rng::RandomSource;

/// Size of the block of bytes drawn by [`pick_index`].
const PICK_BLOCK_LEN: usize = 11;

/// Which byte of the block [`pick_index`] uses.
const PICK_BYTE: usize = 5;

/// Return a uniformly shuffled copy of `v` (Fisher-Yates).
pub fn shuffle<T, R>(v: Vec<T>, rng: &mut R) -> Fallible<Vec<T>>
where
    R: RandomSource + ?Sized,
{
    let mut v = v;
    let mut n = v.len();
    while n > 1 {
        let k = uniform_below(n, rng)?;
        n -= 1;
        v.swap(k, n);
    }
    Ok(v)
}

/// Shuffle then reverse, `times` times over.
pub fn shuffle_times<T, R>(times: usize, v: Vec<T>, rng: &mut R) -> Fallible<Vec<T>>
where
    R: RandomSource + ?Sized,
{
    let mut v = v;
    for _ in 0..times {
        v = shuffle(v, rng)?;
        v.reverse();
    }
    Ok(v)
}

/// Pick an index in `[0, total)` by scaling a single random byte.
///
/// This is not uniform: each index receives the bytes that round to it, and
/// the top index also absorbs the bytes that round to `total`. Kept as is so
/// that draws stay statistically comparable with the existing history.
pub fn pick_index<R>(total: usize, rng: &mut R) -> Result<usize, DrawError>
where
    R: RandomSource + ?Sized,
{
    let mut block = [0u8; PICK_BLOCK_LEN];
    rng.fill_bytes(&mut block)?;
    let fraction = f64::from(block[PICK_BYTE]) / f64::from(u8::MAX);
    let index = (fraction * total as f64).round() as usize;
    if index < total {
        return Ok(index);
    }
    match index.checked_sub(1) {
        Some(clamped) if clamped < total => Ok(clamped),
        _ => Err(DrawError::IndexFault { index, len: total }),
    }
}

/// Uniform integer in `[0, n)` by rejection sampling.
///
/// Ranges that fit in a byte draw one byte per try; larger ranges draw four.
fn uniform_below<R>(n: usize, rng: &mut R) -> Fallible<usize>
where
    R: RandomSource + ?Sized,
{
    let max_byte = usize::from(u8::MAX);
    if n <= max_byte {
        let limit = n * (max_byte / n);
        let mut byte = [0u8; 1];
        loop {
            rng.fill_bytes(&mut byte)?;
            let value = usize::from(byte[0]);
            if value < limit {
                return Ok(value % n);
            }
        }
    }
    let wide = u64::try_from(n)
        .ok()
        .filter(|wide| *wide <= u64::from(u32::MAX))
        .ok_or_else(|| ErrorReport::new(format!("cannot shuffle {n} elements")))?;
    let limit = wide * (u64::from(u32::MAX) / wide);
    let mut word = [0u8; 4];
    loop {
        rng.fill_bytes(&mut word)?;
        let value = u64::from(u32::from_le_bytes(word));
        if value < limit {
            return Ok((value % wide) as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ByteSequence;
    use crate::rng::OsRandom;

    #[test]
    fn test_shuffle_with_fixed_bytes() -> Fallible<()> {
        let mut rng = ByteSequence::new(vec![0])?;
        let shuffled = shuffle(vec!["a", "b", "c"], &mut rng)?;
        assert_eq!(shuffled, vec!["b", "c", "a"]);
        Ok(())
    }

    /// Bytes at or above the largest multiple of the range are redrawn.
    #[test]
    fn test_shuffle_rejects_biased_bytes() -> Fallible<()> {
        let mut rng = ByteSequence::new(vec![255, 1])?;
        let shuffled = shuffle(vec!["a", "b", "c"], &mut rng)?;
        assert_eq!(shuffled, vec!["a", "c", "b"]);
        Ok(())
    }

    #[test]
    fn test_shuffle_times_reverses() -> Fallible<()> {
        let mut rng = ByteSequence::new(vec![0])?;
        let once = shuffle_times(1, vec!["a", "b", "c"], &mut rng)?;
        assert_eq!(once, vec!["a", "c", "b"]);
        let none = shuffle_times(0, vec!["a", "b", "c"], &mut rng)?;
        assert_eq!(none, vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn test_shuffle_is_permutation() -> Fallible<()> {
        let original: Vec<usize> = (0..300).collect();
        let mut shuffled = shuffle_times(2, original.clone(), &mut OsRandom)?;
        assert_eq!(shuffled.len(), original.len());
        shuffled.sort();
        assert_eq!(shuffled, original);
        Ok(())
    }

    #[test]
    fn test_shuffle_trivial_inputs() -> Fallible<()> {
        let mut rng = ByteSequence::new(vec![0])?;
        let empty: Vec<u8> = shuffle(Vec::new(), &mut rng)?;
        assert!(empty.is_empty());
        assert_eq!(shuffle(vec![7], &mut rng)?, vec![7]);
        Ok(())
    }

    /// Distribution of the picker over every possible byte, for a pool of
    /// three.
    #[test]
    fn test_pick_index_distribution() -> Fallible<()> {
        let mut counts = [0usize; 3];
        for byte in 0..=u8::MAX {
            let mut rng = ByteSequence::new(vec![byte])?;
            let index = pick_index(3, &mut rng)?;
            counts[index] += 1;
        }
        assert_eq!(counts, [43, 85, 128]);
        Ok(())
    }

    #[test]
    fn test_pick_index_uses_middle_byte() -> Fallible<()> {
        let mut block = vec![0u8; PICK_BLOCK_LEN];
        block[PICK_BYTE] = 255;
        let mut rng = ByteSequence::new(block)?;
        assert_eq!(pick_index(4, &mut rng)?, 3);
        Ok(())
    }

    #[test]
    fn test_pick_index_empty_pool() -> Fallible<()> {
        let mut rng = ByteSequence::new(vec![0])?;
        assert_eq!(
            pick_index(0, &mut rng),
            Err(DrawError::IndexFault { index: 0, len: 0 })
        );
        Ok(())
    }
}
