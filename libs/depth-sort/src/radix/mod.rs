//! # Radix Sort
//!
//! Stable least-significant-digit radix sort over 32-bit keys.
//!
//! Each pass is a counting sort on one 8-bit digit: build a histogram, turn
//! it into exclusive prefix sums, scatter into the scratch buffer in input
//! order, then swap the roles of the two buffers. After
//! [`RADIX_PASS_COUNT`] passes the sorted data is back in the caller's
//! buffer.

use config::constants::{RADIX_BITS_PER_PASS, RADIX_BUCKET_COUNT, RADIX_PASS_COUNT};

use crate::error::{SortError, SortResult};

const SIGN_MASK: u32 = 0x8000_0000;
const DIGIT_MASK: usize = RADIX_BUCKET_COUNT - 1;

/// An element that can be ordered by a 32-bit radix key.
pub trait RadixSortable: Copy {
    /// Returns the 8-bit digit of the key starting at bit `shift`.
    fn key(&self, shift: u32) -> usize;
}

/// Maps an `f32` to a `u32` whose unsigned order matches the float order.
///
/// `-0.0` maps to the same key as `0.0`. NaNs with the sign bit clear sort
/// after `+inf`; NaNs with the sign bit set sort before `-inf`.
///
/// # Examples
/// ```
/// use depth_sort::float_sort_key;
/// assert!(float_sort_key(-2.0) < float_sort_key(-1.0));
/// assert!(float_sort_key(-1.0) < float_sort_key(0.0));
/// assert!(float_sort_key(0.0) < float_sort_key(1.0));
/// assert_eq!(float_sort_key(-0.0), float_sort_key(0.0));
/// ```
#[inline]
pub fn float_sort_key(value: f32) -> u32 {
    let bits = if value == 0.0 { 0 } else { value.to_bits() };
    if bits & SIGN_MASK != 0 {
        !bits
    } else {
        bits ^ SIGN_MASK
    }
}

/// Sorts `input` in place, stably, using `temp` as scratch space.
///
/// Inputs of zero or one element return immediately.
///
/// # Errors
///
/// Returns [`SortError::CapacityExceeded`] when `temp` is shorter than
/// `input`.
///
/// # Examples
/// ```
/// use depth_sort::{radix_sort, RadixSortable};
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// struct Key(u32);
///
/// impl RadixSortable for Key {
///     fn key(&self, shift: u32) -> usize {
///         ((self.0 >> shift) & 0xFF) as usize
///     }
/// }
///
/// let mut data = [Key(300), Key(2), Key(70_000), Key(1)];
/// let mut temp = [Key(0); 4];
/// radix_sort(&mut data, &mut temp).unwrap();
/// assert_eq!(data, [Key(1), Key(2), Key(300), Key(70_000)]);
/// ```
pub fn radix_sort<T: RadixSortable>(input: &mut [T], temp: &mut [T]) -> SortResult<()> {
    let len = input.len();
    let capacity = temp.len();
    let temp = temp
        .get_mut(..len)
        .ok_or(SortError::CapacityExceeded {
            count: len,
            capacity,
        })?;
    if len <= 1 {
        return Ok(());
    }

    let mut source: &mut [T] = input;
    let mut destination: &mut [T] = temp;
    for pass in 0..RADIX_PASS_COUNT {
        counting_sort(source, destination, pass * RADIX_BITS_PER_PASS);
        std::mem::swap(&mut source, &mut destination);
    }
    Ok(())
}

fn counting_sort<T: RadixSortable>(source: &[T], destination: &mut [T], shift: u32) {
    let mut offsets = [0usize; RADIX_BUCKET_COUNT];
    for item in source {
        offsets[item.key(shift) & DIGIT_MASK] += 1;
    }

    let mut running = 0;
    for slot in offsets.iter_mut() {
        let count = *slot;
        *slot = running;
        running += count;
    }

    for item in source {
        let bucket = item.key(shift) & DIGIT_MASK;
        destination[offsets[bucket]] = *item;
        offsets[bucket] += 1;
    }
}

#[cfg(test)]
mod tests;
