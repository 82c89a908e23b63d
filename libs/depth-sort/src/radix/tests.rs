use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tagged {
    key: u32,
    tag: usize,
}

impl RadixSortable for Tagged {
    fn key(&self, shift: u32) -> usize {
        ((self.key >> shift) & 0xFF) as usize
    }
}

fn tagged(keys: &[u32]) -> Vec<Tagged> {
    keys.iter()
        .enumerate()
        .map(|(tag, &key)| Tagged { key, tag })
        .collect()
}

#[test]
fn sorts_keys_spanning_every_digit() {
    let mut data = tagged(&[0xFF00_0000, 0x0000_00FF, 0x00FF_0000, 0x0000_FF00, 0]);
    let mut temp = data.clone();
    radix_sort(&mut data, &mut temp).unwrap();
    let keys: Vec<u32> = data.iter().map(|item| item.key).collect();
    assert_eq!(keys, vec![0, 0xFF, 0xFF00, 0x00FF_0000, 0xFF00_0000]);
}

#[test]
fn equal_keys_keep_input_order() {
    let mut data = tagged(&[5, 1, 5, 1, 5]);
    let mut temp = data.clone();
    radix_sort(&mut data, &mut temp).unwrap();
    let tags: Vec<usize> = data.iter().map(|item| item.tag).collect();
    assert_eq!(tags, vec![1, 3, 0, 2, 4]);
}

#[test]
fn random_keys_match_std_stable_sort() {
    let mut rng = fastrand::Rng::with_seed(7);
    let keys: Vec<u32> = (0..2_000).map(|_| rng.u32(..1_000)).collect();
    let mut data = tagged(&keys);
    let mut expected = data.clone();
    expected.sort_by_key(|item| item.key);

    let mut temp = data.clone();
    radix_sort(&mut data, &mut temp).unwrap();
    assert_eq!(data, expected);
}

#[test]
fn larger_scratch_buffer_is_accepted() {
    let mut data = tagged(&[3, 2, 1]);
    let mut temp = tagged(&[0; 8]);
    radix_sort(&mut data, &mut temp).unwrap();
    assert_eq!(data[0].key, 1);
}

#[test]
fn short_scratch_buffer_is_rejected() {
    let mut data = tagged(&[3, 2, 1]);
    let mut temp = tagged(&[0; 2]);
    assert_eq!(
        radix_sort(&mut data, &mut temp),
        Err(SortError::CapacityExceeded {
            count: 3,
            capacity: 2
        })
    );
}

#[test]
fn empty_and_single_inputs_are_untouched() {
    let mut empty: Vec<Tagged> = Vec::new();
    radix_sort(&mut empty, &mut []).unwrap();

    let mut single = tagged(&[42]);
    let mut temp = tagged(&[0]);
    radix_sort(&mut single, &mut temp).unwrap();
    assert_eq!(single, tagged(&[42]));
    // No pass ran, so the scratch buffer was never written.
    assert_eq!(temp, tagged(&[0]));
}

#[test]
fn float_keys_follow_numeric_order() {
    let values = [
        f32::NEG_INFINITY,
        -1.0e10,
        -1.5,
        -f32::MIN_POSITIVE,
        0.0,
        f32::MIN_POSITIVE,
        1.5,
        1.0e10,
        f32::INFINITY,
    ];
    for pair in values.windows(2) {
        assert!(
            float_sort_key(pair[0]) < float_sort_key(pair[1]),
            "{} should sort before {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn negative_zero_ties_with_zero() {
    assert_eq!(float_sort_key(-0.0), float_sort_key(0.0));
    assert_eq!(float_sort_key(0.0), SIGN_MASK);
}
