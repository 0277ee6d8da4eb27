use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn ranges_stay_in_bounds() {
    let mut rng = Rng64::new(9);
    for _ in 0..1_000 {
        let f = rng.range_f64(7.0, 12.0);
        assert!((7.0..12.0).contains(&f));
        let u = rng.range_u64(7_000, 12_000);
        assert!((7_000..12_000).contains(&u));
        assert!(rng.index(6) < 6);
    }
}

#[test]
fn empty_ranges_collapse_to_lower_bound() {
    let mut rng = Rng64::new(1);
    assert_eq!(rng.range_f64(3.0, 3.0), 3.0);
    assert_eq!(rng.range_u64(5, 2), 5);
}
