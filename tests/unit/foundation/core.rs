use super::*;

#[test]
fn allocator_hands_out_distinct_ids() {
    let mut ids = IdAllocator::starting_at(7);
    let a = ids.next_id();
    let b = ids.next_id();
    assert_eq!(a, MessageId(7));
    assert_eq!(b, MessageId(8));
}

#[test]
fn millis_arithmetic_saturates() {
    let t = Millis(1_000);
    assert_eq!(t.after(500), Millis(1_500));
    assert_eq!(t.since(Millis(400)), 600);
    assert_eq!(Millis(10).since(Millis(20)), 0);
    assert_eq!(Millis(u64::MAX).after(1), Millis(u64::MAX));
    assert!((Millis(1_500).as_secs_f64() - 1.5).abs() < 1e-12);
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 10.0).is_err());
    assert!(Viewport::new(10.0, f64::NAN).is_err());
    let v = Viewport::new(320.0, 240.0).unwrap();
    assert_eq!(v.width, 320.0);
}
