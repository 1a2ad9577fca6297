use super::*;

#[test]
fn now_is_strictly_increasing() {
    let a = Timestamp::now();
    let b = Timestamp::now();
    assert!(b > a);
    assert!(a > Timestamp::NEVER);
}

#[test]
fn modified_moves_stamp_forward() {
    let mut t = Timestamp::default();
    assert!(t.is_never());
    t.modified();
    let first = t;
    t.modified();
    assert!(t > first);
    assert!(!t.is_never());
    assert!(t.get() > first.get());
}
