use super::*;

#[test]
fn after_and_since_saturate() {
    assert_eq!(Millis(10).after(Millis(5)), Millis(15));
    assert_eq!(Millis(u64::MAX).after(Millis(1)), Millis(u64::MAX));
    assert_eq!(Millis(10).since(Millis(4)), Millis(6));
    assert_eq!(Millis(4).since(Millis(10)), Millis::ZERO);
}

#[test]
fn offset_clamps_at_zero() {
    assert_eq!(Millis(1000).offset(-500), Millis(500));
    assert_eq!(Millis(200).offset(-500), Millis::ZERO);
    assert_eq!(Millis(200).offset(300), Millis(500));
}

#[test]
fn serializes_as_bare_number() {
    assert_eq!(serde_json::to_string(&Millis(2500)).unwrap(), "2500");
    let m: Millis = serde_json::from_str("16").unwrap();
    assert_eq!(m, Millis(16));
    assert_eq!(Millis(1500).as_secs_f64(), 1.5);
    assert_eq!(Millis(7).to_string(), "7ms");
}
