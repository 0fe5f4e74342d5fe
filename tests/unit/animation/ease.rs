use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::Power1In,
    Ease::Power1Out,
    Ease::Power1InOut,
    Ease::Power2In,
    Ease::Power2Out,
    Ease::Power2InOut,
    Ease::Power3In,
    Ease::Power3Out,
    Ease::Power3InOut,
];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.5), 1.0);
    }
}

#[test]
fn curves_are_monotonic() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=20 {
            let v = ease.apply(f64::from(i) / 20.0);
            assert!(v >= prev, "{ease:?} not monotonic at step {i}");
            prev = v;
        }
    }
}

#[test]
fn in_out_curves_pass_through_midpoint() {
    for ease in [Ease::Power1InOut, Ease::Power2InOut, Ease::Power3InOut] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
    }
    assert!((Ease::Power1InOut.apply(0.25) - 0.125).abs() < 1e-12);
}

#[test]
fn parses_snake_case_names() {
    let e: Ease = serde_json::from_str("\"power1_in_out\"").unwrap();
    assert_eq!(e, Ease::Power1InOut);
    assert_eq!(Ease::default(), Ease::Power1InOut);
}
