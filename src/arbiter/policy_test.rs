// ABOUTME: Tests for the admission policy - caps, resolution, and decisions.
// ABOUTME: Verifies the grant rule is a pure function of the admitted count.

use super::*;

#[test]
fn test_grant_below_cap() {
    assert_eq!(evaluate(0, 2), Decision::Granted);
    assert_eq!(evaluate(1, 2), Decision::Granted);
}

#[test]
fn test_deny_at_cap() {
    assert_eq!(evaluate(2, 2), Decision::Denied);
    assert_eq!(evaluate(3, 2), Decision::Denied);
}

#[test]
fn test_zero_cap_denies_everything() {
    assert_eq!(evaluate(0, 0), Decision::Denied);
}

#[test]
fn test_default_is_fixed_two() {
    assert_eq!(AdmissionLimit::default(), AdmissionLimit::Fixed(2));
    assert_eq!(AdmissionLimit::default().resolve(5), 2);
    assert_eq!(AdmissionLimit::default().resolve(100), 2);
}

#[test]
fn test_half_ring_rounds_down() {
    assert_eq!(AdmissionLimit::HalfRing.resolve(5), 2);
    assert_eq!(AdmissionLimit::HalfRing.resolve(6), 3);
    assert_eq!(AdmissionLimit::HalfRing.resolve(7), 3);
    assert_eq!(AdmissionLimit::HalfRing.resolve(2), 1);
}

#[test]
fn test_decision_is_granted() {
    assert!(Decision::Granted.is_granted());
    assert!(!Decision::Denied.is_granted());
}

#[test]
fn test_admission_limit_serde() {
    let fixed: AdmissionLimit = serde_json::from_value(serde_json::json!({"fixed": 3})).unwrap();
    assert_eq!(fixed, AdmissionLimit::Fixed(3));

    let half: AdmissionLimit = serde_json::from_value(serde_json::json!("half_ring")).unwrap();
    assert_eq!(half, AdmissionLimit::HalfRing);

    assert_eq!(
        serde_json::to_value(AdmissionLimit::Fixed(2)).unwrap(),
        serde_json::json!({"fixed": 2})
    );
}
