//! Integration tests for PhaseSequence

mod common;
use common::*;

use phase_sequencer::{PhaseSequence, PhaseSequence3, SequenceError, TimeDuration, colors};

#[test]
fn traffic_light_preset_has_expected_phases() {
    let phases = PhaseSequence3::<TestDuration>::traffic_light().unwrap();

    let summary: Vec<(&str, u64)> = phases
        .iter()
        .map(|p| (p.id.as_str(), p.duration.as_millis()))
        .collect();

    assert_eq!(summary, vec![("green", 5000), ("yellow", 2500), ("red", 5000)]);
    assert!(colors_equal(phases[1].color, colors::YELLOW));
}

#[test]
fn traffic_light_preset_needs_three_slots() {
    let result = PhaseSequence::<TestDuration, 2>::traffic_light();
    assert_eq!(result, Err(SequenceError::CapacityExceeded));
}

#[test]
fn empty_sequence_is_rejected() {
    let result = PhaseSequence::<TestDuration, 4>::builder().build();
    assert_eq!(result, Err(SequenceError::EmptySequence));
}

#[test]
fn zero_duration_phase_is_rejected() {
    let result = PhaseSequence::<TestDuration, 4>::builder()
        .phase("green", TestDuration(1000), colors::GREEN)
        .unwrap()
        .phase("flash", TestDuration(0), colors::RED)
        .unwrap()
        .build();

    assert_eq!(result, Err(SequenceError::ZeroDuration));
}

#[test]
fn overlong_id_is_rejected() {
    let result = PhaseSequence::<TestDuration, 4>::builder().phase(
        "green-arrow-left-turn",
        TestDuration(1000),
        colors::GREEN,
    );

    assert!(matches!(result, Err(SequenceError::IdTooLong)));
}

#[test]
fn capacity_is_enforced_per_phase() {
    let result = PhaseSequence::<TestDuration, 1>::builder()
        .phase("green", TestDuration(1000), colors::GREEN)
        .unwrap()
        .phase("red", TestDuration(1000), colors::RED);

    assert!(matches!(result, Err(SequenceError::CapacityExceeded)));
}

#[test]
fn next_index_wraps_around() {
    let phases = traffic_light();

    assert_eq!(phases.next_index(0), 1);
    assert_eq!(phases.next_index(1), 2);
    assert_eq!(phases.next_index(2), 0);
    assert_eq!(phases.len(), 3);
    assert!(!phases.is_empty());
    assert!(phases.get(3).is_none());
}
