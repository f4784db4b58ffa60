//! End-to-end checks of the public adaptation API

use adaptive_profile::{
    profile_from_interactions, AdaptError, AdaptiveSession, InteractionKind, InteractionRecorder,
    Profile, ProfileClassifier, SessionCounters,
};
use pretty_assertions::assert_eq;

use adaptive_profile::InteractionKind::{Collapse as C, Expand as E};

#[test]
fn recorder_and_classifier_compose() {
    let mut recorder = InteractionRecorder::new();
    let classifier = ProfileClassifier::new();

    assert!(matches!(
        classifier.classify(&recorder.counters()),
        Err(AdaptError::InsufficientData)
    ));

    for _ in 0..5 {
        recorder.record(E);
    }
    for _ in 0..3 {
        recorder.record(C);
    }

    assert_eq!(recorder.counters(), SessionCounters::new(5, 3));
    // 5 / 8 = 0.625
    assert_eq!(classifier.classify(&recorder.counters()).unwrap(), Profile::Expert);
}

#[test]
fn interleavings_with_equal_counts_agree() {
    let orders: [&[InteractionKind]; 3] = [
        &[E, E, C, E, C, E, C, E],
        &[E, E, E, E, E, C, C, C],
        &[C, C, C, E, E, E, E, E],
    ];

    let results: Vec<(SessionCounters, Profile)> = orders
        .iter()
        .map(|order| {
            let mut session = AdaptiveSession::new();
            session.record_all(order.iter().copied());
            (session.counters(), session.classify().unwrap())
        })
        .collect();

    for result in &results {
        assert_eq!(*result, (SessionCounters::new(5, 3), Profile::Expert));
    }
}

#[test]
fn boundary_cases() {
    let classifier = ProfileClassifier::new();
    assert_eq!(
        classifier.classify(&SessionCounters::new(3, 2)).unwrap(),
        Profile::Beginner
    );
    assert_eq!(
        classifier.classify(&SessionCounters::new(61, 39)).unwrap(),
        Profile::Expert
    );
}

#[test]
fn toggling_one_panel_open_and_closed_is_beginner() {
    let mut session = AdaptiveSession::new();
    let mut visible = false;
    for _ in 0..6 {
        visible = !visible;
        session.record_visibility(visible);
    }

    assert_eq!(session.counters(), SessionCounters::new(3, 3));
    assert_eq!(session.classify().unwrap(), Profile::Beginner);
}

#[test]
fn one_shot_report_round_trips_through_json() {
    let json = profile_from_interactions(
        r#"{"kind": "expand"}
{"kind": "expand"}
{"kind": "expand"}
{"kind": "collapse"}"#,
    )
    .unwrap();

    let report: adaptive_profile::AdaptationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report.profile, Profile::Expert);
    assert_eq!(report.counters, SessionCounters::new(3, 1));
    assert_eq!(report.label, Profile::Expert.label());
}
