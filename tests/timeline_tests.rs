// Host-side tests for the entrance sequencer and the landing page steps.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod timeline {
    include!("../src/timeline.rs");
}
mod entrance {
    include!("../src/entrance.rs");
}
mod asset {
    include!("../src/asset.rs");
}

use asset::*;
use entrance::*;
use std::time::Duration;
use timeline::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn sequencer_is_idle_until_started() {
    let mut seq = landing_sequence();
    assert_eq!(seq.state(), SequenceState::Idle);
    assert!(seq.advance(Duration::from_secs(10)).is_empty());
    assert_eq!(seq.state(), SequenceState::Idle);
}

#[test]
fn start_is_one_shot() {
    let mut seq = landing_sequence();
    assert!(seq.start());
    assert!(!seq.start());
    assert_eq!(seq.state(), SequenceState::Animating);
}

#[test]
fn landing_steps_are_ordered_with_expected_timings() {
    let seq = landing_sequence();
    let steps: Vec<(Entrance, Duration, Duration)> = seq
        .steps()
        .iter()
        .map(|s| (s.effect, s.delay, s.duration))
        .collect();
    assert_eq!(
        steps,
        vec![
            (Entrance::LoaderSlideOut, ms(0), ms(1000)),
            (Entrance::ModelRise, ms(1000), ms(2000)),
            (Entrance::HeaderReveal, ms(2000), ms(1000)),
            (Entrance::NewDropReveal, ms(2500), ms(1000)),
        ]
    );
    assert_eq!(seq.total_duration(), ms(3500));
}

#[test]
fn advance_reports_running_steps_with_linear_progress() {
    let mut seq = landing_sequence();
    seq.start();

    let f = seq.advance(ms(500));
    assert_eq!(f.len(), 1);
    assert_eq!(f[0].effect, Entrance::LoaderSlideOut);
    assert!(approx(f[0].progress, 0.5));

    let f = seq.advance(ms(1000));
    assert_eq!(f.len(), 2);
    assert_eq!(f[0].effect, Entrance::LoaderSlideOut);
    assert!(approx(f[0].progress, 1.0));
    assert_eq!(f[1].effect, Entrance::ModelRise);
    assert!(approx(f[1].progress, 0.25));

    let f = seq.advance(ms(1000));
    let effects: Vec<Entrance> = f.iter().map(|s| s.effect).collect();
    assert_eq!(
        effects,
        vec![
            Entrance::ModelRise,
            Entrance::HeaderReveal,
            Entrance::NewDropReveal
        ]
    );
    assert!(approx(f[0].progress, 0.75));
    assert!(approx(f[1].progress, 0.5));
    assert!(approx(f[2].progress, 0.0));

    let f = seq.advance(Duration::from_secs(10));
    assert_eq!(f.len(), 3);
    assert!(f.iter().all(|s| s.progress == 1.0));
    assert_eq!(seq.state(), SequenceState::Settled);
    assert!(seq.advance(ms(16)).is_empty());
}

#[test]
fn every_step_completes_exactly_once_at_frame_rate() {
    let mut seq = landing_sequence();
    seq.start();
    let mut completions = std::collections::HashMap::new();
    let mut last_progress = std::collections::HashMap::new();
    for _ in 0..400 {
        for f in seq.advance(ms(16)) {
            let prev = last_progress.insert(f.effect, f.progress).unwrap_or(0.0);
            assert!(f.progress >= prev, "{:?} went backwards", f.effect);
            if f.progress >= 1.0 {
                *completions.entry(f.effect).or_insert(0) += 1;
            }
        }
    }
    assert_eq!(seq.state(), SequenceState::Settled);
    assert_eq!(completions.len(), 4);
    assert!(completions.values().all(|n| *n == 1));
}

#[test]
fn zero_duration_step_completes_at_its_delay() {
    let mut seq = Sequencer::new(vec![TimedStep::new(0.25, 0.0, 7u8)]);
    seq.start();
    assert!(seq.advance(ms(100)).is_empty());
    let f = seq.advance(ms(150));
    assert_eq!(f.len(), 1);
    assert_eq!(f[0].progress, 1.0);
    assert_eq!(seq.state(), SequenceState::Settled);
}

#[test]
fn empty_sequence_settles_on_start() {
    let mut seq: Sequencer<u8> = Sequencer::new(Vec::new());
    assert_eq!(seq.state(), SequenceState::Idle);
    seq.start();
    assert_eq!(seq.state(), SequenceState::Settled);
    assert_eq!(seq.total_duration(), Duration::ZERO);
}

#[test]
fn content_reveal_fades_in_after_one_second() {
    let mut seq = content_sequence();
    seq.start();
    assert!(seq.advance(ms(999)).is_empty());
    let f = seq.advance(ms(501));
    assert_eq!(f[0].effect, Entrance::ContentReveal);
    assert!(approx(f[0].progress, 0.5));
}

#[test]
fn model_rise_is_linear_from_below_frame() {
    assert_eq!(value_at(Entrance::ModelRise, 0.0), EntranceValue::ModelY(-10.0));
    assert_eq!(value_at(Entrance::ModelRise, 0.5), EntranceValue::ModelY(-5.0));
    assert_eq!(value_at(Entrance::ModelRise, 1.0), EntranceValue::ModelY(0.0));
    assert_eq!(initial_style(Entrance::ModelRise), EntranceValue::ModelY(-10.0));
}

#[test]
fn header_reveal_starts_hidden_and_ends_in_place() {
    let EntranceValue::Element(start) = initial_style(Entrance::HeaderReveal) else {
        panic!("header reveal should style an element");
    };
    assert_eq!(start.offset, Some(Offset::Px(-100.0)));
    assert_eq!(start.opacity, Some(0.0));

    let EntranceValue::Element(end) = value_at(Entrance::NewDropReveal, 1.0) else {
        panic!("new-drop reveal should style an element");
    };
    assert_eq!(end.offset, Some(Offset::Px(0.0)));
    assert_eq!(end.opacity, Some(1.0));
}

#[test]
fn loader_slides_out_by_its_own_height() {
    let EntranceValue::Element(end) = value_at(Entrance::LoaderSlideOut, 1.0) else {
        panic!("loader slide should style an element");
    };
    assert_eq!(end.offset, Some(Offset::Percent(-100.0)));
    assert_eq!(end.opacity, None);
    assert_eq!(Offset::Percent(-100.0).to_css(), "translateY(-100%)");
    assert_eq!(Offset::Px(-50.0).to_css(), "translateY(-50px)");
}

#[test]
fn content_reveal_only_touches_opacity() {
    let EntranceValue::Element(mid) = value_at(Entrance::ContentReveal, 0.5) else {
        panic!("content reveal should style an element");
    };
    assert_eq!(mid.offset, None);
    let o = mid.opacity.unwrap_or(-1.0);
    assert!(o > 0.5 && o < 1.0, "ease should be past halfway at t=0.5, got {o}");
}

#[test]
fn ease_matches_css_curve() {
    assert_eq!(ease(0.0), 0.0);
    assert_eq!(ease(1.0), 1.0);
    assert_eq!(ease(-1.0), 0.0);
    assert_eq!(ease(2.0), 1.0);
    // cubic-bezier(0.25, 0.1, 0.25, 1.0) at x = 0.5
    assert!((ease(0.5) - 0.8024).abs() < 1e-3, "got {}", ease(0.5));

    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease(i as f32 / 100.0);
        assert!(v >= prev - 1e-6, "ease not monotonic at {i}");
        prev = v;
    }
}

/// Feeds every queued loader event through the landing page handler.
fn run_load(events: &mut LoadEvents, seq: &mut Sequencer<Entrance>) -> Vec<LoadReaction> {
    let queued: Vec<LoadEvent> = events.drain().collect();
    queued
        .into_iter()
        .map(|ev| handle_load_event(ev, seq))
        .collect()
}

#[test]
fn progress_events_become_loader_text() {
    let mut events = LoadEvents::new();
    let mut seq = landing_sequence();
    events.push_progress(LoadProgress {
        loaded: 50,
        total: Some(200),
    });
    events.push_progress(LoadProgress {
        loaded: 80,
        total: None,
    });

    let reactions = run_load(&mut events, &mut seq);
    assert_eq!(reactions.len(), 2);
    assert!(matches!(&reactions[0], LoadReaction::LoaderText(t) if t == "25%"));
    // No total, so the last label stays on screen.
    assert!(matches!(reactions[1], LoadReaction::None));
    assert_eq!(seq.state(), SequenceState::Idle);
}

#[test]
fn load_success_starts_exactly_one_sequence() {
    let mut events = LoadEvents::new();
    let mut seq = landing_sequence();
    events.finish(Ok(ModelData::default()));
    // A late duplicate outcome is dropped by the queue.
    assert!(!events.finish(Ok(ModelData::default())));

    let reactions = run_load(&mut events, &mut seq);
    assert_eq!(reactions.len(), 1);
    assert!(matches!(reactions[0], LoadReaction::AttachModel(_)));
    assert_eq!(seq.state(), SequenceState::Animating);

    // Even a second model event would not restart the entrance.
    let again = handle_load_event(LoadEvent::Loaded(ModelData::default()), &mut seq);
    assert!(matches!(again, LoadReaction::AttachModel(_)));
    assert!(!seq.start());
    let rises = seq
        .advance(Duration::from_secs(10))
        .iter()
        .filter(|f| f.effect == Entrance::ModelRise)
        .count();
    assert_eq!(rises, 1);
}

#[test]
fn load_failure_runs_no_model_steps() {
    let mut events = LoadEvents::new();
    let mut seq = landing_sequence();
    let mut content = content_sequence();
    events.finish(Err(LoadError::Http {
        status: 404,
        status_text: "Not Found".into(),
    }));
    let reactions = run_load(&mut events, &mut seq);
    assert!(matches!(reactions[..], [LoadReaction::None]));

    assert_eq!(seq.state(), SequenceState::Idle);
    assert!(seq
        .advance(Duration::from_secs(10))
        .iter()
        .all(|f| f.effect != Entrance::ModelRise));

    // The content reveal does not depend on the model.
    content.start();
    let f = content.advance(Duration::from_secs(3));
    assert_eq!(f.len(), 1);
    assert_eq!(f[0].progress, 1.0);
}
