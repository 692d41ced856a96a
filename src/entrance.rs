use crate::asset::{LoadEvent, ModelData};
use crate::constants::*;
use crate::timeline::{Sequencer, TimedStep};

/// Visual transitions played once content becomes visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entrance {
    LoaderSlideOut,
    ModelRise,
    HeaderReveal,
    NewDropReveal,
    ContentReveal,
}

/// Vertical translation written to an element's `transform`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    Px(f32),
    Percent(f32),
}

impl Offset {
    pub fn to_css(self) -> String {
        match self {
            Offset::Px(v) => format!("translateY({v}px)"),
            Offset::Percent(v) => format!("translateY({v}%)"),
        }
    }
}

/// Style values for a DOM element at some point of its transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementStyle {
    pub offset: Option<Offset>,
    pub opacity: Option<f32>,
}

/// What a step frame changes: a DOM element's style or the model group height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntranceValue {
    Element(ElementStyle),
    ModelY(f32),
}

/// Steps played after the model has loaded.
pub fn landing_sequence() -> Sequencer<Entrance> {
    Sequencer::new(vec![
        TimedStep::new(
            LOADER_SLIDE_DELAY_SEC,
            LOADER_SLIDE_SEC,
            Entrance::LoaderSlideOut,
        ),
        TimedStep::new(MODEL_RISE_DELAY_SEC, MODEL_RISE_SEC, Entrance::ModelRise),
        TimedStep::new(HEADER_REVEAL_DELAY_SEC, REVEAL_SEC, Entrance::HeaderReveal),
        TimedStep::new(
            NEW_DROP_REVEAL_DELAY_SEC,
            REVEAL_SEC,
            Entrance::NewDropReveal,
        ),
    ])
}

/// Fade-in for the content section, started when it scrolls into view.
pub fn content_sequence() -> Sequencer<Entrance> {
    Sequencer::new(vec![TimedStep::new(
        CONTENT_REVEAL_DELAY_SEC,
        CONTENT_REVEAL_SEC,
        Entrance::ContentReveal,
    )])
}

/// Follow-up work for the frame loop after one loader event.
#[derive(Debug)]
pub enum LoadReaction {
    None,
    LoaderText(String),
    AttachModel(ModelData),
}

/// Maps a loader event onto the landing page.
///
/// A loaded model starts `landing`, which only ever runs once. A failure is
/// logged and leaves every model step idle.
pub fn handle_load_event(event: LoadEvent, landing: &mut Sequencer<Entrance>) -> LoadReaction {
    match event {
        LoadEvent::Progress(p) => p.label().map_or(LoadReaction::None, LoadReaction::LoaderText),
        LoadEvent::Loaded(model) => {
            if landing.start() {
                log::info!(
                    "[entrance] started, {:.1}s total",
                    landing.total_duration().as_secs_f32()
                );
            }
            LoadReaction::AttachModel(model)
        }
        LoadEvent::Failed(e) => {
            log::error!("[loader] {}", e);
            LoadReaction::None
        }
    }
}

/// Styles applied at startup, before any transition runs.
pub fn initial_style(effect: Entrance) -> EntranceValue {
    value_at(effect, 0.0)
}

/// Maps linear step progress to the value for `effect`.
pub fn value_at(effect: Entrance, progress: f32) -> EntranceValue {
    let t = progress.clamp(0.0, 1.0);
    match effect {
        Entrance::ModelRise => {
            EntranceValue::ModelY(LOAD_GROUP_START_Y + (LOAD_GROUP_REST_Y - LOAD_GROUP_START_Y) * t)
        }
        Entrance::LoaderSlideOut => EntranceValue::Element(ElementStyle {
            offset: Some(Offset::Percent(-100.0 * ease(t))),
            opacity: None,
        }),
        Entrance::HeaderReveal | Entrance::NewDropReveal => {
            let e = ease(t);
            EntranceValue::Element(ElementStyle {
                offset: Some(Offset::Px(REVEAL_OFFSET_PX * (1.0 - e))),
                opacity: Some(e),
            })
        }
        Entrance::ContentReveal => EntranceValue::Element(ElementStyle {
            offset: None,
            opacity: Some(ease(t)),
        }),
    }
}

// CSS `ease`: cubic-bezier(0.25, 0.1, 0.25, 1.0)
const EASE_X1: f32 = 0.25;
const EASE_Y1: f32 = 0.1;
const EASE_X2: f32 = 0.25;
const EASE_Y2: f32 = 1.0;

#[inline]
fn bezier(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

#[inline]
fn bezier_slope(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

/// CSS `ease` timing function; solves x(s) = t by Newton, falling back to bisection.
pub fn ease(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let mut s = t;
    for _ in 0..8 {
        let err = bezier(EASE_X1, EASE_X2, s) - t;
        if err.abs() < 1e-6 {
            return bezier(EASE_Y1, EASE_Y2, s);
        }
        let slope = bezier_slope(EASE_X1, EASE_X2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = bezier(EASE_X1, EASE_X2, s);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier(EASE_Y1, EASE_Y2, s)
}
