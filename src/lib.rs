#![cfg(target_arch = "wasm32")]
use crate::asset::LoadEvents;
use crate::camera::{LightRig, ModelRig, NoiseParams, OrbitControls, PerspectiveCamera};
use crate::entrance::{Entrance, EntranceValue};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod asset;
mod camera;
mod constants;
mod dom;
mod entrance;
mod events;
mod frame;
mod loader;
mod render;
mod scroll;
mod timeline;

use constants::{MODEL_URL, SNEAKER_SELECTOR};

/// Hide the header, new-drop section and content items until their reveals run.
fn apply_initial_styles(page: &dom::PageElements) {
    for effect in [
        Entrance::HeaderReveal,
        Entrance::NewDropReveal,
        Entrance::ContentReveal,
    ] {
        if let EntranceValue::Element(style) = entrance::initial_style(effect) {
            page.apply(effect, &style);
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sneaker-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Page text first, so nothing flashes while the GPU comes up.
    let page = dom::PageElements::find(&document);
    apply_initial_styles(&page);

    let content = Rc::new(RefCell::new(entrance::content_sequence()));
    events::wire_content_reveal(&document, content.clone());

    // Output surface sized to the window
    let canvas = dom::create_canvas_in(&document, SNEAKER_SELECTOR)?;
    let viewport = dom::current_viewport(&window);
    dom::sync_canvas_size(&canvas, &viewport);
    let viewport = Rc::new(RefCell::new(viewport));
    events::wire_resize(canvas.clone(), viewport.clone());

    // The model loads in the background; frames render an empty scene meanwhile.
    let load_events = Rc::new(RefCell::new(LoadEvents::new()));
    loader::spawn_model_load(MODEL_URL, load_events.clone());

    let scroll = Rc::new(RefCell::new(scroll::ScrollEffect::new()));
    events::wire_scroll(scroll.clone());

    let controls = Rc::new(RefCell::new(OrbitControls::default()));
    events::wire_orbit_drag(events::OrbitWiring {
        canvas: canvas.clone(),
        controls: controls.clone(),
        drag_state: Rc::new(RefCell::new(events::pointer::DragState::default())),
    });

    let gpu: Option<render::GpuState> = frame::init_gpu(&canvas).await;

    let mut camera = PerspectiveCamera::new(viewport.borrow().aspect());
    controls.borrow().apply(&mut camera);

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scroll,
        controls,
        viewport,
        load_events,
        content,
        entrance: entrance::landing_sequence(),
        page,
        camera,
        lights: LightRig::default(),
        rig: ModelRig::default(),
        noise: NoiseParams::default(),
        gpu,
        started: now,
        last_instant: now,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
