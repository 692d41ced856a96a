use crate::asset::{LoadEvent, LoadEvents, ModelData};
use crate::camera::{LightRig, ModelRig, NoiseParams, OrbitControls, PerspectiveCamera, Viewport};
use crate::dom::PageElements;
use crate::entrance::{self, Entrance, EntranceValue, LoadReaction};
use crate::render;
use crate::scroll::ScrollEffect;
use crate::timeline::{Sequencer, StepFrame};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scroll: Rc<RefCell<ScrollEffect>>,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub viewport: Rc<RefCell<Viewport>>,
    pub load_events: Rc<RefCell<LoadEvents>>,
    pub content: Rc<RefCell<Sequencer<Entrance>>>,
    pub entrance: Sequencer<Entrance>,
    pub page: PageElements,

    pub camera: PerspectiveCamera,
    pub lights: LightRig,
    pub rig: ModelRig,
    pub noise: NoiseParams,
    pub gpu: Option<render::GpuState<'a>>,

    pub started: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        self.drain_load_events();

        // Camera controls, then scroll rotation, then effect state; all before the draw.
        {
            let mut controls = self.controls.borrow_mut();
            controls.update(dt);
            controls.apply(&mut self.camera);
        }

        let scroll_y = web::window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0);
        {
            let mut scroll = self.scroll.borrow_mut();
            scroll.set_scroll_offset(scroll_y as f32);
            self.rig.scroll_rotation = scroll.current_rotation();
            scroll.tick(dt);
            self.noise.effect = scroll.current_intensity();
        }
        self.noise.time = (now - self.started).as_secs_f32();

        self.advance_entrances(dt);

        let viewport = *self.viewport.borrow();
        viewport.apply(&mut self.camera, &mut self.noise);

        if let Some(g) = &mut self.gpu {
            let (w, h) = viewport.backing_size();
            g.resize_if_needed(w, h);
            match g.render(&self.camera, self.rig.model_matrix(), &self.lights, self.noise) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("[frame] render error: {:?}", e),
            }
        }
    }

    fn drain_load_events(&mut self) {
        let events: Vec<LoadEvent> = self.load_events.borrow_mut().drain().collect();
        for ev in events {
            match entrance::handle_load_event(ev, &mut self.entrance) {
                LoadReaction::LoaderText(label) => self.page.set_loader_text(&label),
                LoadReaction::AttachModel(model) => self.attach_model(&model),
                LoadReaction::None => {}
            }
        }
    }

    fn attach_model(&mut self, model: &ModelData) {
        match &mut self.gpu {
            Some(g) => g.attach_model(model),
            None => log::warn!("[gpu] unavailable; model will not be drawn"),
        }
    }

    fn advance_entrances(&mut self, dt: Duration) {
        for f in self.entrance.advance(dt) {
            self.apply_step(f);
        }
        let content_frames = self.content.borrow_mut().advance(dt);
        for f in content_frames {
            self.apply_step(f);
        }
    }

    fn apply_step(&mut self, f: StepFrame<Entrance>) {
        match entrance::value_at(f.effect, f.progress) {
            EntranceValue::ModelY(y) => self.rig.load_offset_y = y,
            EntranceValue::Element(style) => self.page.apply(f.effect, &style),
        }
        if f.progress >= 1.0 {
            log::debug!("[entrance] {:?} settled", f.effect);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
