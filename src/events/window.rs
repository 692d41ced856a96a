use crate::camera::Viewport;
use crate::dom;
use crate::scroll::ScrollEffect;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Every scroll event re-arms the effect; the rotation itself is read per frame.
pub fn wire_scroll(scroll: Rc<RefCell<ScrollEffect>>) {
    let closure = Closure::wrap(Box::new(move || {
        scroll.borrow_mut().on_scroll();
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Track the window size; the frame loop pushes it into the camera and GPU.
pub fn wire_resize(canvas: web::HtmlCanvasElement, viewport: Rc<RefCell<Viewport>>) {
    let closure = Closure::wrap(Box::new(move || {
        let Some(wnd) = web::window() else {
            return;
        };
        let next = dom::current_viewport(&wnd);
        if *viewport.borrow() == next {
            return;
        }
        dom::sync_canvas_size(&canvas, &next);
        log::debug!(
            "[resize] {}x{} @{}",
            next.css_width,
            next.css_height,
            next.pixel_ratio
        );
        *viewport.borrow_mut() = next;
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
