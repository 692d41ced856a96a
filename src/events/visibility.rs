use crate::constants::CONTENT_SELECTOR;
use crate::entrance::Entrance;
use crate::timeline::Sequencer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn start_reveal(content: &Rc<RefCell<Sequencer<Entrance>>>) {
    if content.borrow_mut().start() {
        log::info!("[content] in view; revealing");
    }
}

/// Start the content fade-in the first time the section enters the viewport.
///
/// Without a content section or `IntersectionObserver`, the reveal starts at once.
pub fn wire_content_reveal(document: &web::Document, content: Rc<RefCell<Sequencer<Entrance>>>) {
    let Some(section) = document.query_selector(CONTENT_SELECTOR).ok().flatten() else {
        start_reveal(&content);
        return;
    };

    let content_cb = content.clone();
    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            let visible = entries.iter().any(|entry| {
                entry
                    .dyn_into::<web::IntersectionObserverEntry>()
                    .map(|e| e.is_intersecting())
                    .unwrap_or(false)
            });
            if visible {
                start_reveal(&content_cb);
                observer.disconnect();
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    match web::IntersectionObserver::new(closure.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(&section);
            closure.forget();
        }
        Err(e) => {
            log::warn!("[content] IntersectionObserver unavailable: {:?}", e);
            start_reveal(&content);
        }
    }
}
