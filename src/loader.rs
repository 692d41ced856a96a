use crate::asset::{initial_capacity, parse_glb, LoadError, LoadEvents, LoadProgress};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn js_err(e: JsValue) -> LoadError {
    LoadError::Fetch(format!("{:?}", e))
}

/// Fetch and parse the model in the background.
///
/// Progress and the single terminal outcome are pushed into `events`, which
/// the frame loop drains; the loader never touches the scene directly.
pub fn spawn_model_load(url: &'static str, events: Rc<RefCell<LoadEvents>>) {
    log::info!("[loader] fetching {}", url);
    spawn_local(async move {
        let result = fetch_with_progress(url, &events)
            .await
            .and_then(|bytes| parse_glb(&bytes));
        if let Ok(model) = &result {
            log::info!(
                "[loader] parsed {} vertices, {} triangles, bounds {:?}",
                model.vertices.len(),
                model.triangle_count(),
                model.bounds()
            );
        }
        events.borrow_mut().finish(result);
    });
}

async fn fetch_with_progress(
    url: &str,
    events: &Rc<RefCell<LoadEvents>>,
) -> Result<Vec<u8>, LoadError> {
    let win = web::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;
    let resp_val = JsFuture::from(win.fetch_with_str(url)).await.map_err(js_err)?;
    let resp: web::Response = resp_val.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        return Err(LoadError::Http {
            status: resp.status(),
            status_text: resp.status_text(),
        });
    }

    let total = resp
        .headers()
        .get("content-length")
        .ok()
        .flatten()
        .and_then(|v| v.trim().parse::<u64>().ok());

    let Some(body) = resp.body() else {
        // No stream to observe; fall back to a single read.
        let buf = JsFuture::from(resp.array_buffer().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        let bytes = js_sys::Uint8Array::new(&buf).to_vec();
        events.borrow_mut().push_progress(LoadProgress {
            loaded: bytes.len() as u64,
            total: total.or(Some(bytes.len() as u64)),
        });
        return Ok(bytes);
    };

    let reader: web::ReadableStreamDefaultReader = body.get_reader().unchecked_into();
    let mut bytes: Vec<u8> = Vec::with_capacity(initial_capacity(total));
    loop {
        let chunk = JsFuture::from(reader.read()).await.map_err(js_err)?;
        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .map_err(js_err)?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }
        let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value")).map_err(js_err)?;
        let array: js_sys::Uint8Array = value.dyn_into().map_err(js_err)?;
        let start = bytes.len();
        bytes.resize(start + array.length() as usize, 0);
        array.copy_to(&mut bytes[start..]);
        events.borrow_mut().push_progress(LoadProgress {
            loaded: bytes.len() as u64,
            total,
        });
    }
    Ok(bytes)
}
