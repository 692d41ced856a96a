use crate::camera::Viewport;
use crate::constants::*;
use crate::entrance::{ElementStyle, Entrance};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn query(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

pub fn apply_style(el: &web::HtmlElement, style: &ElementStyle) {
    let css = el.style();
    if let Some(offset) = style.offset {
        _ = css.set_property("transform", &offset.to_css());
    }
    if let Some(opacity) = style.opacity {
        _ = css.set_property("opacity", &format!("{:.4}", opacity.clamp(0.0, 1.0)));
    }
}

/// Viewport as reported by the window (`innerWidth` x `innerHeight`).
pub fn current_viewport(window: &web::Window) -> Viewport {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    Viewport::new(w, h, window.device_pixel_ratio())
}

/// Size the canvas: CSS box to the viewport, backing store scaled by pixel ratio.
pub fn sync_canvas_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w_px, h_px) = viewport.backing_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let css = canvas.style();
    _ = css.set_property("width", &format!("{}px", viewport.css_width));
    _ = css.set_property("height", &format!("{}px", viewport.css_height));
}

/// Create the output canvas and append it to the sneaker section.
pub fn create_canvas_in(
    document: &web::Document,
    selector: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let container = document
        .query_selector(selector)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing {selector}"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Page elements touched by the entrance animations and the load indicator.
///
/// Any of them may be missing from the markup; missing ones are skipped.
pub struct PageElements {
    pub loader: Option<web::HtmlElement>,
    pub loader_text: Option<web::HtmlElement>,
    pub header: Option<web::HtmlElement>,
    pub new_drop: Option<web::HtmlElement>,
    pub content_items: Vec<web::HtmlElement>,
}

impl PageElements {
    pub fn find(document: &web::Document) -> Self {
        let elements = Self {
            loader: query(document, LOADER_SELECTOR),
            loader_text: query(document, LOADER_TEXT_SELECTOR),
            header: query(document, HEADER_SELECTOR),
            new_drop: query(document, NEW_DROP_SELECTOR),
            content_items: query_all(document, CONTENT_ITEMS_SELECTOR),
        };
        log::info!(
            "[dom] loader={} header={} new-drop={} content items={}",
            elements.loader.is_some(),
            elements.header.is_some(),
            elements.new_drop.is_some(),
            elements.content_items.len()
        );
        elements
    }

    pub fn set_loader_text(&self, text: &str) {
        if let Some(el) = &self.loader_text {
            el.set_inner_text(text);
        }
    }

    /// Write `style` to whatever elements `effect` animates.
    pub fn apply(&self, effect: Entrance, style: &ElementStyle) {
        match effect {
            Entrance::LoaderSlideOut => self.loader.iter().for_each(|el| apply_style(el, style)),
            Entrance::HeaderReveal => self.header.iter().for_each(|el| apply_style(el, style)),
            Entrance::NewDropReveal => self.new_drop.iter().for_each(|el| apply_style(el, style)),
            Entrance::ContentReveal => self
                .content_items
                .iter()
                .for_each(|el| apply_style(el, style)),
            Entrance::ModelRise => {}
        }
    }
}
