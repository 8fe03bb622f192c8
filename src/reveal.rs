// Scroll-driven view transition plus fade-in reveals for page sections.
// Every target element is optional; a page without them gets a no-op
// session.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

const SCROLL_THRESHOLD: f64 = 100.0;
const SCROLL_DEBOUNCE_MS: i32 = 50;
const VIEW_SETTLE_MS: i32 = 500;
const REVEAL_THRESHOLD: f64 = 0.2;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Watches scroll position and element visibility: `.fade-in` elements get
/// the `visible` class once they intersect the viewport, and scrolling past
/// the threshold swaps `.initial-view` for `.scroll-error-code`.
#[wasm_bindgen]
pub struct Reveals {
    window: Window,
    document: Document,
    observer: IntersectionObserver,
    _on_intersect: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    scrolled: Rc<Cell<bool>>,
    pending: Option<i32>,
}

#[wasm_bindgen]
impl Reveals {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Reveals, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let on_intersect = Closure::wrap(Box::new(
            |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = match entry.dyn_into() {
                        Ok(entry) => entry,
                        Err(_) => continue,
                    };
                    if entry.is_intersecting() {
                        let _ = entry.target().class_list().add_1("visible");
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let mut options = IntersectionObserverInit::new();
        options.threshold(&JsValue::from(REVEAL_THRESHOLD));
        options.root_margin(REVEAL_ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;

        let targets = document.query_selector_all(".fade-in")?;
        for index in 0..targets.length() {
            if let Some(node) = targets.item(index) {
                if let Some(element) = node.dyn_ref::<Element>() {
                    observer.observe(element);
                }
            }
        }

        Ok(Reveals {
            window,
            document,
            observer,
            _on_intersect: on_intersect,
            scrolled: Rc::new(Cell::new(false)),
            pending: None,
        })
    }

    /// Debounced scroll handler: only the last event in a burst takes
    /// effect, 50 ms after the burst goes quiet.
    pub fn scroll_changed(&mut self) -> Result<(), JsValue> {
        if let Some(id) = self.pending.take() {
            self.window.clear_timeout_with_handle(id);
        }
        let window = self.window.clone();
        let document = self.document.clone();
        let scrolled = Rc::clone(&self.scrolled);
        let apply =
            Closure::once_into_js(move || apply_view_transition(&window, &document, &scrolled));
        let id = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            apply.unchecked_ref(),
            SCROLL_DEBOUNCE_MS,
        )?;
        self.pending = Some(id);
        Ok(())
    }
}

impl Drop for Reveals {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn styled(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn apply_view_transition(window: &Window, document: &Document, scrolled: &Cell<bool>) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let initial_view = styled(document, ".initial-view");
    let scroll_hint = styled(document, ".scroll-hint");
    let error_code = styled(document, ".scroll-error-code");

    if scroll_y > SCROLL_THRESHOLD && !scrolled.get() {
        scrolled.set(true);
        if let Some(view) = initial_view {
            let style = view.style();
            let _ = style.set_property("transition", "opacity 0.5s ease-out");
            let _ = style.set_property("opacity", "0");
            if let Some(hint) = &scroll_hint {
                let _ = hint.style().set_property("opacity", "0");
            }
            // Hide for real once the fade has run, unless the view was
            // restored in the meantime.
            let settle = Closure::once_into_js(move || {
                if view.style().get_property_value("opacity").ok().as_deref() == Some("0") {
                    let _ = view.style().set_property("display", "none");
                    if let Some(code) = error_code {
                        let _ = code.class_list().add_1("visible");
                    }
                }
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                settle.unchecked_ref(),
                VIEW_SETTLE_MS,
            );
        }
    } else if scroll_y <= SCROLL_THRESHOLD && scrolled.get() {
        scrolled.set(false);
        if let Some(view) = initial_view {
            let style = view.style();
            let _ = style.set_property("display", "flex");
            let _ = style.set_property("transition", "opacity 0.3s ease-out");
            let _ = style.set_property("opacity", "1");
        }
        if let Some(hint) = scroll_hint {
            let _ = hint.style().set_property("opacity", "1");
        }
        if let Some(code) = error_code {
            let _ = code.class_list().remove_1("visible");
        }
    }
}
