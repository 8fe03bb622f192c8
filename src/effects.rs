// Decorative DOM effects driven by pointer activity: click ripple bursts,
// outward sparks, the cursor trail, and the pointer-following gradient
// overlay. Everything here is optional decoration: a page without the
// `.click-ripples` container or `.mouse-gradient` overlay gets no-ops.

use std::collections::VecDeque;
use std::f64::consts::PI;

use rand::Rng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

// Keyframes backing the ripple and spark animations, injected once per
// session so the host page does not have to ship them.
const EFFECT_KEYFRAMES: &str = r#"
    @keyframes rippleExpandCool {
        0% {
            transform: translate(-50%, -50%) scale(0);
            opacity: 0.8;
        }
        50% {
            opacity: 0.6;
        }
        100% {
            transform: translate(-50%, -50%) scale(3);
            opacity: 0;
        }
    }

    @keyframes particleExplode {
        0% {
            transform: translate(-50%, -50%) scale(1);
            opacity: 1;
        }
        100% {
            transform: translate(-50%, -50%) scale(0.5);
            opacity: 0;
        }
    }
"#;

const MAX_TRAIL_LENGTH: usize = 15;
const TRAIL_INTERVAL_MS: f64 = 16.0;
const TRAIL_LIFETIME_MS: i32 = 600;
const GRADIENT_TOUCH_INTERVAL_MS: f64 = 50.0;
const DRAG_SPARK_DISTANCE: f64 = 30.0;
const TOUCH_RIPPLE_EVERY: u32 = 30;

/// Session object owning all pointer-effect state, scoped to one page
/// load. The page forwards pointer, mouse-button, and touch events here.
#[wasm_bindgen]
pub struct EffectsSession {
    window: Window,
    document: Document,
    ripples: Option<Element>,
    gradient: Option<HtmlElement>,
    trail: VecDeque<HtmlElement>,
    last_trail_pos: [f64; 2],
    last_trail_spawn: f64,
    last_gradient_update: f64,
    drag_origin: Option<[f64; 2]>,
    touch_moves: u32,
}

#[wasm_bindgen]
impl EffectsSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<EffectsSession, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        install_keyframes(&document)?;
        let ripples = document.query_selector(".click-ripples")?;
        let gradient = document
            .query_selector(".mouse-gradient")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        Ok(EffectsSession {
            window,
            document,
            ripples,
            gradient,
            trail: VecDeque::with_capacity(MAX_TRAIL_LENGTH),
            last_trail_pos: [0.0, 0.0],
            last_trail_spawn: 0.0,
            last_gradient_update: 0.0,
            drag_origin: None,
            touch_moves: 0,
        })
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.update_gradient(x, y);
        self.spawn_trail_dot(x, y)?;
        if let Some(origin) = self.drag_origin {
            let travelled = ((x - origin[0]).powi(2) + (y - origin[1]).powi(2)).sqrt();
            if travelled > DRAG_SPARK_DISTANCE && rand::thread_rng().gen::<f64>() > 0.9 {
                self.burst(x, y, false)?;
            }
        }
        Ok(())
    }

    pub fn pointer_left(&mut self) {
        if let Some(gradient) = &self.gradient {
            let _ = gradient.class_list().remove_1("active");
        }
        // Removal timers are already pending from spawn; this only fades.
        for dot in self.trail.drain(..) {
            let style = dot.style();
            let _ = style.set_property("transition", "opacity 0.3s ease-out");
            let _ = style.set_property("opacity", "0");
        }
    }

    pub fn mouse_down(&mut self, x: f64, y: f64) {
        self.drag_origin = Some([x, y]);
    }

    pub fn mouse_up(&mut self) {
        self.drag_origin = None;
    }

    pub fn clicked(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.burst(x, y, false)
    }

    pub fn touch_started(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.burst(x, y, true)
    }

    pub fn touch_moved(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let now = js_sys::Date::now();
        if now - self.last_gradient_update >= GRADIENT_TOUCH_INTERVAL_MS {
            self.last_gradient_update = now;
            self.update_gradient(x, y);
        }
        self.touch_moves += 1;
        if self.touch_moves % TOUCH_RIPPLE_EVERY == 0 {
            self.touch_ripple(x, y)?;
        }
        Ok(())
    }

    // Repaints the overlay's radial gradient at the pointer, in viewport
    // percent so the overlay itself can stay full-size.
    fn update_gradient(&self, x: f64, y: f64) {
        let gradient = match &self.gradient {
            Some(el) => el,
            None => return,
        };
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(1.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(1.0);
        let background = format!(
            "radial-gradient(circle at {}% {}%, rgba(50, 80, 120, 0.3) 0%, transparent 60%)",
            x / width * 100.0,
            y / height * 100.0
        );
        let _ = gradient.style().set_property("background", &background);
        let _ = gradient.class_list().add_1("active");
    }

    // One dot per throttled move, sized and faded by travel distance so
    // fast sweeps leave a brighter, wider wake.
    fn spawn_trail_dot(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let now = js_sys::Date::now();
        if now - self.last_trail_spawn < TRAIL_INTERVAL_MS {
            return Ok(());
        }
        self.last_trail_spawn = now;

        let body = match self.document.body() {
            Some(body) => body,
            None => return Ok(()),
        };
        let travelled = ((x - self.last_trail_pos[0]).powi(2)
            + (y - self.last_trail_pos[1]).powi(2))
        .sqrt();
        let size = (travelled * 0.08).max(3.0).min(6.0);
        let opacity = (travelled * 0.012).max(0.3).min(0.7);
        let css = format!(
            "position: fixed; width: {}px; height: {}px; \
             background: radial-gradient(circle, rgba(150, 200, 255, {}) 0%, \
             rgba(150, 200, 255, {}) 50%, transparent 100%); \
             border-radius: 50%; pointer-events: none; z-index: 9999; \
             left: {}px; top: {}px; transform: translate(-50%, -50%); \
             box-shadow: 0 0 {}px rgba(150, 200, 255, {});",
            size,
            size,
            opacity,
            opacity * 0.4,
            x,
            y,
            size * 2.0,
            opacity * 0.6
        );
        let dot = spawn_transient(&self.window, &self.document, &body, &css, TRAIL_LIFETIME_MS)?;
        // The fade starts a beat after spawn; removal stays with the single
        // timer scheduled by spawn_transient.
        schedule_style(
            &self.window,
            &dot,
            100,
            &[
                ("transition", "opacity 0.5s ease-out, transform 0.5s ease-out"),
                ("opacity", "0"),
                ("transform", "translate(-50%, -50%) scale(0.2)"),
            ],
        )?;

        self.trail.push_back(dot);
        if self.trail.len() > MAX_TRAIL_LENGTH {
            if let Some(oldest) = self.trail.pop_front() {
                let style = oldest.style();
                let _ = style.set_property(
                    "transition",
                    "opacity 0.4s ease-out, transform 0.4s ease-out",
                );
                let _ = style.set_property("opacity", "0");
                let _ = style.set_property("transform", "translate(-50%, -50%) scale(0.3)");
            }
        }
        self.last_trail_pos = [x, y];
        Ok(())
    }

    // Expanding rings plus outward sparks; touch input gets a single
    // smaller, fainter ring and no sparks.
    fn burst(&self, x: f64, y: f64, is_touch: bool) -> Result<(), JsValue> {
        let container = match &self.ripples {
            Some(el) => el,
            None => return Ok(()),
        };
        let (ring_count, spark_count) = if is_touch { (1, 0) } else { (2, 4) };
        let opacity_mul = if is_touch { 0.4 } else { 1.0 };
        let size_mul = if is_touch { 0.7 } else { 1.0 };

        for i in 0..ring_count {
            let delay = i as f64 * 0.1;
            let duration = 0.5 + i as f64 * 0.1;
            let size = (50.0 + i as f64 * 25.0) * size_mul;
            let css = format!(
                "position: absolute; left: {}px; top: {}px; \
                 width: {}px; height: {}px; border-radius: 50%; \
                 border: 1.5px solid rgba(150, 200, 255, {}); \
                 transform: translate(-50%, -50%) scale(0); pointer-events: none; \
                 animation: rippleExpandCool {}s ease-out {}s forwards; \
                 box-shadow: 0 0 {}px rgba(150, 200, 255, {});",
                x,
                y,
                size,
                size,
                (0.4 - i as f64 * 0.1) * opacity_mul,
                duration,
                delay,
                (12.0 + i as f64 * 4.0) * size_mul,
                (0.25 - i as f64 * 0.06) * opacity_mul
            );
            let lifetime = ((duration + delay) * 1000.0) as i32;
            spawn_transient(&self.window, &self.document, container, &css, lifetime)?;
        }

        let mut rng = rand::thread_rng();
        for i in 0..spark_count {
            let angle = PI * 2.0 / spark_count as f64 * i as f64;
            let distance = 30.0 + rng.gen::<f64>() * 20.0;
            let css = format!(
                "position: absolute; left: {}px; top: {}px; width: 3px; height: 3px; \
                 background: radial-gradient(circle, rgba(150, 200, 255, 0.7), transparent); \
                 border-radius: 50%; transform: translate(-50%, -50%); pointer-events: none; \
                 animation: particleExplode 0.6s ease-out forwards; \
                 box-shadow: 0 0 6px rgba(150, 200, 255, 0.6);",
                x, y
            );
            let spark = spawn_transient(&self.window, &self.document, container, &css, 700)?;
            // eased flight outward, a beat after the node is attached
            let final_left = format!("{}px", x + angle.cos() * distance);
            let final_top = format!("{}px", y + angle.sin() * distance);
            schedule_style(
                &self.window,
                &spark,
                10,
                &[
                    ("transition", "all 0.6s cubic-bezier(0.4, 0, 0.2, 1)"),
                    ("left", &final_left),
                    ("top", &final_top),
                    ("opacity", "0"),
                    ("transform", "translate(-50%, -50%) scale(0)"),
                ],
            )?;
        }
        Ok(())
    }

    fn touch_ripple(&self, x: f64, y: f64) -> Result<(), JsValue> {
        let container = match &self.ripples {
            Some(el) => el,
            None => return Ok(()),
        };
        let css = format!(
            "position: absolute; left: {}px; top: {}px; width: 40px; height: 40px; \
             border-radius: 50%; border: 1px solid rgba(150, 200, 255, 0.2); \
             transform: translate(-50%, -50%) scale(0); pointer-events: none; \
             animation: rippleExpandCool 0.4s ease-out forwards; \
             box-shadow: 0 0 8px rgba(150, 200, 255, 0.15);",
            x, y
        );
        spawn_transient(&self.window, &self.document, container, &css, 400)?;
        Ok(())
    }
}

fn install_keyframes(document: &Document) -> Result<(), JsValue> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(EFFECT_KEYFRAMES));
    let head = document.head().ok_or("no document head")?;
    head.append_child(&style)?;
    Ok(())
}

// Appends a transient effect node and schedules its one and only removal.
// Early fades elsewhere are style-only, so a node can never collect a
// second removal timer.
fn spawn_transient(
    window: &Window,
    document: &Document,
    parent: &Element,
    css: &str,
    lifetime_ms: i32,
) -> Result<HtmlElement, JsValue> {
    let node = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    node.style().set_css_text(css);
    parent.append_child(&node)?;
    let handle = node.clone();
    let remove = Closure::once_into_js(move || handle.remove());
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        remove.unchecked_ref(),
        lifetime_ms,
    )?;
    Ok(node)
}

fn schedule_style(
    window: &Window,
    element: &HtmlElement,
    delay_ms: i32,
    properties: &[(&str, &str)],
) -> Result<(), JsValue> {
    let element = element.clone();
    let properties: Vec<(String, String)> = properties
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    let apply = Closure::once_into_js(move || {
        let style = element.style();
        for (key, value) in &properties {
            let _ = style.set_property(key, value);
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(apply.unchecked_ref(), delay_ms)?;
    Ok(())
}
