mod utils;

pub mod color;
pub mod effects;
pub mod particle;
pub mod pointer;
pub mod renderer;
pub mod reveal;
pub mod system;

use wasm_bindgen::prelude::*;
use web_sys::{console, HtmlCanvasElement, Window};

use crate::renderer::Renderer;
use crate::system::ParticleSystem;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Touch hosts get stronger pointer attraction and lighter effect geometry
fn is_touch_device(window: &Window) -> bool {
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || window.navigator().max_touch_points() > 0
}

/// The animated particle backdrop behind the page. The embedding page owns
/// the event wiring and the `requestAnimationFrame` loop: it forwards
/// pointer events to the methods below and calls [`Backdrop::frame`] once
/// per animation frame.
#[wasm_bindgen]
pub struct Backdrop {
    system: ParticleSystem,
    renderer: Renderer,
}

#[wasm_bindgen]
impl Backdrop {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<Backdrop, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let is_touch = is_touch_device(&window);
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        let renderer = Renderer::new(canvas)?;
        renderer.resize(width, height);
        let mut rng = rand::thread_rng();
        let system = ParticleSystem::new(&mut rng, width, height, is_touch);
        Ok(Backdrop { system, renderer })
    }

    /// One animation-frame callback: update every particle, then redraw.
    /// Scheduling the next frame stays with the page.
    pub fn frame(&mut self) -> Result<(), JsValue> {
        let mut rng = rand::thread_rng();
        self.system.step(&mut rng);
        self.renderer.render(&self.system)
    }

    /// Viewport resize: resize the surface and rebuild the whole field
    /// against the new bounds.
    pub fn resized(&mut self, width: f64, height: f64) {
        let _timer = Timer::new("Backdrop::resized");
        self.renderer.resize(width, height);
        let mut rng = rand::thread_rng();
        self.system.resized(&mut rng, width, height);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.system.pointer.moved_to(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.system.pointer.cleared();
    }

    pub fn touch_moved(&mut self, x: f64, y: f64) {
        self.system.pointer.touch_moved(x, y, js_sys::Date::now());
    }

    pub fn touch_ended(&mut self) {
        self.system.pointer.cleared();
    }

    pub fn particle_count(&self) -> usize {
        self.system.particle_count()
    }
}
