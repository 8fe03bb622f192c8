//! Browser smoke tests for the wasm-facing API, run with `wasm-pack test`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use nightfield::effects::EffectsSession;
use nightfield::reveal::Reveals;
use nightfield::system::ParticleSystem;
use nightfield::Backdrop;

wasm_bindgen_test_configure!(run_in_browser);

fn test_canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn backdrop_reseeds_from_the_sizing_policy() {
    let mut backdrop = Backdrop::new(test_canvas()).unwrap();
    backdrop.resized(1024.0, 768.0);
    assert_eq!(
        backdrop.particle_count(),
        ParticleSystem::particle_count_for(1024.0, 768.0)
    );
    assert_eq!(backdrop.particle_count(), 52);
}

#[wasm_bindgen_test]
fn backdrop_runs_frames_through_pointer_transitions() {
    let mut backdrop = Backdrop::new(test_canvas()).unwrap();
    backdrop.frame().unwrap();
    backdrop.pointer_moved(120.0, 80.0);
    backdrop.frame().unwrap();
    backdrop.touch_moved(130.0, 90.0);
    backdrop.frame().unwrap();
    backdrop.pointer_left();
    backdrop.frame().unwrap();
}

#[wasm_bindgen_test]
fn effects_tolerate_a_page_without_containers() {
    let mut effects = EffectsSession::new().unwrap();
    effects.clicked(50.0, 60.0).unwrap();
    effects.touch_started(50.0, 60.0).unwrap();
    effects.pointer_moved(10.0, 10.0).unwrap();
    effects.mouse_down(10.0, 10.0);
    effects.pointer_moved(80.0, 80.0).unwrap();
    effects.mouse_up();
    effects.pointer_left();
}

#[wasm_bindgen_test]
fn reveals_construct_and_debounce_without_targets() {
    let mut reveals = Reveals::new().unwrap();
    reveals.scroll_changed().unwrap();
    reveals.scroll_changed().unwrap();
}
