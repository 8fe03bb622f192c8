// Renderer struct that owns the canvas and its 2d context, clears the
// surface each frame, and draws particles as a soft radial glow behind a
// solid core plus the proximity links between nearby pairs.

use crate::particle::Particle;
use crate::system::{self, Link, ParticleSystem};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct Renderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Renderer, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or("canvas did not yield a 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Renderer { canvas, context })
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    pub fn clear(&self) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    /// Full draw pass: clear, every particle, then the pairwise link scan.
    /// The scan is O(n²) but the field is capped at 100 particles.
    pub fn render(&self, system: &ParticleSystem) -> Result<(), JsValue> {
        self.clear();
        let particles = system.particles();
        for particle in particles {
            self.draw_particle(particle)?;
        }
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                if let Some(link) =
                    system::link_between(&particles[i], &particles[j], &system.pointer)
                {
                    self.draw_link(&link);
                }
            }
        }
        Ok(())
    }

    // Two layers sharing one color: a three-stop gradient glow over three
    // times the radius, then the solid disc at the computed opacity.
    fn draw_particle(&self, particle: &Particle) -> Result<(), JsValue> {
        let [x, y] = particle.pos;
        let glow_radius = particle.radius * 3.0;
        let glow = self
            .context
            .create_radial_gradient(x, y, 0.0, x, y, glow_radius)?;
        glow.add_color_stop(0.0, &particle.color.css(particle.opacity))?;
        glow.add_color_stop(0.5, &particle.color.css(particle.opacity * 0.5))?;
        glow.add_color_stop(1.0, &particle.color.css(0.0))?;
        self.context.set_fill_style(&glow);
        self.context.fill_rect(
            x - glow_radius,
            y - glow_radius,
            glow_radius * 2.0,
            glow_radius * 2.0,
        );

        self.context.begin_path();
        self.context
            .arc(x, y, particle.radius, 0.0, std::f64::consts::PI * 2.0)?;
        self.context
            .set_fill_style(&JsValue::from_str(&particle.color.css(particle.opacity)));
        self.context.fill();
        Ok(())
    }

    fn draw_link(&self, link: &Link) {
        self.context.begin_path();
        self.context.move_to(link.from[0], link.from[1]);
        self.context.line_to(link.to[0], link.to[1]);
        self.context.set_stroke_style(&JsValue::from_str(&format!(
            "hsla({}, 50%, 80%, {})",
            link.hue, link.opacity
        )));
        self.context.set_line_width(link.width);
        self.context.stroke();
    }
}
