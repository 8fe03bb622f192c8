// Single backdrop particle: position, velocity, and the visual parameters
// fixed at spawn (radius, color, base opacity, twinkle phase).

use crate::color::Hsla;
use crate::pointer::Pointer;
use rand::Rng;
use vecmath::Vector2;

pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub color: Hsla,
    pub base_opacity: f64,
    pub opacity: f64,
    twinkle_speed: f64,
    twinkle_offset: f64,
}

impl Particle {
    pub const ATTRACT_RADIUS: f64 = 200.0;
    pub const MAX_SPEED_ACTIVE: f64 = 2.0;
    pub const MAX_SPEED_IDLE: f64 = 1.5;
    const JITTER_FORCE: f64 = 0.02;
    const DISPERSION_FORCE: f64 = 0.001;
    const MOUSE_ATTRACT_FORCE: f64 = 0.005;
    const TOUCH_ATTRACT_FORCE: f64 = 0.006;
    const DAMPING_ACTIVE: f64 = 0.995;
    const DAMPING_IDLE: f64 = 0.992;

    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64) -> Particle {
        let base_opacity = rng.gen::<f64>() * 0.6 + 0.3;
        Particle {
            pos: [rng.gen::<f64>() * width, rng.gen::<f64>() * height],
            vel: [
                (rng.gen::<f64>() - 0.5) * 0.3,
                (rng.gen::<f64>() - 0.5) * 0.3,
            ],
            radius: rng.gen::<f64>() * 2.0 + 0.5,
            // narrow cool-blue palette
            color: Hsla::new(
                rng.gen::<f64>() * 30.0 + 200.0,
                rng.gen::<f64>() * 30.0 + 20.0,
                rng.gen::<f64>() * 30.0 + 70.0,
            ),
            base_opacity,
            opacity: base_opacity,
            twinkle_speed: rng.gen::<f64>() * 0.02 + 0.01,
            twinkle_offset: rng.gen::<f64>() * std::f64::consts::PI * 2.0,
        }
    }

    /// Advances the particle one frame against the current pointer state.
    /// `drift` is the system-wide ambient sway, applied to position directly.
    pub fn update<R: Rng>(
        &mut self,
        rng: &mut R,
        pointer: &Pointer,
        time: f64,
        drift: Vector2<f64>,
        width: f64,
        height: f64,
    ) {
        self.vel[0] += (rng.gen::<f64>() - 0.5) * Self::JITTER_FORCE;
        self.vel[1] += (rng.gen::<f64>() - 0.5) * Self::JITTER_FORCE;
        self.pos = vecmath::vec2_add(
            self.pos,
            vecmath::vec2_add(self.vel, vecmath::vec2_scale(drift, 0.1)),
        );

        if pointer.active {
            let to_pointer = vecmath::vec2_sub(pointer.pos, self.pos);
            let distance = vecmath::vec2_len(to_pointer);
            if distance < Self::ATTRACT_RADIUS && distance > 0.0 {
                let base_force = if pointer.is_touch {
                    Self::TOUCH_ATTRACT_FORCE
                } else {
                    Self::MOUSE_ATTRACT_FORCE
                };
                let force = (Self::ATTRACT_RADIUS - distance) / Self::ATTRACT_RADIUS * base_force;
                let attract_dir = vecmath::vec2_normalized(to_pointer);
                self.vel = vecmath::vec2_add(self.vel, vecmath::vec2_scale(attract_dir, force));
                let color_intensity = 1.0 - (distance / Self::ATTRACT_RADIUS) * 0.4;
                self.opacity = self.base_opacity * (1.0 + color_intensity * 0.6);
            } else {
                self.opacity = self.base_opacity;
            }
        } else {
            self.opacity = self.base_opacity;
            self.vel[0] += (rng.gen::<f64>() - 0.5) * Self::DISPERSION_FORCE;
            self.vel[1] += (rng.gen::<f64>() - 0.5) * Self::DISPERSION_FORCE;
        }

        let twinkle = (time * self.twinkle_speed + self.twinkle_offset).sin() * 0.2 + 0.8;
        self.opacity *= twinkle;

        let damping = if pointer.active {
            Self::DAMPING_ACTIVE
        } else {
            Self::DAMPING_IDLE
        };
        self.vel = vecmath::vec2_scale(self.vel, damping);

        let max_speed = if pointer.active {
            Self::MAX_SPEED_ACTIVE
        } else {
            Self::MAX_SPEED_IDLE
        };
        let speed = vecmath::vec2_len(self.vel);
        if speed > max_speed {
            self.vel = vecmath::vec2_scale(self.vel, max_speed / speed);
        }

        // Bounce checks the post-integration position and only flips the
        // velocity sign: a fast particle may sit out of bounds for a frame
        // before the flipped velocity carries it back in.
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
        }
    }
}
