// Owns the particle field: viewport-area seeding, the fixed-step clock,
// ambient drift, and the pairwise proximity links between particles.

use crate::particle::Particle;
use crate::pointer::Pointer;
use rand::Rng;
use vecmath::Vector2;

pub struct ParticleSystem {
    particles: Vec<Particle>,
    pub pointer: Pointer,
    time: f64,
    width: f64,
    height: f64,
}

/// Style of one connective line between two particles.
pub struct Link {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub opacity: f64,
    pub hue: f64,
    pub width: f64,
}

impl ParticleSystem {
    // Fixed step per frame callback, not wall-clock derived: perceived
    // speed tracks the host's real refresh rate.
    pub const TIME_STEP: f64 = 0.016;
    pub const LINK_RADIUS: f64 = 180.0;
    pub const POINTER_REACH: f64 = 250.0;
    const MIN_LINK_OPACITY: f64 = 0.05;
    const SMALL_VIEWPORT_WIDTH: f64 = 768.0;
    const SMALL_VIEWPORT_DIVISOR: f64 = 20_000.0;
    const LARGE_VIEWPORT_DIVISOR: f64 = 15_000.0;
    const MIN_PARTICLES: usize = 20;
    const MAX_PARTICLES: usize = 100;

    pub fn new<R: Rng>(rng: &mut R, width: f64, height: f64, is_touch: bool) -> ParticleSystem {
        let mut system = ParticleSystem {
            particles: Vec::new(),
            pointer: Pointer::new(width, height, is_touch),
            time: 0.0,
            width,
            height,
        };
        system.reseed(rng);
        system
    }

    /// Sparser field on small viewports, clamped so the backdrop never
    /// empties out and the pairwise link scan stays bounded.
    pub fn particle_count_for(width: f64, height: f64) -> usize {
        let divisor = if width < Self::SMALL_VIEWPORT_WIDTH {
            Self::SMALL_VIEWPORT_DIVISOR
        } else {
            Self::LARGE_VIEWPORT_DIVISOR
        };
        let count = (width * height / divisor).floor() as usize;
        count.max(Self::MIN_PARTICLES).min(Self::MAX_PARTICLES)
    }

    pub fn resized<R: Rng>(&mut self, rng: &mut R, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.reseed(rng);
    }

    // The whole field is rebuilt; no particle identity survives a resize
    fn reseed<R: Rng>(&mut self, rng: &mut R) {
        let count = Self::particle_count_for(self.width, self.height);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::spawn(rng, self.width, self.height));
        }
    }

    /// One frame: advance the clock, derive the shared drift vector, and
    /// update every particle against the current pointer state.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        self.time += Self::TIME_STEP;
        let drift = ambient_drift(self.time);
        for particle in &mut self.particles {
            particle.update(
                rng,
                &self.pointer,
                self.time,
                drift,
                self.width,
                self.height,
            );
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

/// Slow system-wide sway applied uniformly to the whole field, independent
/// of pointer state and per-particle jitter.
pub fn ambient_drift(time: f64) -> Vector2<f64> {
    [(time * 0.1).sin() * 0.2, (time * 0.1).cos() * 0.2]
}

/// Connective line between an unordered particle pair, or `None` when the
/// pair is too far apart or the line would be too faint to bother drawing.
pub fn link_between(a: &Particle, b: &Particle, pointer: &Pointer) -> Option<Link> {
    let distance = vecmath::vec2_len(vecmath::vec2_sub(a.pos, b.pos));
    if distance >= ParticleSystem::LINK_RADIUS {
        return None;
    }

    let midpoint = [
        (a.pos[0] + b.pos[0]) / 2.0,
        (a.pos[1] + b.pos[1]) / 2.0,
    ];
    // Hue and width track the last known pointer position even while the
    // pointer is inactive; only the opacity boost requires it active.
    let influence = pointer.influence_at(midpoint, ParticleSystem::POINTER_REACH);
    let base = 0.12 * (1.0 - distance / ParticleSystem::LINK_RADIUS);
    let opacity = if pointer.active {
        (base + influence * 0.25).min(0.5)
    } else {
        (base * 0.6).min(0.2)
    };
    if opacity <= ParticleSystem::MIN_LINK_OPACITY {
        return None;
    }

    Some(Link {
        from: a.pos,
        to: b.pos,
        opacity,
        hue: 200.0 + influence * 30.0,
        width: 0.3 + influence * 0.7,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle_at(x: f64, y: f64) -> Particle {
        let mut rng = StdRng::seed_from_u64(1);
        let mut particle = Particle::spawn(&mut rng, 800.0, 600.0);
        particle.pos = [x, y];
        particle
    }

    #[test]
    fn sizing_uses_the_large_viewport_divisor() {
        // 786432 / 15000 floors to 52
        assert_eq!(ParticleSystem::particle_count_for(1024.0, 768.0), 52);
    }

    #[test]
    fn sizing_floors_small_viewports_to_the_minimum() {
        // 153600 / 20000 floors to 7, clamped up to 20
        assert_eq!(ParticleSystem::particle_count_for(320.0, 480.0), 20);
    }

    #[test]
    fn sizing_caps_huge_viewports() {
        assert_eq!(ParticleSystem::particle_count_for(3840.0, 2160.0), 100);
    }

    #[test]
    fn sizing_is_idempotent() {
        let first = ParticleSystem::particle_count_for(1440.0, 900.0);
        let second = ParticleSystem::particle_count_for(1440.0, 900.0);
        assert_eq!(first, second);
    }

    #[test]
    fn resize_discards_and_reseeds_the_field() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut system = ParticleSystem::new(&mut rng, 1024.0, 768.0, false);
        assert_eq!(system.particle_count(), 52);
        system.resized(&mut rng, 320.0, 480.0);
        assert_eq!(system.particle_count(), 20);
    }

    #[test]
    fn step_advances_the_fixed_clock() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut system = ParticleSystem::new(&mut rng, 800.0, 600.0, false);
        system.step(&mut rng);
        system.step(&mut rng);
        assert!((system.time() - 2.0 * ParticleSystem::TIME_STEP).abs() < 1e-12);
    }

    #[test]
    fn ambient_drift_starts_on_the_cosine_axis() {
        let drift = ambient_drift(0.0);
        assert_eq!(drift[0], 0.0);
        assert!((drift[1] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn faint_idle_link_is_culled() {
        // 90 apart, idle pointer far away: 0.12 * 0.5 * 0.6 = 0.036 < 0.05
        let a = particle_at(0.0, 0.0);
        let b = particle_at(90.0, 0.0);
        let mut pointer = Pointer::new(800.0, 600.0, false);
        pointer.moved_to(10_000.0, 10_000.0);
        pointer.cleared();
        assert!(link_between(&a, &b, &pointer).is_none());
    }

    #[test]
    fn distant_pair_never_links() {
        let a = particle_at(0.0, 0.0);
        let b = particle_at(ParticleSystem::LINK_RADIUS, 0.0);
        let mut pointer = Pointer::new(800.0, 600.0, false);
        pointer.moved_to(90.0, 0.0);
        assert!(link_between(&a, &b, &pointer).is_none());
    }

    #[test]
    fn active_pointer_on_the_midpoint_boosts_and_tints_the_link() {
        let a = particle_at(0.0, 0.0);
        let b = particle_at(50.0, 0.0);
        let mut pointer = Pointer::new(800.0, 600.0, false);
        pointer.moved_to(25.0, 0.0);
        let link = link_between(&a, &b, &pointer).unwrap();
        let base = 0.12 * (1.0 - 50.0 / 180.0);
        assert!((link.opacity - (base + 0.25)).abs() < 1e-12);
        assert!((link.hue - 230.0).abs() < 1e-12);
        assert!((link.width - 1.0).abs() < 1e-12);
    }

    #[test]
    fn idle_link_opacity_is_scaled_and_capped() {
        let a = particle_at(0.0, 0.0);
        let b = particle_at(10.0, 0.0);
        let mut pointer = Pointer::new(800.0, 600.0, false);
        pointer.moved_to(5.0, 0.0);
        pointer.cleared();
        let link = link_between(&a, &b, &pointer).unwrap();
        let base: f64 = 0.12 * (1.0 - 10.0 / 180.0);
        assert!((link.opacity - (base * 0.6).min(0.2)).abs() < 1e-12);
        // hue still follows the last known pointer position
        assert!((link.hue - 230.0).abs() < 1e-12);
    }

    #[test]
    fn boosted_link_opacity_is_capped_at_half() {
        let a = particle_at(100.0, 100.0);
        let b = particle_at(101.0, 100.0);
        let mut pointer = Pointer::new(800.0, 600.0, false);
        pointer.moved_to(100.5, 100.0);
        let link = link_between(&a, &b, &pointer).unwrap();
        assert!(link.opacity <= 0.5);
    }
}
