// Simple HSL color struct; every fade in the backdrop is opacity-only,
// so the hue triple is fixed per particle and alpha is supplied at draw time.
#[derive(Copy, Clone)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsla {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Hsla {
        Hsla {
            hue,
            saturation,
            lightness,
        }
    }

    // CSS color string for canvas fill and stroke styles
    pub fn css(&self, alpha: f64) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, alpha
        )
    }
}
