use crate::constants::MIN_VIEWPORT_EXTENT;

/// Size of the host container in CSS pixels plus the effective pixel
/// density. Degenerate sizes are clamped so the aspect ratio is always
/// defined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub width: u32,
    pub height: u32,
    pub pixel_density: f32,
    pub max_pixel_density: f32,
}

impl ViewportState {
    pub fn new(width: f64, height: f64, pixel_density: f64, max_pixel_density: f32) -> Self {
        let mut v = Self {
            width: MIN_VIEWPORT_EXTENT,
            height: MIN_VIEWPORT_EXTENT,
            pixel_density: 1.0,
            max_pixel_density: if max_pixel_density.is_finite() && max_pixel_density > 0.0 {
                max_pixel_density
            } else {
                1.0
            },
        };
        v.resize(width, height, pixel_density);
        v
    }

    /// Apply a new size. Returns `true` when anything observable changed,
    /// so repeated calls with the same arguments are no-ops.
    pub fn resize(&mut self, width: f64, height: f64, pixel_density: f64) -> bool {
        let next = Self {
            width: clamp_extent(width),
            height: clamp_extent(height),
            pixel_density: self.cap_density(pixel_density),
            max_pixel_density: self.max_pixel_density,
        };
        let changed = next != *self;
        *self = next;
        changed
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Backing-store size of the drawing surface in physical pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_density).round() as u32).max(MIN_VIEWPORT_EXTENT);
        (scale(self.width), scale(self.height))
    }

    fn cap_density(&self, density: f64) -> f32 {
        let d = density as f32;
        if d.is_finite() && d > 0.0 {
            d.min(self.max_pixel_density)
        } else {
            1.0_f32.min(self.max_pixel_density)
        }
    }
}

fn clamp_extent(v: f64) -> u32 {
    if v.is_finite() {
        (v.round().min(u32::MAX as f64) as u32).max(MIN_VIEWPORT_EXTENT)
    } else {
        MIN_VIEWPORT_EXTENT
    }
}

/// Last pointer sample in normalized device coordinates, both axes in
/// [-1, 1] with +y up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn new(x: f32, y: f32) -> Self {
        let norm = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self {
            x: norm(x),
            y: norm(y),
        }
    }

    /// Normalize client coordinates against the window size.
    pub fn from_client(client_x: f64, client_y: f64, window_width: f64, window_height: f64) -> Self {
        if !(window_width > 0.0 && window_height > 0.0) {
            return Self::default();
        }
        let x = client_x / window_width * 2.0 - 1.0;
        let y = -(client_y / window_height * 2.0 - 1.0);
        Self::new(x as f32, y as f32)
    }
}
