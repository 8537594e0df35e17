//! Garden snapshot export
//!
//! Rasterizes the editor surface into a PNG: the resolved background
//! fill, then one circular marker per placed plant with its scale,
//! rotation notch, and a ring around the selection. Entries whose plant
//! id is unknown to the catalog are skipped silently, matching how the
//! live surface renders them.

use png::{BitDepth, ColorType, Encoder};

use crate::catalog::PlantCatalog;

use super::editor::GardenEditor;
use super::layout::PLACEMENT_MARGIN;

/// Base marker radius at scale 1.0, in pixels
const MARKER_RADIUS: f64 = 40.0;

/// Marker colors cycled per plant id
const MARKER_PALETTE: [[u8; 3]; 6] = [
    [0x4a, 0x7c, 0x3a], // leaf green
    [0x8a, 0xb1, 0x7c], // light green
    [0x2f, 0x5d, 0x2f], // dark green
    [0xb8, 0x86, 0x3b], // herbal brown
    [0xc9, 0xb4, 0x58], // herbal yellow
    [0x9a, 0x7b, 0xc4], // lavender
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid background color '{0}'")]
    InvalidColor(String),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Parse a `#rrggbb` hex fill
fn parse_hex(color: &str) -> Result<[u8; 3], ExportError> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ExportError::InvalidColor(color.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ExportError::InvalidColor(color.to_string()))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

fn marker_color(plant_id: &str) -> [u8; 3] {
    let hash = plant_id.bytes().fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    MARKER_PALETTE[hash % MARKER_PALETTE.len()]
}

struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn filled(width: u32, height: u32, fill: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[fill[0], fill[1], fill[2], 0xff]);
        }
        Canvas { width, height, pixels }
    }

    fn put(&mut self, x: i64, y: i64, color: [u8; 3]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[idx] = color[0];
        self.pixels[idx + 1] = color[1];
        self.pixels[idx + 2] = color[2];
    }

    fn disc(&mut self, cx: f64, cy: f64, radius: f64, color: [u8; 3]) {
        if radius <= 0.0 {
            return;
        }
        let r = radius.ceil() as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f64).sqrt() <= radius {
                    self.put(cx as i64 + dx, cy as i64 + dy, color);
                }
            }
        }
    }

    fn ring(&mut self, cx: f64, cy: f64, radius: f64, width: f64, color: [u8; 3]) {
        if radius <= 0.0 {
            return;
        }
        let r = (radius + width).ceil() as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                let dist = ((dx * dx + dy * dy) as f64).sqrt();
                if dist >= radius && dist <= radius + width {
                    self.put(cx as i64 + dx, cy as i64 + dy, color);
                }
            }
        }
    }

    /// Line from the center towards `angle_deg`, used as a rotation notch
    fn notch(&mut self, cx: f64, cy: f64, length: f64, angle_deg: i32, color: [u8; 3]) {
        if length <= 0.0 {
            return;
        }
        let angle = (angle_deg as f64).to_radians();
        let (dx, dy) = (angle.sin(), -angle.cos());
        let steps = length.ceil() as i64;
        for step in 0..=steps {
            let t = step as f64;
            self.put((cx + dx * t) as i64, (cy + dy * t) as i64, color);
        }
    }

    fn encode(self) -> Result<Vec<u8>, ExportError> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
        }
        Ok(out)
    }
}

/// Render the current editor surface to PNG bytes
pub fn render_snapshot(editor: &GardenEditor, catalog: &PlantCatalog) -> Result<Vec<u8>, ExportError> {
    let surface = editor.surface();
    let fill = parse_hex(editor.background_fill())?;
    let mut canvas = Canvas::filled(surface.width as u32, surface.height as u32, fill);

    let anchor = PLACEMENT_MARGIN / 2.0;
    for entry in editor.placed() {
        // Unknown catalog ids never make it onto the surface
        if catalog.get(&entry.plant_id).is_none() {
            continue;
        }

        let cx = entry.x + anchor;
        let cy = entry.y + anchor;
        let radius = MARKER_RADIUS * entry.scale;
        let color = marker_color(&entry.plant_id);

        canvas.disc(cx, cy, radius, color);
        canvas.notch(cx, cy, radius, entry.rotation, [0xff, 0xff, 0xff]);

        if editor.selection() == Some(entry.id.as_str()) {
            canvas.ring(cx, cy, radius + 4.0, 3.0, [0x3b, 0x5d, 0x3b]);
        }
    }

    canvas.encode()
}
