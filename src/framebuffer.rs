/// display width in pixels
pub const DISPLAY_WIDTH: usize = 64;

/// display height in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// The 64x32 monochrome framebuffer. One byte per pixel, 0 or 1, row-major
/// (`x + y * 64`), plus a dirty flag the host consumes.
#[derive(Debug)]
pub struct FrameBuffer {
    pixels: [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT],
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    /// blank the whole screen (00E0)
    pub fn clear(&mut self) {
        self.pixels = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XOR a sprite onto the screen and report collision (DXYN).
    ///
    /// The origin wraps modulo the grid, so (68, 35) draws at (4, 3). Rows
    /// and columns running past the right or bottom edge are clipped, not
    /// wrapped. Returns 1 if any target pixel was already lit, else 0.
    /// Marks the buffer dirty whether or not any pixel changed.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> u8 {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = 0;

        for (row, bits) in rows.iter().enumerate() {
            let py = origin_y + row;
            if py >= DISPLAY_HEIGHT {
                break;
            }
            for col in 0..8 {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let px = origin_x + col;
                if px >= DISPLAY_WIDTH {
                    break;
                }
                let i = px + py * DISPLAY_WIDTH;
                if self.pixels[i] == 1 {
                    collision = 1;
                }
                self.pixels[i] ^= 1;
            }
        }

        self.dirty = true;
        collision
    }

    /// the pixel grid, without touching the dirty flag
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// the pixel grid, clearing the dirty flag (host has consumed a frame)
    pub fn take_frame(&mut self) -> &[u8] {
        self.dirty = false;
        &self.pixels
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
