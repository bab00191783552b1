use std::io::Write;

use crate::color::{Color, Rgba};
use crate::error::{Error, Result};
use crate::math::Point;
use crate::surface::{Composite, Surface};

/// Software canvas rendered to the terminal with half blocks.
///
/// Each terminal character holds two vertically stacked cells: the `▄` glyph's
/// background paints the top cell and its foreground the bottom one. A cell
/// covers `scale × scale` surface units. Cells are stored premultiplied.
pub struct TerminalCanvas {
    width: usize,
    height: usize,
    scale: f32,
    background: (u8, u8, u8),
    composite: Composite,
    cells: Vec<Rgba>,
    stamp: Vec<usize>,
    output_buf: Vec<u8>,
}

impl TerminalCanvas {
    /// A canvas for a terminal of `columns × rows` characters.
    pub fn new(columns: usize, rows: usize, scale: f32, background: (u8, u8, u8)) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(Error::EmptySurface { columns, rows });
        }
        let width = columns;
        let height = rows * 2;
        Ok(Self {
            width,
            height,
            scale,
            background,
            composite: Composite::SourceOver,
            cells: vec![Rgba::default(); width * height],
            stamp: Vec::new(),
            output_buf: Vec::with_capacity(width * height * 25),
        })
    }

    /// Resizes to a new terminal size, clearing the picture.
    pub fn resize(&mut self, columns: usize, rows: usize) -> Result<()> {
        if columns == 0 || rows == 0 {
            return Err(Error::EmptySurface { columns, rows });
        }
        self.width = columns;
        self.height = rows * 2;
        self.cells.clear();
        self.cells.resize(self.width * self.height, Rgba::default());
        Ok(())
    }

    /// Canvas resolution in cells.
    pub fn cells(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Premultiplied contents of one cell, if it is on the canvas.
    pub fn cell(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Writes the whole picture over the background, starting at the home
    /// position.
    pub fn present(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        // `None` forces a color escape at the start of every row.
        let mut prev_top_color: Option<(u8, u8, u8)> = None;
        let mut prev_bot_color: Option<(u8, u8, u8)> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top_idx = y * self.width + x;
                let bot_idx = if y + 1 < self.height {
                    (y + 1) * self.width + x
                } else {
                    top_idx
                };

                let top_color = over_background(self.cells[top_idx], self.background);
                let bot_color = over_background(self.cells[bot_idx], self.background);

                if prev_top_color != Some(top_color) {
                    write!(
                        self.output_buf,
                        "\x1b[48;2;{};{};{}m",
                        top_color.0, top_color.1, top_color.2
                    )?;
                    prev_top_color = Some(top_color);
                }
                if prev_bot_color != Some(bot_color) {
                    write!(
                        self.output_buf,
                        "\x1b[38;2;{};{};{}m",
                        bot_color.0, bot_color.1, bot_color.2
                    )?;
                    prev_bot_color = Some(bot_color);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top_color = None;
            prev_bot_color = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }

    fn blend(&mut self, idx: usize, src: Rgba, composite: Composite) {
        let dst = &mut self.cells[idx];
        let a = src.a;
        match composite {
            Composite::SourceOver => {
                dst.r = src.r * a + dst.r * (1.0 - a);
                dst.g = src.g * a + dst.g * (1.0 - a);
                dst.b = src.b * a + dst.b * (1.0 - a);
                dst.a = a + dst.a * (1.0 - a);
            }
            Composite::DestinationOut => {
                dst.r *= 1.0 - a;
                dst.g *= 1.0 - a;
                dst.b *= 1.0 - a;
                dst.a *= 1.0 - a;
            }
            Composite::Lighter => {
                dst.r = (dst.r + src.r * a).min(1.0);
                dst.g = (dst.g + src.g * a).min(1.0);
                dst.b = (dst.b + src.b * a).min(1.0);
                dst.a = (dst.a + a).min(1.0);
            }
        }
    }

    // Collects the cells covered by a segment into `self.stamp`, each once.
    fn rasterize(&mut self, from: Point, to: Point, line_width: f32) {
        self.stamp.clear();

        let (x0, y0) = (from.x / self.scale, from.y / self.scale);
        let (x1, y1) = (to.x / self.scale, to.y / self.scale);
        // Anything up to one cell wide is a single cell.
        let radius = ((line_width / self.scale - 1.0) / 2.0).ceil().max(0.0) as isize;

        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let cx = (x0 + (x1 - x0) * t).floor() as isize;
            let cy = (y0 + (y1 - y0) * t).floor() as isize;

            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let px = cx + dx;
                    let py = cy + dy;
                    if px >= 0 && py >= 0 && (px as usize) < self.width && (py as usize) < self.height {
                        self.stamp.push(py as usize * self.width + px as usize);
                    }
                }
            }
        }

        self.stamp.sort_unstable();
        self.stamp.dedup();
    }
}

fn over_background(cell: Rgba, bg: (u8, u8, u8)) -> (u8, u8, u8) {
    let channel = |c: f32, b: u8| ((c + b as f32 / 255.0 * (1.0 - cell.a)).clamp(0.0, 1.0) * 255.0) as u8;
    (channel(cell.r, bg.0), channel(cell.g, bg.1), channel(cell.b, bg.2))
}

impl Surface for TerminalCanvas {
    fn width(&self) -> f32 {
        self.width as f32 * self.scale
    }

    fn height(&self) -> f32 {
        self.height as f32 * self.scale
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, line_width: f32) {
        if color.alpha() <= 0.0 {
            return;
        }
        let src = color.to_rgba();
        self.rasterize(from, to, line_width);
        let stamp = std::mem::take(&mut self.stamp);
        for &idx in &stamp {
            self.blend(idx, src, self.composite);
        }
        self.stamp = stamp;
    }

    fn fill_rect(&mut self, color: Color, composite: Composite) {
        let src = color.to_rgba();
        for idx in 0..self.cells.len() {
            self.blend(idx, src, composite);
        }
    }

    fn set_composite(&mut self, composite: Composite) {
        self.composite = composite;
    }
}
