use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Widget},
};

/// Vertical device pixels per terminal row (half-block glyphs).
pub const PIXELS_PER_ROW: u16 = 2;
/// Fraction of each slot left empty between bars.
pub const GAP_RATIO: f32 = 0.3;
/// Fraction of the surface height a full-scale bar occupies.
pub const HEIGHT_SCALE: f32 = 0.8;

/// Drawing surface measured from a container area, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    area: Rect,
    width: f32,
    height: f32,
}

impl Surface {
    pub fn measure(area: Rect) -> Self {
        Self {
            area,
            width: f32::from(area.width),
            height: f32::from(area.height) * f32::from(PIXELS_PER_ROW),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Place one bar per height in even horizontal slots, vertically centered.
pub fn layout(heights: &[f32], width: f32, height: f32) -> Vec<BarRect> {
    if heights.is_empty() {
        return Vec::new();
    }
    let slot = width / heights.len() as f32;
    let gap = slot * GAP_RATIO;

    heights
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let bar_height = h * height * HEIGHT_SCALE;
            BarRect {
                x: i as f32 * slot + gap / 2.0,
                y: (height - bar_height) / 2.0,
                width: slot - gap,
                height: bar_height,
            }
        })
        .collect()
}

/// Device pixels whose centers fall inside `[start, start + len)`.
fn covered(start: f32, len: f32) -> std::ops::Range<u32> {
    let first = (start - 0.5).ceil().max(0.0) as u32;
    let end = (start + len - 0.5).ceil().max(0.0) as u32;
    first..end.max(first)
}

fn glyph(top: bool, bottom: bool) -> Option<char> {
    match (top, bottom) {
        (true, true) => Some('█'),
        (true, false) => Some('▀'),
        (false, true) => Some('▄'),
        (false, false) => None,
    }
}

/// Paint `bars` (in device pixels) into the cells of `surface`.
pub fn rasterize(bars: &[BarRect], surface: &Surface, buf: &mut Buffer, style: Style) {
    let area = surface.area();
    let rows = u32::from(area.height);
    let cols = u32::from(area.width);

    for bar in bars {
        let lit = covered(bar.y, bar.height);
        for cx in covered(bar.x, bar.width).filter(|&c| c < cols) {
            for cy in 0..rows {
                let top = lit.contains(&(cy * 2));
                let bottom = lit.contains(&(cy * 2 + 1));
                if let Some(ch) = glyph(top, bottom) {
                    let x = area.x + cx as u16;
                    let y = area.y + cy as u16;
                    buf[(x, y)].set_char(ch).set_style(style);
                }
            }
        }
    }
}

/// Renders bar magnitudes into whatever area it is given; the surface is
/// re-measured on every render so terminal resizes rescale the bars.
pub struct BarsWidget<'a> {
    heights: &'a [f32],
    style: Style,
    block: Option<Block<'a>>,
}

impl<'a> BarsWidget<'a> {
    pub fn new(heights: &'a [f32]) -> Self {
        Self {
            heights,
            style: Style::default(),
            block: None,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for BarsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let surface = Surface::measure(inner);
        let bars = layout(self.heights, surface.width(), surface.height());
        rasterize(&bars, &surface, buf, self.style);
    }
}
