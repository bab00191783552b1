use crate::color::Color;
use crate::math::Point;

/// How a fill or stroke combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composite {
    /// Plain alpha blending.
    #[default]
    SourceOver,
    /// Erases the destination in proportion to the source alpha; the source
    /// color is ignored.
    DestinationOut,
    /// Adds source to destination, so overlapping strokes brighten.
    Lighter,
}

/// Immediate-mode 2D drawing target.
///
/// The simulation only ever strokes single line segments and fills the whole
/// surface, so that is all a surface has to provide.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Strokes one segment using the current composite mode.
    fn stroke_line(&mut self, from: Point, to: Point, color: Color, line_width: f32);

    /// Fills the entire surface with `color` using `composite` for this fill
    /// only. The current composite mode is left unchanged.
    fn fill_rect(&mut self, color: Color, composite: Composite);

    fn set_composite(&mut self, composite: Composite);
}

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Stroke {
        from: Point,
        to: Point,
        color: Color,
        line_width: f32,
        composite: Composite,
    },
    Fill {
        color: Color,
        composite: Composite,
    },
    SetComposite(Composite),
}

/// A surface that draws nothing and keeps a log of every call, for headless
/// runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    composite: Composite,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn composite(&self) -> Composite {
        self.composite
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Stroke { .. }))
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, line_width: f32) {
        self.calls.push(DrawCall::Stroke {
            from,
            to,
            color,
            line_width,
            composite: self.composite,
        });
    }

    fn fill_rect(&mut self, color: Color, composite: Composite) {
        self.calls.push(DrawCall::Fill { color, composite });
    }

    fn set_composite(&mut self, composite: Composite) {
        self.composite = composite;
        self.calls.push(DrawCall::SetComposite(composite));
    }
}
