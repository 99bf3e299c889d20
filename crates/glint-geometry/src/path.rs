//! Path primitives for glyph outlines and decorations.
//!
//! A path is a sequence of drawing commands. Glyph outlines arrive from the
//! glyph cache in glyph-local pixel coordinates (y grows downward).

use glam::DVec2;
use glint_core::geometry::Rect;

use crate::Transform2D;

/// A command in a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new sub-path without drawing.
    MoveTo(DVec2),
    /// Straight segment to a position.
    LineTo(DVec2),
    /// Quadratic Bezier curve.
    QuadTo {
        /// Control point
        control: DVec2,
        /// End point
        to: DVec2,
    },
    /// Cubic Bezier curve.
    CubicTo {
        /// First control point
        control1: DVec2,
        /// Second control point
        control2: DVec2,
        /// End point
        to: DVec2,
    },
    /// Close the current sub-path by drawing a line to its start.
    Close,
}

impl PathCommand {
    /// Apply `f` to every point of the command.
    pub fn map_points(self, mut f: impl FnMut(DVec2) -> DVec2) -> Self {
        match self {
            PathCommand::MoveTo(to) => PathCommand::MoveTo(f(to)),
            PathCommand::LineTo(to) => PathCommand::LineTo(f(to)),
            PathCommand::QuadTo { control, to } => PathCommand::QuadTo {
                control: f(control),
                to: f(to),
            },
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => PathCommand::CubicTo {
                control1: f(control1),
                control2: f(control2),
                to: f(to),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// A 2D path consisting of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from a list of commands.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Get the commands in this path.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when every command is a move, line or close.
    pub fn is_flat(&self) -> bool {
        self.commands.iter().all(|cmd| {
            matches!(
                cmd,
                PathCommand::MoveTo(_) | PathCommand::LineTo(_) | PathCommand::Close
            )
        })
    }

    /// Conservative bounds (control points included).
    pub fn bounds(&self) -> Option<Rect> {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);

        for cmd in &self.commands {
            cmd.map_points(|p| {
                min = min.min(p);
                max = max.max(p);
                p
            });
        }

        if min.is_finite() && max.is_finite() {
            Some(Rect::from_points(min, max))
        } else {
            None
        }
    }

    /// Copy of the path shifted by `offset`.
    pub fn translated(&self, offset: DVec2) -> Path {
        self.transformed(&Transform2D::translate(offset))
    }

    /// Copy of the path with every point mapped through `transform`.
    pub fn transformed(&self, transform: &Transform2D) -> Path {
        Path {
            commands: self
                .commands
                .iter()
                .map(|cmd| cmd.map_points(|p| transform.transform_point(p)))
                .collect(),
        }
    }

    /// Closed polygons of a flat path, one point list per sub-path.
    ///
    /// Curves are ignored; flatten first. Sub-paths with fewer than three
    /// points are dropped since they enclose no area.
    pub fn polygons(&self) -> Vec<Vec<DVec2>> {
        let mut polygons = Vec::new();
        let mut current: Vec<DVec2> = Vec::new();

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(to) => {
                    if current.len() >= 3 {
                        polygons.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(*to);
                }
                PathCommand::LineTo(to) => {
                    if current.last() != Some(to) {
                        current.push(*to);
                    }
                }
                PathCommand::Close => {
                    if current.len() > 1 && current.first() == current.last() {
                        current.pop();
                    }
                    if current.len() >= 3 {
                        polygons.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
                PathCommand::QuadTo { .. } | PathCommand::CubicTo { .. } => {}
            }
        }
        if current.len() >= 3 {
            polygons.push(current);
        }
        polygons
    }
}

/// Builder for constructing paths.
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: DVec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    pub fn line_to(&mut self, to: DVec2) -> &mut Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    pub fn quad_to(&mut self, control: DVec2, to: DVec2) -> &mut Self {
        self.commands.push(PathCommand::QuadTo { control, to });
        self
    }

    pub fn cubic_to(&mut self, control1: DVec2, control2: DVec2, to: DVec2) -> &mut Self {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            to,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Closed axis-aligned rectangle, clockwise on screen.
    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.move_to(DVec2::new(rect.left, rect.top))
            .line_to(DVec2::new(rect.right, rect.top))
            .line_to(DVec2::new(rect.right, rect.bottom))
            .line_to(DVec2::new(rect.left, rect.bottom))
            .close()
    }

    pub fn build(&mut self) -> Path {
        Path {
            commands: std::mem::take(&mut self.commands),
        }
    }
}
