//! Curve flattening.
//!
//! Quadratic and cubic segments are approximated by polylines through
//! lyon's flattening, with a tolerance derived from an approximation scale:
//! `0.5 / scale` in the path's own units, so the error stays about half a
//! device pixel once the run transform scales the outline.

use glam::DVec2;
use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment, point};

use crate::{Path, PathCommand};

/// Smallest tolerance handed to lyon, keeps degenerate scales finite.
const MIN_TOLERANCE: f64 = 1e-4;

/// Flattening tolerance for an approximation scale.
pub fn tolerance_for_scale(approximation_scale: f64) -> f64 {
    if approximation_scale > 0.0 && approximation_scale.is_finite() {
        (0.5 / approximation_scale).max(MIN_TOLERANCE)
    } else {
        0.5
    }
}

fn to_lyon(p: DVec2) -> lyon::geom::Point<f64> {
    point(p.x, p.y)
}

/// Replace every curve of `path` by line segments.
pub fn flatten(path: &Path, approximation_scale: f64) -> Path {
    let tolerance = tolerance_for_scale(approximation_scale);
    let mut commands = Vec::with_capacity(path.len());
    let mut current = DVec2::ZERO;
    let mut subpath_start = DVec2::ZERO;

    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo(to) => {
                commands.push(PathCommand::MoveTo(to));
                current = to;
                subpath_start = to;
            }
            PathCommand::LineTo(to) => {
                commands.push(PathCommand::LineTo(to));
                current = to;
            }
            PathCommand::QuadTo { control, to } => {
                let segment = QuadraticBezierSegment {
                    from: to_lyon(current),
                    ctrl: to_lyon(control),
                    to: to_lyon(to),
                };
                commands.extend(
                    segment
                        .flattened(tolerance)
                        .map(|p| PathCommand::LineTo(DVec2::new(p.x, p.y))),
                );
                current = to;
            }
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => {
                let segment = CubicBezierSegment {
                    from: to_lyon(current),
                    ctrl1: to_lyon(control1),
                    ctrl2: to_lyon(control2),
                    to: to_lyon(to),
                };
                commands.extend(
                    segment
                        .flattened(tolerance)
                        .map(|p| PathCommand::LineTo(DVec2::new(p.x, p.y))),
                );
                current = to;
            }
            PathCommand::Close => {
                commands.push(PathCommand::Close);
                current = subpath_start;
            }
        }
    }

    Path::from_commands(commands)
}
