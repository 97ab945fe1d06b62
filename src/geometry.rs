use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One drawn stroke, from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// A square box of side `size` centered on the origin.
    pub fn centered(size: f32) -> Self {
        let half = Vec2::splat(size / 2.0);
        Self {
            min: -half,
            max: half,
        }
    }

    /// The box enclosing every endpoint of `segments`, or `None` if there are none.
    pub fn of(segments: &[Segment]) -> Option<Self> {
        let first = segments.first()?;
        let init = Self {
            min: first.start,
            max: first.start,
        };
        Some(segments.iter().fold(init, |b, seg| Self {
            min: b.min.min(seg.start).min(seg.end),
            max: b.max.max(seg.start).max(seg.end),
        }))
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

/// Remaps `segments` linearly, per axis, from their own bounds into `target`.
///
/// An axis along which the input has zero extent maps to the center of the
/// target on that axis. Empty input yields an empty result.
pub fn fit_segments(segments: &[Segment], target: Bounds) -> Vec<Segment> {
    let Some(source) = Bounds::of(segments) else {
        return Vec::new();
    };

    let src_size = source.size();
    let dst_size = target.size();
    let center = target.center();

    let remap = |p: Vec2| -> Vec2 {
        let x = if src_size.x > 0.0 {
            target.min.x + (p.x - source.min.x) / src_size.x * dst_size.x
        } else {
            center.x
        };
        let y = if src_size.y > 0.0 {
            target.min.y + (p.y - source.min.y) / src_size.y * dst_size.y
        } else {
            center.y
        };
        Vec2::new(x, y)
    };

    segments
        .iter()
        .map(|seg| Segment::new(remap(seg.start), remap(seg.end)))
        .collect()
}
