use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::{require_non_negative, require_positive};
use crate::error::Result;
use crate::geometry::Panel;
use crate::math::{point, Point2};

/// Which edges meet at a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointKind {
    /// Right edge of one panel against the left edge of the next.
    Horizontal,
    /// Bottom edge of one panel against the top edge of the one below.
    Vertical,
    /// Bottom-right corner of one panel against the top-left of another.
    Corner,
}

/// A point where two panel edges meet and need connecting hardware.
///
/// Equality and hashing only consider the position.
#[derive(Debug, Clone, Copy)]
pub struct Joint {
    pub position: Point2,
    pub kind: JointKind,
}

impl Joint {
    #[must_use]
    pub fn new(x: Decimal, y: Decimal, kind: JointKind) -> Self {
        Self {
            position: point(x, y),
            kind,
        }
    }

    #[must_use]
    pub fn x(&self) -> Decimal {
        self.position.x
    }

    #[must_use]
    pub fn y(&self) -> Decimal {
        self.position.y
    }
}

impl PartialEq for Joint {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Joint {}

impl Hash for Joint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}

#[derive(Serialize)]
struct JointRecord<'a> {
    x: &'a Decimal,
    y: &'a Decimal,
    kind: JointKind,
}

impl Serialize for Joint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        JointRecord {
            x: &self.position.x,
            y: &self.position.y,
            kind: self.kind,
        }
        .serialize(serializer)
    }
}

/// Finds joints between every pair of panels.
///
/// For a pair `(a, b)`:
/// - **horizontal**: tops aligned within `tolerance` and `a.end_x` within
///   `gap` of `b.x`; joint at `(a.end_x, a.center_y)`
/// - **vertical**: left edges aligned within `tolerance` and `a.end_y` within
///   `gap` of `b.y`; joint at `(a.center_x, a.end_y)`
/// - **corner**: `a`'s bottom-right corner within `gap` of `b`'s top-left on
///   both axes; joint at `(a.end_x, a.end_y)`
///
/// Each unordered pair is checked in both orientations, so the result does not
/// depend on input order. A pair may yield several joints.
#[derive(Debug, Clone, Copy)]
pub struct JointCalculator {
    tolerance: Decimal,
    gap: Decimal,
}

impl JointCalculator {
    /// Creates a joint calculator.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if `tolerance` is negative or
    /// `gap` is not positive.
    pub fn new(tolerance: Decimal, gap: Decimal) -> Result<Self> {
        Ok(Self {
            tolerance: require_non_negative("joint_tolerance", tolerance)?,
            gap: require_positive("joint_gap", gap)?,
        })
    }

    #[must_use]
    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    #[must_use]
    pub fn gap(&self) -> Decimal {
        self.gap
    }

    /// Returns all joints, deduplicated by position and sorted by `(y, x)`.
    ///
    /// When several checks land on the same position the joint keeps the
    /// first kind in `Horizontal`, `Vertical`, `Corner` order.
    #[must_use]
    pub fn calculate_joints<'a, I>(&self, panels: I) -> Vec<Joint>
    where
        I: IntoIterator<Item = &'a Panel>,
    {
        let panels: Vec<&Panel> = panels.into_iter().collect();
        let mut found: BTreeMap<(Decimal, Decimal), JointKind> = BTreeMap::new();

        for (i, a) in panels.iter().enumerate() {
            for b in &panels[i + 1..] {
                self.detect(a, b, &mut found);
                self.detect(b, a, &mut found);
            }
        }

        found
            .into_iter()
            .map(|((y, x), kind)| Joint::new(x, y, kind))
            .collect()
    }

    fn detect(&self, a: &Panel, b: &Panel, found: &mut BTreeMap<(Decimal, Decimal), JointKind>) {
        let checks = [
            (JointKind::Horizontal, self.horizontal(a, b)),
            (JointKind::Vertical, self.vertical(a, b)),
            (JointKind::Corner, self.corner(a, b)),
        ];
        for (kind, position) in checks {
            if let Some(p) = position {
                found
                    .entry((p.y, p.x))
                    .and_modify(|existing| *existing = (*existing).min(kind))
                    .or_insert(kind);
            }
        }
    }

    fn horizontal(&self, a: &Panel, b: &Panel) -> Option<Point2> {
        ((a.y() - b.y()).abs() <= self.tolerance && self.touches(a.end_x(), b.x()))
            .then(|| point(a.end_x(), a.center_y()))
    }

    fn vertical(&self, a: &Panel, b: &Panel) -> Option<Point2> {
        ((a.x() - b.x()).abs() <= self.tolerance && self.touches(a.end_y(), b.y()))
            .then(|| point(a.center_x(), a.end_y()))
    }

    fn corner(&self, a: &Panel, b: &Panel) -> Option<Point2> {
        (self.touches(a.end_x(), b.x()) && self.touches(a.end_y(), b.y())).then(|| a.far_corner())
    }

    fn touches(&self, edge: Decimal, other: Decimal) -> bool {
        (edge - other).abs() < self.gap
    }
}
