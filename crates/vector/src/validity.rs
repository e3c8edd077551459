//! Geometric validity checking and best-effort repair.

use geo::{BooleanOps, Validation};
use geo_types::MultiPolygon;

use crate::polygon::PolygonSet;

/// Outcome of validating (and repairing) a polygon set.
///
/// Indices refer to the feature order of the original set. Features listed
/// in `unrepaired` are kept in the set, but coverage correctness is not
/// guaranteed for them.
#[derive(Debug, Default)]
pub struct ValidityReport {
    /// Features that were invalid and successfully repaired.
    pub repaired: Vec<usize>,
    /// Features that remain invalid after repair.
    pub unrepaired: Vec<usize>,
}

impl ValidityReport {
    /// True when every feature is valid (possibly after repair).
    pub fn is_clean(&self) -> bool {
        self.unrepaired.is_empty()
    }

    /// True when no feature needed any repair.
    pub fn is_pristine(&self) -> bool {
        self.repaired.is_empty() && self.unrepaired.is_empty()
    }
}

/// Validate every feature, repairing invalid ones in place.
///
/// Repair is a boolean self-union: the overlay re-resolves the rings,
/// which fixes self-intersections (bowties) and degenerate ring nesting.
/// A repair may split one feature into several polygons; the replacements
/// take the original feature's position in the set.
pub fn validate_and_repair(set: &mut PolygonSet) -> ValidityReport {
    let mut report = ValidityReport::default();
    let mut rebuilt = Vec::with_capacity(set.polygons.len());

    for (index, polygon) in set.polygons.iter().enumerate() {
        if polygon.is_valid() {
            rebuilt.push(polygon.clone());
            continue;
        }

        let original = MultiPolygon::new(vec![polygon.clone()]);
        let resolved = original.union(&original);
        let repair_ok = !resolved.0.is_empty() && resolved.0.iter().all(|p| p.is_valid());

        if repair_ok {
            report.repaired.push(index);
            rebuilt.extend(resolved.0);
        } else {
            report.unrepaired.push(index);
            rebuilt.push(polygon.clone());
        }
    }

    set.polygons = rebuilt;
    report
}
