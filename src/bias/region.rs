//! Region of interest in (MMAD, GSD) space.
//!
//! The region is a hand-drawn polygon from empirical fit boundaries, written
//! with `x = mmad`, `y = gsd`:
//!
//! ```text
//! y >= (4/15) x + 13/30
//! and (y <= (-32/3) x + 409/6  or  y <= -14 x + 76  or  y <= -44 x + 143.5)
//! ```
//!
//! For both comparison bases the band `y >= 12 x - 8.5` is then excluded.
//! The boundaries are kept exactly as drawn; do not tidy the coefficients.
//!
//! Note: the earlier tool passed `(gsd, mmad)` into this predicate, i.e. it
//! evaluated it with `x = gsd`; maps masked by it differ from these.

use crate::domain::{BiasCell, Compare};

/// `y >= (4/15) x + 13/30`.
pub fn above_lower_boundary(gsd: f64, mmad: f64) -> bool {
    gsd >= (4.0 / 15.0) * mmad + 13.0 / 30.0
}

/// The three upper boundaries, in the order they are OR'd.
pub fn upper_boundaries(gsd: f64, mmad: f64) -> [bool; 3] {
    let (x, y) = (mmad, gsd);
    [
        y <= (-32.0 / 3.0) * x + 409.0 / 6.0,
        y <= -14.0 * x + 76.0,
        y <= -44.0 * x + 143.5,
    ]
}

/// `y` under at least one upper boundary.
pub fn below_upper_boundary(gsd: f64, mmad: f64) -> bool {
    upper_boundaries(gsd, mmad).iter().any(|&b| b)
}

/// `y >= 12 x - 8.5`.
pub fn in_exclusion_band(gsd: f64, mmad: f64) -> bool {
    gsd >= 12.0 * mmad - 8.5
}

/// Whether `(gsd, mmad)` lies inside the region of interest.
pub fn in_region(compare: Compare, gsd: f64, mmad: f64) -> bool {
    let mut inside = above_lower_boundary(gsd, mmad) && below_upper_boundary(gsd, mmad);

    if matches!(compare, Compare::Total | Compare::Inhalable) && in_exclusion_band(gsd, mmad) {
        inside = false;
    }
    inside
}

/// Keep `cell` inside the region, mask it otherwise.
pub fn filter_cell(compare: Compare, gsd: f64, mmad: f64, cell: BiasCell) -> BiasCell {
    if in_region(compare, gsd, mmad) {
        cell
    } else {
        BiasCell::Masked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_point() {
        // y=2 >= 0.8 + 0.43, y <= -32 + 68.2, y=2 < 12*3 - 8.5
        assert!(in_region(Compare::Total, 2.0, 3.0));
    }

    #[test]
    fn below_lower_bound_is_outside() {
        // x=20: lower bound y >= 5.77
        assert!(!in_region(Compare::Total, 2.0, 20.0));
    }

    #[test]
    fn above_all_upper_bounds_is_outside() {
        // x=6.5: upper bounds -1.17, -15, -142.5; lower bound 2.17 <= 3.0
        assert!(!in_region(Compare::Inhalable, 3.0, 6.5));
    }

    #[test]
    fn each_upper_boundary_admits_on_its_own() {
        // x=2.3: bounds 43.63, 43.8, 42.3 -> only the second admits y=43.7
        assert_eq!(upper_boundaries(43.7, 2.3), [false, true, false]);
        assert!(below_upper_boundary(43.7, 2.3));
        // x=2.0: bounds 46.83, 48.0, 55.5 -> only the third admits y=50
        assert_eq!(upper_boundaries(50.0, 2.0), [false, false, true]);
        assert!(below_upper_boundary(50.0, 2.0));
        // x=4.0: bounds 25.5, 20.0, -32.5 -> only the first admits y=22
        assert_eq!(upper_boundaries(22.0, 4.0), [true, false, false]);
        // above all three
        assert_eq!(upper_boundaries(60.0, 2.0), [false, false, false]);
        assert!(!below_upper_boundary(60.0, 2.0));
    }

    #[test]
    fn exclusion_band_covers_the_steep_boundaries() {
        // Points admitted only by the second or third bound sit in the band.
        for (gsd, mmad) in [(43.7, 2.3), (50.0, 2.0)] {
            assert!(above_lower_boundary(gsd, mmad));
            assert!(in_exclusion_band(gsd, mmad));
            assert!(!in_region(Compare::Total, gsd, mmad));
        }
        // Admitted by the first bound alone and outside the band.
        // x=4.0: band starts at 39.5
        assert!(!in_exclusion_band(22.0, 4.0));
        assert!(in_region(Compare::Total, 22.0, 4.0));
    }

    #[test]
    fn exclusion_band_applies_to_both_bases() {
        // x=0.5: 12x - 8.5 = -2.5, so every gsd is excluded
        for compare in [Compare::Total, Compare::Inhalable] {
            assert!(!in_region(compare, 2.0, 0.5));
        }
    }

    #[test]
    fn deterministic() {
        for i in 0..50 {
            let gsd = 1.75 + i as f64 * 0.05;
            for j in 1..60 {
                let mmad = j as f64 * 0.5;
                assert_eq!(
                    in_region(Compare::Total, gsd, mmad),
                    in_region(Compare::Total, gsd, mmad)
                );
            }
        }
    }

    #[test]
    fn filter_masks_outside_cells_only() {
        let cell = BiasCell::Value(12.5);
        assert_eq!(filter_cell(Compare::Total, 2.0, 3.0, cell), cell);
        assert_eq!(filter_cell(Compare::Total, 2.0, 20.0, cell), BiasCell::Masked);
    }
}
