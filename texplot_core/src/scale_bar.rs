// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker-size scale bar.
//!
//! A scale bar is a tiny legend for scatter-table marker sizes: two reference
//! circles, one for the smallest and one for the largest size value, each with
//! its value written inside. It is anchored in a corner (or the center) of the
//! axis box; marker offsets are in points from that anchor.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

use crate::annotation::{Coord, LabelLocation};
use crate::error::PlotResult;
use crate::format::format_number;
use crate::table::rescale;

/// Distance (pt) between the axis box edge and the markers.
const MARGIN: f64 = 4.0;
/// Distance (pt) between the two markers.
const GAP: f64 = 4.0;

/// A scale bar request.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleBar {
    /// Where the bar is anchored.
    pub location: LabelLocation,
}

impl ScaleBar {
    /// Creates a scale bar from a location keyword.
    pub fn new(location: &str) -> PlotResult<Self> {
        Ok(Self {
            location: location.parse()?,
        })
    }

    /// Lays out the two reference markers.
    ///
    /// `size_domain` is the observed size range of the plot's tables, `None` when
    /// there are none; then no bar is drawn, nor when the largest size maps to
    /// a radius of zero or less. Without a `size_target`, sizes are
    /// used as radii directly.
    pub fn prepare(
        &self,
        size_domain: Option<(f64, f64)>,
        size_target: Option<(f64, f64)>,
    ) -> Option<PreparedScaleBar> {
        let Some((smin, smax)) = size_domain else {
            tracing::warn!("scale bar requested but the plot has no scatter tables");
            return None;
        };
        let radius = |v: f64| match size_target {
            Some(target) => rescale(v, (smin, smax), target),
            None => v,
        };
        let (r_max, r_min) = (radius(smax), radius(smin));
        if r_max <= 0.0 {
            tracing::warn!(smax, "scale bar skipped: largest marker has no radius");
            return None;
        }

        let (dx, dy) = self.location.inward();
        // Markers share one center line; the max marker hugs the anchor.
        let (max_x, min_x) = if dx == 0.0 {
            (-(GAP * 0.5 + r_max), GAP * 0.5 + r_min.max(0.0))
        } else {
            let max_x = dx * (MARGIN + r_max);
            (max_x, max_x + dx * (r_max + GAP + r_min.max(0.0)))
        };
        let y = dy * (MARGIN + r_max);

        let mut markers = Vec::with_capacity(2);
        markers.push(ScaleBarMarker {
            offset: (max_x, y),
            radius: r_max,
            value: smax,
            label: format_number(smax),
        });
        if r_min > 0.0 && smin != smax {
            markers.push(ScaleBarMarker {
                offset: (min_x, y),
                radius: r_min,
                value: smin,
                label: format_number(smin),
            });
        }

        let (rx, ry) = self.location.relative();
        Some(PreparedScaleBar {
            at: Coord::relative(rx, ry),
            location: self.location,
            markers,
        })
    }
}

/// One reference circle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScaleBarMarker {
    /// Center offset from the anchor, in points.
    pub offset: (f64, f64),
    /// Radius, in points.
    pub radius: f64,
    /// Size value the circle stands for.
    pub value: f64,
    /// Formatted value.
    pub label: String,
}

/// A scale bar ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedScaleBar {
    /// Anchor.
    pub at: Coord,
    /// Anchor location.
    pub location: LabelLocation,
    /// Largest marker first.
    pub markers: Vec<ScaleBarMarker>,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn markers_point_inward_from_the_corner() {
        let bar = ScaleBar::new("lower right")
            .unwrap()
            .prepare(Some((1.0, 4.0)), Some((2.0, 10.0)))
            .unwrap();
        assert_eq!(bar.at, Coord::relative(1.0, 0.0));
        assert_eq!(bar.markers.len(), 2);
        let max = &bar.markers[0];
        let min = &bar.markers[1];
        assert_eq!(max.radius, 10.0);
        assert_eq!(min.radius, 2.0);
        assert_eq!(max.offset, (-14.0, 14.0));
        assert_eq!(min.offset, (-30.0, 14.0));
        assert_eq!(min.label, "1");
    }

    #[test]
    fn zero_radius_min_marker_is_omitted() {
        let bar = ScaleBar::default()
            .prepare(Some((0.0, 3.0)), None)
            .unwrap();
        assert_eq!(bar.markers.len(), 1);
        assert_eq!(bar.markers[0].label, "3");
        assert_eq!(bar.markers[0].offset, (-7.0, -7.0));
    }

    #[test]
    fn non_positive_sizes_draw_no_bar() {
        assert_eq!(ScaleBar::default().prepare(Some((-2.0, 0.0)), None), None);
        assert_eq!(
            ScaleBar::default().prepare(Some((1.0, 4.0)), Some((0.0, 0.0))),
            None
        );
    }

    #[test]
    fn no_tables_no_bar() {
        assert_eq!(ScaleBar::default().prepare(None, Some((1.0, 2.0))), None);
        assert!(ScaleBar::new("nowhere").is_err());
    }
}
