// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annotations: reference lines, pins and labels.
//!
//! Annotations are positioned with [`Coord`], a small tree over the two PGFPlots
//! coordinate systems (`axis cs` for data values, `rel axis cs` for fractions of
//! the axis box) and the TikZ `|-` composition that takes x from one coordinate
//! and y from another.

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use core::str::FromStr;

use serde::Serialize;

use crate::error::{PlotError, PlotResult};
use crate::format::format_number;
use crate::scale::AxisMode;
use crate::series::interpolate;

/// Direction of a reference line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Spans the x axis at a fixed y.
    Horizontal,
    /// Spans the y axis at a fixed x.
    Vertical,
}

/// A TikZ coordinate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Coord {
    /// Data coordinates.
    Axis {
        /// X value.
        x: f64,
        /// Y value.
        y: f64,
    },
    /// Fractions of the axis box, `(0, 0)` lower left, `(1, 1)` upper right.
    Relative {
        /// Horizontal fraction.
        x: f64,
        /// Vertical fraction.
        y: f64,
    },
    /// X of one coordinate combined with y of another.
    Compose {
        /// Supplies the x position.
        x_from: Box<Coord>,
        /// Supplies the y position.
        y_from: Box<Coord>,
    },
}

impl Coord {
    /// A data coordinate.
    pub fn axis(x: f64, y: f64) -> Self {
        Self::Axis { x, y }
    }

    /// A relative coordinate.
    pub fn relative(x: f64, y: f64) -> Self {
        Self::Relative { x, y }
    }

    /// X from `x_from`, y from `y_from`.
    pub fn compose(x_from: Self, y_from: Self) -> Self {
        Self::Compose {
            x_from: Box::new(x_from),
            y_from: Box::new(y_from),
        }
    }

    /// The parenthesized TikZ form, e.g. `(rel axis cs:0,0 |- axis cs:1,5)`.
    pub fn to_tikz(&self) -> String {
        format!("({})", self.body())
    }

    fn body(&self) -> String {
        match self {
            Self::Axis { x, y } => {
                format!("axis cs:{},{}", format_number(*x), format_number(*y))
            }
            Self::Relative { x, y } => {
                format!("rel axis cs:{},{}", format_number(*x), format_number(*y))
            }
            Self::Compose { x_from, y_from } => {
                format!("{} |- {}", x_from.body(), y_from.body())
            }
        }
    }
}

/// A line across the whole axis box.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceLine {
    /// Direction.
    pub orientation: Orientation,
    /// Y for horizontal lines, x for vertical ones.
    pub value: f64,
    /// Opaque TikZ line style.
    pub style: Option<String>,
}

impl ReferenceLine {
    /// A horizontal line at `y`.
    pub fn horizontal(y: f64) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            value: y,
            style: None,
        }
    }

    /// A vertical line at `x`.
    pub fn vertical(x: f64) -> Self {
        Self {
            orientation: Orientation::Vertical,
            value: x,
            style: None,
        }
    }

    /// Sets the line style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Spans the line edge to edge.
    ///
    /// The data coordinate only contributes `value`; its other component is a
    /// placeholder of 1 so it stays valid on log axes.
    pub fn prepare(&self) -> PreparedLine {
        let v = self.value;
        let (from, to) = match self.orientation {
            Orientation::Horizontal => (
                Coord::compose(Coord::relative(0.0, 0.0), Coord::axis(1.0, v)),
                Coord::compose(Coord::relative(1.0, 0.0), Coord::axis(1.0, v)),
            ),
            Orientation::Vertical => (
                Coord::compose(Coord::axis(v, 1.0), Coord::relative(0.0, 0.0)),
                Coord::compose(Coord::axis(v, 1.0), Coord::relative(0.0, 1.0)),
            ),
        };
        PreparedLine {
            orientation: self.orientation,
            from,
            to,
            style: self.style.clone(),
        }
    }
}

/// A reference line ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedLine {
    /// Direction.
    pub orientation: Orientation,
    /// Start of the segment.
    pub from: Coord,
    /// End of the segment.
    pub to: Coord,
    /// Line style.
    pub style: Option<String>,
}

/// How a pin label is joined to its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinConnector {
    /// Plain pin edge.
    #[default]
    Plain,
    /// Arrow pointing at the anchor.
    Arrow,
}

/// Options for placing a pin.
///
/// Without `x` or `relative_position`, [`Plot::add_pin`](crate::Plot::add_pin)
/// picks a point along the latest series from the location: `left` uses the
/// first point, `right` the last, anything else 80% along.
#[derive(Clone, Debug, PartialEq)]
pub struct PinSpec {
    /// Label text.
    pub text: String,
    /// TikZ compass location of the label relative to the anchor.
    pub location: Option<String>,
    /// Anchor x, interpolated along the series.
    pub x: Option<f64>,
    /// Anchor as a fraction of the series' x range.
    pub relative_position: Option<f64>,
    /// Draw an arrow to the anchor.
    pub use_arrow: bool,
    /// Opaque TikZ style.
    pub style: Option<String>,
}

impl PinSpec {
    /// A pin with only its text set.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: None,
            x: None,
            relative_position: None,
            use_arrow: false,
            style: None,
        }
    }

    /// Sets the label location (`left`, `above right`, ...).
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Anchors the pin at `x` along the series.
    pub fn at_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    /// Anchors the pin at a fraction of the series' x range.
    pub fn with_relative_position(mut self, position: f64) -> Self {
        self.relative_position = Some(position);
        self
    }

    /// Draws an arrow to the anchor.
    pub fn with_arrow(mut self) -> Self {
        self.use_arrow = true;
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub(crate) fn location_or(&self, default: &str) -> String {
        self.location
            .clone()
            .unwrap_or_else(|| default.to_string())
    }

    pub(crate) fn relative_position_for(&self, location: &str) -> f64 {
        self.relative_position.unwrap_or(match location {
            "left" => 0.0,
            "right" => 1.0,
            _ => 0.8,
        })
    }

    pub(crate) fn into_pin(self, x: f64, y: f64, location: String) -> Pin {
        Pin {
            x,
            y,
            text: self.text,
            location,
            use_arrow: self.use_arrow,
            style: self.style,
        }
    }
}

/// Picks the point at `relative` of the way from the first to the last x.
///
/// On log x axes the fraction is taken in log space. Y is interpolated.
pub(crate) fn point_along(
    xs: &[f64],
    ys: &[f64],
    relative: f64,
    xmode: AxisMode,
) -> PlotResult<(f64, f64)> {
    let (Some(&x0), Some(&x1)) = (xs.first(), xs.last()) else {
        return Err(PlotError::MissingSeries);
    };
    let t0 = xmode.forward(x0);
    let t1 = xmode.forward(x1);
    let x = xmode.inverse(relative * (t1 - t0) + t0);
    let y = interpolate(x, xs, ys).ok_or_else(|| PlotError::shape("y", xs.len(), ys.len()))?;
    Ok((x, y))
}

/// A pin with a resolved anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Pin {
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// Label text.
    pub text: String,
    /// TikZ compass location, passed through verbatim.
    pub location: String,
    /// Draw an arrow to the anchor.
    pub use_arrow: bool,
    /// Opaque TikZ style.
    pub style: Option<String>,
}

impl Pin {
    /// Produces the render record.
    pub fn prepare(&self) -> PreparedPin {
        PreparedPin {
            at: Coord::axis(self.x, self.y),
            text: self.text.clone(),
            location: self.location.clone(),
            connector: if self.use_arrow {
                PinConnector::Arrow
            } else {
                PinConnector::Plain
            },
            style: self.style.clone(),
        }
    }
}

/// A pin ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedPin {
    /// Anchor.
    pub at: Coord,
    /// Label text.
    pub text: String,
    /// TikZ compass location.
    pub location: String,
    /// Edge type.
    pub connector: PinConnector,
    /// Style.
    pub style: Option<String>,
}

/// A corner or the center of the axis box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LabelLocation {
    /// Upper right corner.
    #[default]
    #[serde(rename = "upper right")]
    UpperRight,
    /// Upper left corner.
    #[serde(rename = "upper left")]
    UpperLeft,
    /// Lower left corner.
    #[serde(rename = "lower left")]
    LowerLeft,
    /// Lower right corner.
    #[serde(rename = "lower right")]
    LowerRight,
    /// Center.
    #[serde(rename = "center")]
    Center,
}

impl LabelLocation {
    /// Node anchor keeping text inside the box.
    pub fn anchor(self) -> &'static str {
        match self {
            Self::UpperRight => "below left",
            Self::UpperLeft => "below right",
            Self::LowerLeft => "above right",
            Self::LowerRight => "above left",
            Self::Center => "center",
        }
    }

    /// Relative axis coordinates of the location.
    pub fn relative(self) -> (f64, f64) {
        match self {
            Self::UpperRight => (1.0, 1.0),
            Self::UpperLeft => (0.0, 1.0),
            Self::LowerLeft => (0.0, 0.0),
            Self::LowerRight => (1.0, 0.0),
            Self::Center => (0.5, 0.5),
        }
    }

    /// Unit direction pointing from the location into the box.
    pub(crate) fn inward(self) -> (f64, f64) {
        let (x, y) = self.relative();
        (1.0 - 2.0 * x, 1.0 - 2.0 * y)
    }
}

impl FromStr for LabelLocation {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper right" => Ok(Self::UpperRight),
            "upper left" => Ok(Self::UpperLeft),
            "lower left" => Ok(Self::LowerLeft),
            "lower right" => Ok(Self::LowerRight),
            "center" => Ok(Self::Center),
            other => Err(PlotError::UnknownLocation(other.to_string())),
        }
    }
}

/// Text placed in a corner or the center of the axis box.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Label text.
    pub text: String,
    /// Placement.
    pub location: LabelLocation,
    /// Opaque TikZ style.
    pub style: Option<String>,
}

impl Label {
    /// Creates a label from a location keyword.
    pub fn new(text: impl Into<String>, location: &str) -> PlotResult<Self> {
        Ok(Self {
            text: text.into(),
            location: location.parse()?,
            style: None,
        })
    }

    /// Sets the style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Produces the render record.
    pub fn prepare(&self) -> PreparedLabel {
        let (x, y) = self.location.relative();
        PreparedLabel {
            at: Coord::relative(x, y),
            anchor: self.location.anchor(),
            text: self.text.clone(),
            style: self.style.clone(),
        }
    }
}

/// A label ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedLabel {
    /// Relative position.
    pub at: Coord,
    /// Node anchor.
    pub anchor: &'static str,
    /// Label text.
    pub text: String,
    /// Style.
    pub style: Option<String>,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn horizontal_line_composes_relative_and_axis() {
        let line = ReferenceLine::horizontal(5.0).with_style("dashed").prepare();
        assert_eq!(line.from.to_tikz(), "(rel axis cs:0,0 |- axis cs:1,5)");
        assert_eq!(line.to.to_tikz(), "(rel axis cs:1,0 |- axis cs:1,5)");
        assert_eq!(line.style.as_deref(), Some("dashed"));
    }

    #[test]
    fn vertical_line_spans_bottom_to_top() {
        let line = ReferenceLine::vertical(2.5).prepare();
        assert_eq!(line.from.to_tikz(), "(axis cs:2.5,1 |- rel axis cs:0,0)");
        assert_eq!(line.to.to_tikz(), "(axis cs:2.5,1 |- rel axis cs:0,1)");
    }

    #[test]
    fn label_locations_map_to_anchors() {
        let label = Label::new("a", "upper left").unwrap().prepare();
        assert_eq!(label.at, Coord::relative(0.0, 1.0));
        assert_eq!(label.anchor, "below right");
        let center = Label::new("b", "center").unwrap().prepare();
        assert_eq!(center.at, Coord::relative(0.5, 0.5));
        assert_eq!(
            Label::new("c", "middle"),
            Err(PlotError::UnknownLocation("middle".into()))
        );
    }

    #[test]
    fn default_relative_position_depends_on_location() {
        let spec = PinSpec::new("p");
        assert_eq!(spec.relative_position_for("left"), 0.0);
        assert_eq!(spec.relative_position_for("right"), 1.0);
        assert_eq!(spec.relative_position_for("above"), 0.8);
        assert_eq!(
            spec.with_relative_position(0.3).relative_position_for("left"),
            0.3
        );
    }

    #[test]
    fn point_along_interpolates_in_log_space() {
        let xs = [1.0, 100.0];
        let ys = [0.0, 99.0];
        let (x, y) = point_along(&xs, &ys, 0.5, AxisMode::Log).unwrap();
        assert!((x - 10.0).abs() < 1e-9, "x = {x}");
        assert!((y - 9.0).abs() < 1e-9, "y = {y}");

        let (x, y) = point_along(&xs, &ys, 0.5, AxisMode::Linear).unwrap();
        assert_eq!((x, y), (50.5, 49.5));
        assert_eq!(
            point_along(&[], &[], 0.5, AxisMode::Linear),
            Err(PlotError::MissingSeries)
        );
    }

    #[test]
    fn pins_keep_location_verbatim() {
        let pin = PinSpec::new("peak")
            .with_arrow()
            .into_pin(1.0, 2.0, "below left".into())
            .prepare();
        assert_eq!(pin.at, Coord::axis(1.0, 2.0));
        assert_eq!(pin.location, "below left");
        assert_eq!(pin.connector, PinConnector::Arrow);
    }
}
