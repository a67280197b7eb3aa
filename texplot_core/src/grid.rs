// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grids of plots sharing outer labels.
//!
//! Panels are stored row-major and addressed by `(row, column)`. Tick labels are
//! only drawn on the outer border of the grid unless a panel overrides that:
//! - x labels go on top of the first row (when there is more than one row) and
//!   below the last row.
//! - y labels go left of the first column and right of the last column (when
//!   there is more than one column).
//!
//! Grid-wide settings (`*_for_all` with `None`) act as defaults that explicit
//! per-panel settings take precedence over.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

use crate::error::{PlotError, PlotResult};
use crate::plot::{AxisLimits, Colorbar, Plot};
use crate::scale::{AxisMode, axis_modes, log_ticks};

/// Which side of a panel tick labels go on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickSide {
    /// Bottom for x, left for y.
    #[default]
    Standard,
    /// Top for x, right for y.
    Opposite,
}

/// Tick label visibility override for one axis of a panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickLabels {
    /// Follow the border rule.
    #[default]
    Auto,
    /// Never draw tick labels.
    Hide,
    /// Always draw tick labels on the given side.
    Show(TickSide),
}

/// Resolved tick label sides of a panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TickVisibility {
    /// X tick labels above the panel.
    pub top: bool,
    /// X tick labels below the panel.
    pub bottom: bool,
    /// Y tick labels left of the panel.
    pub left: bool,
    /// Y tick labels right of the panel.
    pub right: bool,
}

impl TickVisibility {
    /// Applies the border rule, or the overrides, to the panel at `(row, column)`.
    pub fn for_panel(
        shape: GridShape,
        row: usize,
        column: usize,
        x: TickLabels,
        y: TickLabels,
    ) -> Self {
        let (top, bottom) = match x {
            TickLabels::Auto => (shape.rows > 1 && row == 0, row + 1 == shape.rows),
            TickLabels::Hide => (false, false),
            TickLabels::Show(TickSide::Standard) => (false, true),
            TickLabels::Show(TickSide::Opposite) => (true, false),
        };
        let (left, right) = match y {
            TickLabels::Auto => (column == 0, shape.columns > 1 && column + 1 == shape.columns),
            TickLabels::Hide => (false, false),
            TickLabels::Show(TickSide::Standard) => (true, false),
            TickLabels::Show(TickSide::Opposite) => (false, true),
        };
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

/// Rows and columns of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GridShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
}

impl GridShape {
    /// A `rows x columns` shape.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Checks that the shape is non-empty and holds exactly `panels` panels.
    pub fn validate(self, panels: usize) -> PlotResult<()> {
        if self.rows == 0
            || self.columns == 0
            || self.rows.checked_mul(self.columns) != Some(panels)
        {
            return Err(PlotError::Layout {
                rows: self.rows,
                columns: self.columns,
                panels,
            });
        }
        Ok(())
    }

    /// Row-major index of `(row, column)`.
    pub fn index(self, row: usize, column: usize) -> PlotResult<usize> {
        if row < self.rows && column < self.columns {
            Ok(row * self.columns + column)
        } else {
            Err(PlotError::PanelOutOfRange { row, column })
        }
    }

    /// `(row, column)` of a row-major index.
    pub fn position(self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Panel {
    pub(crate) plot: Plot,
    pub(crate) empty: bool,
    pub(crate) xticklabels: TickLabels,
    pub(crate) yticklabels: TickLabels,
}

/// A grid of plots.
#[derive(Clone, Debug, PartialEq)]
pub struct GridPlot {
    pub(crate) shape: GridShape,
    pub(crate) panels: Vec<Panel>,
    pub(crate) xmode: AxisMode,
    pub(crate) ymode: AxisMode,
    pub(crate) width: Option<String>,
    pub(crate) height: Option<String>,
    pub(crate) xlabel: Option<String>,
    pub(crate) ylabel: Option<String>,
    pub(crate) xlimits: AxisLimits,
    pub(crate) ylimits: AxisLimits,
    pub(crate) mlimits: AxisLimits,
    pub(crate) slimits: Option<(f64, f64)>,
    pub(crate) xticks: Option<Vec<f64>>,
    pub(crate) yticks: Option<Vec<f64>>,
    pub(crate) colormap: Option<String>,
    pub(crate) colorbar: Option<Colorbar>,
    pub(crate) axis_options: Option<String>,
}

impl GridPlot {
    /// A `rows x columns` grid of empty cartesian plots.
    pub fn new(rows: usize, columns: usize) -> PlotResult<Self> {
        let count = rows.checked_mul(columns).ok_or(PlotError::Layout {
            rows,
            columns,
            panels: 0,
        })?;
        let panels = (0..count).map(|_| Plot::new()).collect();
        Self::from_panels(rows, columns, panels)
    }

    /// A grid over existing plots, row-major.
    pub fn from_panels(rows: usize, columns: usize, panels: Vec<Plot>) -> PlotResult<Self> {
        let shape = GridShape::new(rows, columns);
        shape.validate(panels.len())?;
        Ok(Self {
            shape,
            panels: panels
                .into_iter()
                .map(|plot| Panel {
                    plot,
                    ..Panel::default()
                })
                .collect(),
            xmode: AxisMode::Linear,
            ymode: AxisMode::Linear,
            width: None,
            height: None,
            xlabel: None,
            ylabel: None,
            xlimits: AxisLimits::default(),
            ylimits: AxisLimits::default(),
            mlimits: AxisLimits::default(),
            slimits: None,
            xticks: None,
            yticks: None,
            colormap: None,
            colorbar: None,
            axis_options: None,
        })
    }

    /// Sets the axis modes of the grid and every panel from the classic shorthand.
    pub fn with_axis(mut self, shorthand: &str) -> Self {
        let (xmode, ymode) = axis_modes(shorthand);
        self.xmode = xmode;
        self.ymode = ymode;
        for panel in &mut self.panels {
            panel.plot.xmode = xmode;
            panel.plot.ymode = ymode;
        }
        self
    }

    /// Overrides the width of every panel.
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Overrides the height of every panel.
    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// The grid shape.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// The panel at `(row, column)`.
    pub fn subplot(&self, row: usize, column: usize) -> PlotResult<&Plot> {
        let idx = self.shape.index(row, column)?;
        Ok(&self.panels[idx].plot)
    }

    /// The panel at `(row, column)`, for adding data.
    pub fn subplot_mut(&mut self, row: usize, column: usize) -> PlotResult<&mut Plot> {
        Ok(&mut self.panel_mut(row, column)?.plot)
    }

    fn panel_mut(&mut self, row: usize, column: usize) -> PlotResult<&mut Panel> {
        let idx = self.shape.index(row, column)?;
        Ok(&mut self.panels[idx])
    }

    fn each_panel(
        &mut self,
        cells: &[(usize, usize)],
        mut f: impl FnMut(&mut Panel) -> PlotResult<()>,
    ) -> PlotResult<()> {
        for &(row, column) in cells {
            f(self.panel_mut(row, column)?)?;
        }
        Ok(())
    }

    fn every_panel(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        f: impl FnMut(&mut Panel) -> PlotResult<()>,
    ) -> PlotResult<()> {
        match cells {
            Some(cells) => self.each_panel(cells, f),
            None => self.panels.iter_mut().try_for_each(f),
        }
    }

    /// Leaves a panel completely empty, without even an axis box.
    pub fn set_empty(&mut self, row: usize, column: usize) -> PlotResult<()> {
        self.panel_mut(row, column)?.empty = true;
        Ok(())
    }

    /// Leaves the listed panels empty.
    pub fn set_empty_for_all(&mut self, cells: &[(usize, usize)]) -> PlotResult<()> {
        self.each_panel(cells, |p| {
            p.empty = true;
            Ok(())
        })
    }

    /// Sets a panel title.
    pub fn set_title(
        &mut self,
        row: usize,
        column: usize,
        text: impl Into<String>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_title(text);
        Ok(())
    }

    /// Places a label inside a panel.
    pub fn set_label(
        &mut self,
        row: usize,
        column: usize,
        text: impl Into<String>,
        location: &str,
        style: Option<&str>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_label(text, location, style)
    }

    /// Always draws x tick labels on a panel, keeping any chosen side.
    pub fn show_xticklabels(&mut self, row: usize, column: usize) -> PlotResult<()> {
        let panel = self.panel_mut(row, column)?;
        panel.xticklabels = shown(panel.xticklabels);
        Ok(())
    }

    /// Always draws x tick labels on the listed panels, or on all of them.
    pub fn show_xticklabels_for_all(&mut self, cells: Option<&[(usize, usize)]>) -> PlotResult<()> {
        self.every_panel(cells, |p| {
            p.xticklabels = shown(p.xticklabels);
            Ok(())
        })
    }

    /// Always draws y tick labels on a panel, keeping any chosen side.
    pub fn show_yticklabels(&mut self, row: usize, column: usize) -> PlotResult<()> {
        let panel = self.panel_mut(row, column)?;
        panel.yticklabels = shown(panel.yticklabels);
        Ok(())
    }

    /// Always draws y tick labels on the listed panels, or on all of them.
    pub fn show_yticklabels_for_all(&mut self, cells: Option<&[(usize, usize)]>) -> PlotResult<()> {
        self.every_panel(cells, |p| {
            p.yticklabels = shown(p.yticklabels);
            Ok(())
        })
    }

    /// Never draws x tick labels on a panel.
    pub fn hide_xticklabels(&mut self, row: usize, column: usize) -> PlotResult<()> {
        self.panel_mut(row, column)?.xticklabels = TickLabels::Hide;
        Ok(())
    }

    /// Never draws y tick labels on a panel.
    pub fn hide_yticklabels(&mut self, row: usize, column: usize) -> PlotResult<()> {
        self.panel_mut(row, column)?.yticklabels = TickLabels::Hide;
        Ok(())
    }

    /// Draws a panel's x tick labels on the given side (bottom or top).
    pub fn set_xticklabels_position(
        &mut self,
        row: usize,
        column: usize,
        side: TickSide,
    ) -> PlotResult<()> {
        self.panel_mut(row, column)?.xticklabels = TickLabels::Show(side);
        Ok(())
    }

    /// Draws a panel's y tick labels on the given side (left or right).
    pub fn set_yticklabels_position(
        &mut self,
        row: usize,
        column: usize,
        side: TickSide,
    ) -> PlotResult<()> {
        self.panel_mut(row, column)?.yticklabels = TickLabels::Show(side);
        Ok(())
    }

    /// Sets a panel's x limits.
    pub fn set_xlimits(
        &mut self,
        row: usize,
        column: usize,
        min: Option<f64>,
        max: Option<f64>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_xlimits(min, max);
        Ok(())
    }

    /// Sets x limits of the listed panels, or the grid default.
    pub fn set_xlimits_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> PlotResult<()> {
        match cells {
            None => {
                self.xlimits = AxisLimits::new(min, max);
                Ok(())
            }
            Some(cells) => self.each_panel(cells, |p| {
                p.plot.set_xlimits(min, max);
                Ok(())
            }),
        }
    }

    /// Sets a panel's y limits.
    pub fn set_ylimits(
        &mut self,
        row: usize,
        column: usize,
        min: Option<f64>,
        max: Option<f64>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_ylimits(min, max);
        Ok(())
    }

    /// Sets y limits of the listed panels, or the grid default.
    pub fn set_ylimits_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> PlotResult<()> {
        match cells {
            None => {
                self.ylimits = AxisLimits::new(min, max);
                Ok(())
            }
            Some(cells) => self.each_panel(cells, |p| {
                p.plot.set_ylimits(min, max);
                Ok(())
            }),
        }
    }

    /// Sets a panel's color meta limits.
    pub fn set_mlimits(
        &mut self,
        row: usize,
        column: usize,
        min: Option<f64>,
        max: Option<f64>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_mlimits(min, max);
        Ok(())
    }

    /// Sets color meta limits of the listed panels, or the grid default.
    pub fn set_mlimits_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> PlotResult<()> {
        match cells {
            None => {
                self.mlimits = AxisLimits::new(min, max);
                Ok(())
            }
            Some(cells) => self.each_panel(cells, |p| {
                p.plot.set_mlimits(min, max);
                Ok(())
            }),
        }
    }

    /// Sets a panel's marker size range.
    pub fn set_slimits(&mut self, row: usize, column: usize, min: f64, max: f64) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_slimits(min, max);
        Ok(())
    }

    /// Sets the marker size range of the listed panels, or the grid default.
    pub fn set_slimits_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        min: f64,
        max: f64,
    ) -> PlotResult<()> {
        match cells {
            None => {
                self.slimits = Some((min, max));
                Ok(())
            }
            Some(cells) => self.each_panel(cells, |p| {
                p.plot.set_slimits(min, max);
                Ok(())
            }),
        }
    }

    /// Sets a panel's x ticks.
    pub fn set_xticks(
        &mut self,
        row: usize,
        column: usize,
        ticks: impl Into<Vec<f64>>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_xticks(ticks);
        Ok(())
    }

    /// Sets x ticks of the listed panels, or the grid default.
    pub fn set_xticks_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        ticks: impl Into<Vec<f64>>,
    ) -> PlotResult<()> {
        let ticks = ticks.into();
        match cells {
            None => {
                self.xticks = Some(ticks);
                Ok(())
            }
            Some(cells) => self.each_panel(cells, |p| {
                p.plot.set_xticks(ticks.clone());
                Ok(())
            }),
        }
    }

    /// Sets a panel's y ticks.
    pub fn set_yticks(
        &mut self,
        row: usize,
        column: usize,
        ticks: impl Into<Vec<f64>>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_yticks(ticks);
        Ok(())
    }

    /// Sets y ticks of the listed panels, or the grid default.
    pub fn set_yticks_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        ticks: impl Into<Vec<f64>>,
    ) -> PlotResult<()> {
        let ticks = ticks.into();
        match cells {
            None => {
                self.yticks = Some(ticks);
                Ok(())
            }
            Some(cells) => self.each_panel(cells, |p| {
                p.plot.set_yticks(ticks.clone());
                Ok(())
            }),
        }
    }

    /// Sets a panel's x ticks at `10^e`.
    pub fn set_logxticks(
        &mut self,
        row: usize,
        column: usize,
        exponents: &[i32],
    ) -> PlotResult<()> {
        self.set_xticks(row, column, log_ticks(exponents))
    }

    /// Sets x ticks at `10^e` on the listed panels, or as the grid default.
    pub fn set_logxticks_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        exponents: &[i32],
    ) -> PlotResult<()> {
        self.set_xticks_for_all(cells, log_ticks(exponents))
    }

    /// Sets a panel's y ticks at `10^e`.
    pub fn set_logyticks(
        &mut self,
        row: usize,
        column: usize,
        exponents: &[i32],
    ) -> PlotResult<()> {
        self.set_yticks(row, column, log_ticks(exponents))
    }

    /// Sets y ticks at `10^e` on the listed panels, or as the grid default.
    pub fn set_logyticks_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        exponents: &[i32],
    ) -> PlotResult<()> {
        self.set_yticks_for_all(cells, log_ticks(exponents))
    }

    /// Sets the x tick label text of the listed panels, or of all of them.
    pub fn set_xtick_labels_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        labels: &[&str],
    ) -> PlotResult<()> {
        self.every_panel(cells, |p| {
            p.plot.set_xtick_labels(labels.iter().copied());
            Ok(())
        })
    }

    /// Sets the y tick label text of the listed panels, or of all of them.
    pub fn set_ytick_labels_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        labels: &[&str],
    ) -> PlotResult<()> {
        self.every_panel(cells, |p| {
            p.plot.set_ytick_labels(labels.iter().copied());
            Ok(())
        })
    }

    /// Sets extra options of one panel.
    pub fn set_axis_options(
        &mut self,
        row: usize,
        column: usize,
        text: impl Into<String>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_axis_options(text);
        Ok(())
    }

    /// Sets extra options of the listed panels, or of the whole grid.
    pub fn set_axis_options_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        text: impl Into<String>,
    ) -> PlotResult<()> {
        let text = text.into();
        match cells {
            None => {
                self.axis_options = Some(text);
                Ok(())
            }
            Some(cells) => self.each_panel(cells, |p| {
                p.plot.set_axis_options(text.clone());
                Ok(())
            }),
        }
    }

    /// Shows a scale bar on the listed panels, or on all of them.
    pub fn set_scalebar_for_all(
        &mut self,
        cells: Option<&[(usize, usize)]>,
        location: &str,
    ) -> PlotResult<()> {
        self.every_panel(cells, |p| p.plot.set_scalebar(location))
    }

    /// Sets the shared x label, drawn once under the grid.
    pub fn set_xlabel(&mut self, text: impl Into<String>) {
        self.xlabel = Some(text.into());
    }

    /// Sets the shared y label, drawn once left of the grid.
    pub fn set_ylabel(&mut self, text: impl Into<String>) {
        self.ylabel = Some(text.into());
    }

    /// Sets the x label of one panel.
    pub fn set_subplot_xlabel(
        &mut self,
        row: usize,
        column: usize,
        text: impl Into<String>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_xlabel(text);
        Ok(())
    }

    /// Sets the y label of one panel.
    pub fn set_subplot_ylabel(
        &mut self,
        row: usize,
        column: usize,
        text: impl Into<String>,
    ) -> PlotResult<()> {
        self.subplot_mut(row, column)?.set_ylabel(text);
        Ok(())
    }

    /// Sets the colormap of every panel.
    pub fn set_colormap(&mut self, name: impl Into<String>) {
        self.colormap = Some(name.into());
    }

    /// Shows a color bar, attached to the last panel.
    ///
    /// The bar only matches every panel when grid-wide color meta limits are set.
    pub fn set_colorbar(&mut self, label: impl Into<String>, horizontal: bool) {
        if self.mlimits.both().is_none() {
            tracing::warn!(
                "colorbar without grid-wide color meta limits may not match every panel"
            );
        }
        self.colorbar = Some(Colorbar {
            label: label.into(),
            horizontal,
        });
    }
}

fn shown(current: TickLabels) -> TickLabels {
    match current {
        TickLabels::Show(side) => TickLabels::Show(side),
        TickLabels::Auto | TickLabels::Hide => TickLabels::Show(TickSide::Standard),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn flags(grid: &GridPlot, row: usize, column: usize) -> TickVisibility {
        let p = &grid.panels[grid.shape.index(row, column).unwrap()];
        TickVisibility::for_panel(grid.shape, row, column, p.xticklabels, p.yticklabels)
    }

    #[test]
    fn two_by_three_border_rule() {
        let grid = GridPlot::new(2, 3).unwrap();
        for column in 0..3 {
            let f = flags(&grid, 0, column);
            assert!(f.top && !f.bottom, "row 0 column {column}: {f:?}");
            let f = flags(&grid, 1, column);
            assert!(!f.top && f.bottom, "row 1 column {column}: {f:?}");
        }
        assert!(flags(&grid, 1, 0).left);
        assert!(!flags(&grid, 1, 1).left && !flags(&grid, 1, 1).right);
        assert!(flags(&grid, 0, 2).right);
    }

    #[test]
    fn interior_rows_show_no_x_tick_labels() {
        let grid = GridPlot::new(3, 2).unwrap();
        for column in 0..2 {
            let f = flags(&grid, 1, column);
            assert!(!f.top && !f.bottom, "row 1 column {column}: {f:?}");
        }
        assert!(flags(&grid, 0, 0).top);
        assert!(flags(&grid, 2, 1).bottom);
    }

    #[test]
    fn single_row_and_column_keep_standard_sides() {
        let f = TickVisibility::for_panel(
            GridShape::new(1, 1),
            0,
            0,
            TickLabels::Auto,
            TickLabels::Auto,
        );
        assert_eq!(
            f,
            TickVisibility {
                top: false,
                bottom: true,
                left: true,
                right: false
            }
        );
    }

    #[test]
    fn overrides_replace_the_border_rule() {
        let mut grid = GridPlot::new(2, 2).unwrap();
        grid.show_xticklabels(0, 1).unwrap();
        grid.set_yticklabels_position(0, 1, TickSide::Opposite).unwrap();
        grid.hide_xticklabels(1, 0).unwrap();
        let f = flags(&grid, 0, 1);
        assert!(f.bottom && !f.top && f.right && !f.left, "{f:?}");
        let f = flags(&grid, 1, 0);
        assert!(!f.bottom && !f.top && f.left, "{f:?}");

        grid.set_xticklabels_position(1, 1, TickSide::Opposite).unwrap();
        grid.show_xticklabels_for_all(None).unwrap();
        assert!(flags(&grid, 1, 1).top, "show keeps the chosen side");
    }

    #[test]
    fn layout_is_validated() {
        assert_eq!(
            GridPlot::from_panels(2, 2, vec![Plot::new()]).err(),
            Some(PlotError::Layout {
                rows: 2,
                columns: 2,
                panels: 1
            })
        );
        assert!(GridPlot::new(0, 3).is_err());
        assert_eq!(
            GridPlot::new(usize::MAX, 2).err(),
            Some(PlotError::Layout {
                rows: usize::MAX,
                columns: 2,
                panels: 0
            })
        );
        assert!(GridShape::new(usize::MAX, 2).validate(2).is_err());
        let mut grid = GridPlot::new(1, 2).unwrap();
        assert_eq!(
            grid.subplot_mut(1, 0).err(),
            Some(PlotError::PanelOutOfRange { row: 1, column: 0 })
        );
        assert_eq!(GridShape::new(2, 3).position(4), (1, 1));
    }

    #[test]
    fn for_all_without_cells_sets_grid_defaults() {
        let mut grid = GridPlot::new(1, 2).unwrap();
        grid.set_xlimits_for_all(None, Some(0.0), Some(1.0)).unwrap();
        grid.set_xlimits_for_all(Some(&[(0, 1)]), Some(5.0), None).unwrap();
        assert_eq!(grid.xlimits, AxisLimits::new(Some(0.0), Some(1.0)));
        assert_eq!(grid.panels[0].plot.xlimits, AxisLimits::default());
        assert_eq!(grid.panels[1].plot.xlimits.min, Some(5.0));
        grid.set_empty_for_all(&[(0, 0)]).unwrap();
        assert!(grid.panels[0].empty);
        assert!(grid.set_scalebar_for_all(None, "upper left").is_ok());
    }
}
