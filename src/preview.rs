//! Bulk sampling of a landform into preview grids.
//!
//! Rows are independent and sampled in parallel. A cancellation flag, when
//! given, is polled before each row; cancelled runs return
//! [`Error::Cancelled`] instead of a partial grid.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::config::{RemapMode, RenderConfig};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::sampler::{HeightSampler, RemapQuery};

#[inline]
fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|c| c.load(Ordering::Relaxed))
}

/// Normalized level of a pixel row, 0 at the top.
#[inline]
fn row_fraction(row: usize, size: usize) -> f64 {
    row as f64 / (size.saturating_sub(1)).max(1) as f64
}

/// Top-down heightmap: `heights[row][col]` is the sample at
/// `(origin_x + col / zoom, origin_z + row / zoom)`.
///
/// In vertical remap mode the row's normalized position is the remap query.
pub fn sample_heightmap(
    sampler: &HeightSampler<'_>,
    config: &RenderConfig,
    cancel: Option<&AtomicBool>,
) -> Result<Grid<Option<f64>>> {
    config.validate()?;
    let n = config.size;
    let mode = sampler.params().remap_mode;
    let mut grid = Grid::new(n, n);

    grid.data.par_chunks_mut(n).enumerate().for_each(|(row, cells)| {
        if is_cancelled(cancel) {
            return;
        }
        let z = config.world(config.origin_z, row);
        let query = RemapQuery::for_mode(mode, row_fraction(row, n));
        for (col, cell) in cells.iter_mut().enumerate() {
            let x = config.world(config.origin_x, col);
            *cell = sampler.sample_with(x, z, query);
        }
    });

    if is_cancelled(cancel) {
        return Err(Error::Cancelled);
    }
    Ok(grid)
}

/// Vertical silhouette along `z = slice_z`. Row 0 is the top of the height
/// range. A cell holds the height that filled it, `None` for air.
pub fn sample_cross_section(
    sampler: &HeightSampler<'_>,
    config: &RenderConfig,
    cancel: Option<&AtomicBool>,
) -> Result<Grid<Option<f64>>> {
    config.validate()?;
    let n = config.size;
    let params = sampler.params();
    let z = config.slice_z;
    let mut grid = Grid::new(n, n);

    match params.remap_mode {
        RemapMode::Total => {
            let columns: Vec<Option<f64>> = (0..n)
                .into_par_iter()
                .map(|col| sampler.sample(config.world(config.origin_x, col), z))
                .collect();
            grid.data.par_chunks_mut(n).enumerate().for_each(|(row, cells)| {
                if is_cancelled(cancel) {
                    return;
                }
                let level = 1.0 - row_fraction(row, n);
                for (cell, column) in cells.iter_mut().zip(&columns) {
                    *cell = column.filter(|&h| params.normalize(h) >= level);
                }
            });
        }
        RemapMode::Vertical => {
            grid.data.par_chunks_mut(n).enumerate().for_each(|(row, cells)| {
                if is_cancelled(cancel) {
                    return;
                }
                let level = 1.0 - row_fraction(row, n);
                let query = RemapQuery::Level(level);
                for (col, cell) in cells.iter_mut().enumerate() {
                    let x = config.world(config.origin_x, col);
                    *cell = sampler
                        .sample_with(x, z, query)
                        .filter(|&h| params.normalize(h) >= level);
                }
            });
        }
    }

    if is_cancelled(cancel) {
        return Err(Error::Cancelled);
    }
    Ok(grid)
}
