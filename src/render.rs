use rayon::prelude::*;

use crate::config::LandformParams;
use crate::grid::Grid;

/// Grayscale heightmap: the normalized height scaled to `0..=255`
/// (truncating); rejected samples are black.
pub fn render_heightmap(heights: &Grid<Option<f64>>, params: &LandformParams) -> Vec<u8> {
    let w = heights.w;
    let mut pixels = vec![0u8; w * heights.h];
    if w == 0 {
        return pixels;
    }

    pixels
        .par_chunks_mut(w)
        .zip(heights.data.par_chunks(w))
        .for_each(|(row, cells)| {
            for (px, cell) in row.iter_mut().zip(cells) {
                *px = match cell {
                    Some(h) => (params.normalize(*h) * 255.0) as u8,
                    None => 0,
                };
            }
        });

    pixels
}

/// Cross-section silhouette: solid white, air black.
pub fn render_cross_section(section: &Grid<Option<f64>>) -> Vec<u8> {
    section
        .data
        .par_iter()
        .map(|cell| if cell.is_some() { 255 } else { 0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LandformDef;

    #[test]
    fn heightmap_intensity_tracks_height() {
        let params = LandformParams::from(LandformDef {
            base_height: 100.0,
            height_offset: 50.0,
            ..Default::default()
        });
        let mut g = Grid::new(3, 1);
        g.set(0, 0, Some(100.0));
        g.set(1, 0, Some(125.0));
        g.set(2, 0, None);
        assert_eq!(render_heightmap(&g, &params), vec![0, 127, 0]);
    }

    #[test]
    fn cross_section_is_binary() {
        let mut g = Grid::new(2, 2);
        g.set(1, 1, Some(0.3));
        assert_eq!(render_cross_section(&g), vec![0, 0, 0, 255]);
    }
}
