// gridfill/src/plot.rs

use ndarray::ArrayView2;
use plotly::{HeatMap, Plot};

/// Heat-map of a 2-D grid, first row at the bottom.
pub fn make_grid_heatmap(grid: &ArrayView2<'_, f64>) -> Plot {
    let z: Vec<Vec<f64>> = grid.outer_iter().map(|row| row.to_vec()).collect();
    let mut plot = Plot::new();
    plot.add_trace(HeatMap::new_z(z));
    plot
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_heatmap_trace() {
        let grid = array![[1.0, 2.0], [3.0, 4.0]];
        let json = make_grid_heatmap(&grid.view()).to_json();
        assert!(json.contains("heatmap"));
        assert!(json.contains("[3.0,4.0]"));
    }
}
