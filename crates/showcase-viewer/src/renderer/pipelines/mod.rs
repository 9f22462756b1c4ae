pub mod ground_grid;
