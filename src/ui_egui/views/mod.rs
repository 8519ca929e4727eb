pub mod grid_view;
