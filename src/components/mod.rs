pub mod position_canvas;
