pub mod about_dialog;
pub mod color_bar;
pub mod controls;
pub mod map_view;
