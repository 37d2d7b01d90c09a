pub mod color;
pub mod coverage;
pub mod form;
pub mod models;
pub mod predict;
pub mod regions;
pub mod session;
