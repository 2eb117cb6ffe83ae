pub mod config;
pub mod detail;
pub mod icons;
pub mod mode;
pub mod selection;
