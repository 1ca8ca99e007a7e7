pub mod charts;
pub mod globe;
pub mod map;
pub mod popup;
pub mod status;
pub mod tables;
