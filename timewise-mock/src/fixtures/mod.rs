pub mod frames;
pub mod series;
