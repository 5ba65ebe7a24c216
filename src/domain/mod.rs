pub mod classifier;
pub mod keywords;
pub mod models;
