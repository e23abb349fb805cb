pub mod statistics;
pub mod vector;
