pub mod geodesy;

pub use geodesy::{compass_point, qibla_from};
