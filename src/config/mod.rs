pub mod data;
pub mod settings;

pub use settings::AppConfig;
