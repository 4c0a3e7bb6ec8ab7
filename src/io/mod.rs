pub mod settings;

pub use settings::save_settings;
