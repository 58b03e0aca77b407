pub mod config;
pub mod logger;

pub use config::{config_path, get_data_dir, load_app_config, save_app_config};
pub use logger::init_logger;
