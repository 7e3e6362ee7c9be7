pub mod load;
pub mod types;

pub use load::{get_config_path, get_data_dir, load_default, load_from};
pub use types::{AppConfig, BackendConfig, LoggingConfig};
