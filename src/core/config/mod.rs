pub mod data;
pub mod io;
pub mod printing;


pub use data::{resolve_base_url, Config, ConfigKey};
pub use io::ConfigError;
