//! TOML config file loading and creation.

mod loader;
mod paths;
mod template;


pub use loader::{load_default, load_from_path};
pub use paths::{create_default_config, default_config_path, APP_DIR};

/// The commented default `config.toml`.
pub fn template_text() -> &'static str {
    template::default_config_toml()
}
