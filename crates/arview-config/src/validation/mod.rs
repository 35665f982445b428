//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects the problems into a single `ConfigError`.

mod appearance;
mod helpers;
mod misc;

#[cfg(test)]
mod tests;

pub use helpers::is_hex_color;

use crate::schema::ArviewConfig;
use arview_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ArviewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    appearance::validate_appearance(&mut errors, config);
    appearance::validate_tabs(&mut errors, config);
    misc::validate_pdf_viewer(&mut errors, config);
    misc::validate_file_watching(&mut errors, config);
    misc::validate_session(&mut errors, config);
    misc::validate_command_palette(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
