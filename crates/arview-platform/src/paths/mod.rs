mod ensure;
mod resolve;

pub use ensure::ensure_dirs;
pub use resolve::{
    ai_settings_file, cache_dir, config_dir, config_file, data_dir, instance_socket, log_dir,
    runtime_dir, state_file,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_arview() {
        let path = config_dir().unwrap();
        assert!(path.ends_with("arview"), "got: {path:?}");
    }

    #[test]
    fn data_dir_ends_with_arview() {
        let path = data_dir().unwrap();
        assert!(path.ends_with("arview"), "got: {path:?}");
    }

    #[test]
    fn config_file_has_correct_name() {
        let path = config_file().unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "config.toml");
        assert!(path.parent().unwrap().ends_with("arview"));
    }

    #[test]
    fn state_files_live_in_data_dir() {
        let data = data_dir().unwrap();
        assert!(state_file().unwrap().starts_with(&data));
        assert_eq!(
            ai_settings_file().unwrap().file_name().unwrap(),
            "ai_chat_config.json"
        );
    }

    #[test]
    fn log_dir_is_inside_data_dir() {
        let log = log_dir().unwrap();
        assert!(log.starts_with(data_dir().unwrap()));
        assert_eq!(log.file_name().unwrap().to_str().unwrap(), "logs");
    }

    #[test]
    fn instance_socket_is_named() {
        assert_eq!(instance_socket().file_name().unwrap(), "arview.sock");
    }
}
