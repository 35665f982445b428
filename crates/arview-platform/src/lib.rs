//! OS-facing services: directories, the on-disk state store, single-instance
//! handoff, parent-process liveness, and the SyncTeX / Neovim bridge.

pub mod forward_search;
pub mod instance;
pub mod nvim;
pub mod paths;
pub mod process;
pub mod store;
pub mod synctex;

pub use forward_search::{ForwardSearchServer, FORWARD_SEARCH_SOCKET};
pub use instance::{acquire_instance, InstanceListener, InstanceRole};
pub use nvim::{NvimClient, NVIM_SOCKET};
pub use paths::{
    ai_settings_file, cache_dir, config_dir, config_file, data_dir, ensure_dirs, instance_socket,
    log_dir, runtime_dir, state_file,
};
pub use process::{is_process_alive, watch_parent, PARENT_POLL_INTERVAL};
pub use store::JsonFileStore;
pub use synctex::{PdfLocation, SourceLocation, SyncTex};
