//! Live config reload manager.
//!
//! Combines the file watcher with config loading so the running app sees
//! a fresh, validated config every time `config.toml` changes on disk.

mod manager;


pub use manager::ReloadManager;
