#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! The core of a minimal first-person voxel sandbox: a sparse block world, the
//! discrete physics that moves the player through it, and the raycast picking
//! that lets the player add and remove blocks.
//!
//! ## Key Modules
//!
//! * `application_state` - Input latching and the headless application loop
//! * `config` - JSON configuration with defaults for every constant
//! * `engine_state` - The world, the player, picking, interaction and render sync
//!
//! ## Architecture
//!
//! The engine keeps a strict separation between:
//! * The world model (`VoxelStore`), the single source of truth for solidity
//! * Physics and interaction, which read and edit the world through narrow APIs
//! * Collaborators (input, rendering), which feed the engine or mirror its changes
//!
//! ## Usage
//!
//! ```rust
//! use voxel_sandbox::application_state::{HeadlessApplication, IdleScript};
//! use voxel_sandbox::config::SandboxConfig;
//!
//! let mut app = HeadlessApplication::new(&SandboxConfig::default(), Box::new(IdleScript));
//! let summary = app.run(120);
//! assert_eq!(summary.block_count, summary.live_visuals);
//! ```

pub mod application_state;
pub mod config;
pub mod engine_state;

/// Initializes `env_logger`, writing to stdout and filtered by `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG");

    if log_builder.try_init().is_ok() {
        log::info!("Logger initialized");
    }
}
