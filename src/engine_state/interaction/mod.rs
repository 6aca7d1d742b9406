//! # Interaction
//!
//! Everything between a mouse click and a world edit.
//!
//! ## Components
//!
//! * `pick` - Casts the camera ray and reports the nearest struck face, block or
//!   special target, up to a search horizon
//! * `handler` - Applies the special-target and reach rules and mutates the store
//!
//! The resolver is pure; only the handler writes to the `VoxelStore`, and only
//! through `place` and `remove`.

pub mod handler;
pub mod pick;
