//! # Voxel World Core
//!
//! This module contains the voxel world model, providing the foundation for
//! representing, querying and seeding the block world.
//!
//! ## Architecture
//!
//! * **Block**: Defines block types, faces, and the immutable block record
//! * **World**: The sparse `VoxelStore`, the only owner of blocks
//! * **Queries**: Ground height and footprint collision on floored coordinates
//! * **Terrain**: Producers that seed the store before the first tick
//!
//! ## Data Flow
//!
//! 1. Terrain generation or the interaction handler asks the store to place/remove
//! 2. The store records a `WorldEvent` for each effective change
//! 3. Physics reads the store through `WorldQuery`
//! 4. The render sync drains events and mirrors them as visual objects
//!
//! ## Thread Safety
//!
//! The store is a plain owned value and the sandbox runs one tick at a time on a
//! single thread. Anything that generates terrain in the background must hand its
//! placements back to the owning thread rather than share the store.

pub mod block;
pub mod queries;
pub mod terrain;
pub mod world;
