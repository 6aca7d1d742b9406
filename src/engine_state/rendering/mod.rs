//! Render synchronization for the voxel sandbox.
//!
//! The store never talks to a renderer. It queues `WorldEvent`s, and `RenderSync`
//! drains them once per tick and drives a `VisualSink`: one visual object is
//! created for every placed block and destroyed with it. A graphics backend
//! implements `VisualSink`; `HeadlessVisuals` is the sink used when there is no
//! graphics context, in the CLI and in tests.

use std::collections::HashMap;

use cgmath::Point3;

use super::voxels::{
    block::{block_type::BlockType, VisualHandle},
    world::{VoxelStore, WorldEvent},
};

/// A render collaborator that owns one visual object per block.
pub trait VisualSink {
    /// The backend's handle to a drawable object.
    type Visual;

    /// Creates the visual for a newly placed block.
    fn create_visual(&mut self, coord: Point3<i32>, block_type: BlockType) -> Self::Visual;

    /// Discards the visual of a removed block.
    fn destroy_visual(&mut self, visual: Self::Visual);
}

/// Counts of the visual changes made by one sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub created: usize,
    pub destroyed: usize,
}

/// Mirrors a `VoxelStore` into a `VisualSink`.
pub struct RenderSync<S: VisualSink> {
    sink: S,
    visuals: HashMap<VisualHandle, S::Visual>,
}

impl<S: VisualSink> RenderSync<S> {
    pub fn new(sink: S) -> Self {
        RenderSync {
            sink,
            visuals: HashMap::new(),
        }
    }

    /// Drains the store's pending events and applies them to the sink, in order.
    ///
    /// # Returns
    /// How many visuals were created and destroyed
    pub fn sync(&mut self, store: &mut VoxelStore) -> SyncStats {
        let mut stats = SyncStats::default();

        for event in store.drain_events() {
            match event {
                WorldEvent::Placed {
                    coord,
                    block_type,
                    handle,
                } => {
                    let visual = self.sink.create_visual(coord, block_type);
                    if let Some(stale) = self.visuals.insert(handle, visual) {
                        log::warn!("Visual handle {:?} was bound twice", handle);
                        self.sink.destroy_visual(stale);
                        stats.destroyed += 1;
                    }
                    stats.created += 1;
                }
                WorldEvent::Removed { coord, handle } => match self.visuals.remove(&handle) {
                    Some(visual) => {
                        self.sink.destroy_visual(visual);
                        stats.destroyed += 1;
                    }
                    None => {
                        log::warn!("No visual bound to {:?} removed at {:?}", handle, coord);
                    }
                },
            }
        }

        if stats != SyncStats::default() {
            log::trace!(
                "Render sync: {} created, {} destroyed, {} live",
                stats.created,
                stats.destroyed,
                self.visuals.len()
            );
        }
        stats
    }

    /// Number of visuals currently bound to blocks.
    pub fn live_count(&self) -> usize {
        self.visuals.len()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Identifier of a visual recorded by `HeadlessVisuals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeadlessVisual(u64);

/// A sink that only records what a renderer would have drawn.
#[derive(Debug, Default)]
pub struct HeadlessVisuals {
    live: HashMap<HeadlessVisual, (Point3<i32>, BlockType)>,
    next_id: u64,
    created_total: usize,
    destroyed_total: usize,
}

impl HeadlessVisuals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of visuals that exist right now.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Visuals created since startup.
    pub fn created_total(&self) -> usize {
        self.created_total
    }

    /// Visuals destroyed since startup.
    pub fn destroyed_total(&self) -> usize {
        self.destroyed_total
    }

    /// The block type drawn at `coord`, if a visual exists there.
    pub fn visual_at(&self, coord: Point3<i32>) -> Option<BlockType> {
        self.live
            .values()
            .find(|(at, _)| *at == coord)
            .map(|(_, block_type)| *block_type)
    }
}

impl VisualSink for HeadlessVisuals {
    type Visual = HeadlessVisual;

    fn create_visual(&mut self, coord: Point3<i32>, block_type: BlockType) -> HeadlessVisual {
        let visual = HeadlessVisual(self.next_id);
        self.next_id += 1;
        self.created_total += 1;
        log::trace!(
            "Visual {} for {} (#{:06X}) at {:?}",
            visual.0,
            block_type,
            block_type.color(),
            coord
        );
        self.live.insert(visual, (coord, block_type));
        visual
    }

    fn destroy_visual(&mut self, visual: HeadlessVisual) {
        if self.live.remove(&visual).is_some() {
            self.destroyed_total += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_mirrors_store() {
        let mut store = VoxelStore::new();
        let mut render_sync = RenderSync::new(HeadlessVisuals::new());

        for x in 0..4 {
            store.place(Point3::new(x, 0, 0), BlockType::DIRT);
        }
        let stats = render_sync.sync(&mut store);
        assert_eq!(stats, SyncStats { created: 4, destroyed: 0 });
        assert_eq!(render_sync.live_count(), store.len());

        store.remove(Point3::new(1, 0, 0));
        store.place(Point3::new(1, 1, 0), BlockType::WOOD);
        render_sync.sync(&mut store);

        assert_eq!(render_sync.sink().live_count(), store.len());
        assert_eq!(render_sync.sink().visual_at(Point3::new(1, 0, 0)), None);
        assert_eq!(
            render_sync.sink().visual_at(Point3::new(1, 1, 0)),
            Some(BlockType::WOOD)
        );
    }

    #[test]
    fn test_noop_edits_touch_no_visuals() {
        let mut store = VoxelStore::new();
        let mut render_sync = RenderSync::new(HeadlessVisuals::new());
        store.place(Point3::new(0, 0, 0), BlockType::GRASS);
        render_sync.sync(&mut store);

        store.place(Point3::new(0, 0, 0), BlockType::STONE);
        store.remove(Point3::new(9, 9, 9));
        assert_eq!(render_sync.sync(&mut store), SyncStats::default());
        assert_eq!(render_sync.sink().created_total(), 1);
        assert_eq!(render_sync.sink().destroyed_total(), 0);
    }

    #[test]
    fn test_place_and_remove_before_sync() {
        let mut store = VoxelStore::new();
        let mut render_sync = RenderSync::new(HeadlessVisuals::new());
        store.place(Point3::new(0, 0, 0), BlockType::GRASS);
        store.remove(Point3::new(0, 0, 0));

        let stats = render_sync.sync(&mut store);
        assert_eq!(stats, SyncStats { created: 1, destroyed: 1 });
        assert_eq!(render_sync.live_count(), 0);
    }
}
