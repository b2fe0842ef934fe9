//! Observation hooks for packing runs.

use crate::geometry::Cuboid;
use crate::placement::StackPlacement;
use crate::result::PackResult;
use std::sync::{Arc, Mutex};

/// Receives notifications while a container is being packed.
///
/// All methods default to doing nothing. They are called synchronously from
/// the packing thread and must return quickly.
pub trait PackListener: Send + Sync {
    /// The free spaces of a level were computed, once when the level is
    /// measured and again after every placement in it. Coordinates are
    /// absolute.
    fn free_space_calculated(&self, _container: &str, _level: usize, _free: &[Cuboid]) {}

    /// A placement was committed.
    fn placement_added(&self, _container: &str, _placement: &StackPlacement) {}

    /// A level was opened.
    fn level_added(&self, _container: &str, _level: usize) {}

    /// Packing finished with a result.
    fn pack_done(&self, _container: &str, _result: &PackResult) {}
}

/// A listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl PackListener for NoopListener {}

/// Events recorded by [`RecordingListener`].
#[derive(Debug, Clone, PartialEq)]
pub enum PackEvent {
    FreeSpace { level: usize, free: Vec<Cuboid> },
    Placement { name: String, x: i64, y: i64, z: i64 },
    Level(usize),
    Done { placed: usize, leftovers: usize },
}

/// A listener that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<PackEvent>>,
}

impl RecordingListener {
    /// Creates a shared recording listener.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns a copy of the recorded events.
    pub fn events(&self) -> Vec<PackEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn push(&self, event: PackEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl PackListener for RecordingListener {
    fn free_space_calculated(&self, _container: &str, level: usize, free: &[Cuboid]) {
        self.push(PackEvent::FreeSpace {
            level,
            free: free.to_vec(),
        });
    }

    fn placement_added(&self, _container: &str, placement: &StackPlacement) {
        self.push(PackEvent::Placement {
            name: placement.stackable().name().to_string(),
            x: placement.x(),
            y: placement.y(),
            z: placement.z(),
        });
    }

    fn level_added(&self, _container: &str, level: usize) {
        self.push(PackEvent::Level(level));
    }

    fn pack_done(&self, _container: &str, result: &PackResult) {
        self.push(PackEvent::Done {
            placed: result.placed_count(),
            leftovers: result.leftovers.len(),
        });
    }
}
