//! Fast largest-area-fit-first packing, one floor per level.
//!
//! Every level is started by the best ranked item at the level origin, which
//! fixes the level height. The rest of the floor is then filled with items no
//! taller than the level, anchored at the floor's extreme points. Nothing is
//! stacked inside a level.

use crate::extreme_points::ExtremePoints2D;
use crate::point::Point2D;
use std::cmp::Ordering;
use std::sync::Arc;
use u_packing_core::comparator::{LargestAreaFitFirst, PlacementComparator};
use u_packing_core::container::Container;
use u_packing_core::geometry::{Cuboid, StackValue, Stackable};
use u_packing_core::listener::{NoopListener, PackListener};
use u_packing_core::placement::StackPlacement;
use u_packing_core::result::{LevelPacker, PackOutcome, PackResult};
use u_packing_core::stack::LevelStack;
use u_packing_core::Result;

/// Floor-only largest-area-fit-first packer.
pub struct FastLaffPacker<C = LargestAreaFitFirst> {
    comparator: C,
    listener: Arc<dyn PackListener>,
}

impl Default for FastLaffPacker<LargestAreaFitFirst> {
    fn default() -> Self {
        Self::new(LargestAreaFitFirst::default())
    }
}

impl<C: PlacementComparator<Point2D>> FastLaffPacker<C> {
    /// Creates a packer ranking candidates with `comparator`.
    pub fn new(comparator: C) -> Self {
        Self {
            comparator,
            listener: Arc::new(NoopListener),
        }
    }

    /// Sets the listener notified while packing.
    pub fn with_listener(mut self, listener: Arc<dyn PackListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Returns the comparator.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    // Picks the item and rotation starting the next level.
    fn first(
        &self,
        levels: &LevelStack,
        remaining: &[Arc<Stackable>],
        origin: &Point2D,
        free_weight: i64,
        free_dz: i64,
        z: i64,
    ) -> Result<Option<(usize, StackValue)>> {
        let constraint = levels.constraint();
        let mut best: Option<(usize, StackValue)> = None;

        for (i, stackable) in remaining.iter().enumerate() {
            if stackable.weight() > free_weight {
                continue;
            }
            if let Some(constraint) = constraint {
                if !constraint.accepts(levels.stack(), stackable)? {
                    continue;
                }
            }

            for value in stackable.stack_values() {
                if value.is_degenerate() || value.dz > free_dz || !origin.fits(value) {
                    continue;
                }
                if let Some(constraint) = constraint {
                    if !constraint.supports(levels.stack(), stackable, value, 0, 0, z)? {
                        continue;
                    }
                }

                let better = match &best {
                    None => true,
                    Some((best_index, best_value)) => {
                        self.comparator
                            .compare_first_stackable(stackable, &remaining[*best_index])
                            .then_with(|| {
                                self.comparator
                                    .compare_first_value(origin, value, origin, best_value)
                            })
                            == Ordering::Less
                    }
                };
                if better {
                    best = Some((i, *value));
                }
            }
        }

        Ok(best)
    }

    // Picks the next item, rotation and point within the current level.
    fn next(
        &self,
        levels: &LevelStack,
        remaining: &[Arc<Stackable>],
        points: &ExtremePoints2D,
        level_weight: i64,
        level_height: i64,
        z: i64,
    ) -> Result<Option<(usize, StackValue, usize)>> {
        let constraint = levels.constraint();
        let max_area = points.max_area();
        let mut best: Option<(usize, StackValue, usize)> = None;

        for (i, stackable) in remaining.iter().enumerate() {
            if stackable.weight() > level_weight || stackable.minimum_area() > max_area {
                continue;
            }
            if let Some(constraint) = constraint {
                if !constraint.accepts(levels.stack(), stackable)? {
                    continue;
                }
            }

            for value in stackable.stack_values() {
                if value.is_degenerate() || value.dz > level_height || value.area() > max_area {
                    continue;
                }

                for (point_index, point) in points.values().iter().enumerate() {
                    if !point.fits(value) {
                        continue;
                    }
                    if let Some(constraint) = constraint {
                        if !constraint.supports(
                            levels.stack(),
                            stackable,
                            value,
                            point.min_x(),
                            point.min_y(),
                            z,
                        )? {
                            continue;
                        }
                    }

                    let better = match &best {
                        None => true,
                        Some((best_index, best_value, best_point)) => {
                            self.comparator
                                .compare_next_stackable(stackable, &remaining[*best_index])
                                .then_with(|| {
                                    self.comparator.compare_next_value(
                                        point,
                                        value,
                                        &points.values()[*best_point],
                                        best_value,
                                    )
                                })
                                == Ordering::Less
                        }
                    };
                    if better {
                        best = Some((i, *value, point_index));
                    }
                }
            }
        }

        Ok(best)
    }
}

impl<C: PlacementComparator<Point2D>> LevelPacker for FastLaffPacker<C> {
    fn pack(
        &self,
        items: &[Arc<Stackable>],
        container: &Container,
        interrupt: &(dyn Fn() -> bool + Sync),
    ) -> Result<PackOutcome> {
        let name = container.name();
        let mut levels = LevelStack::new(container)?;
        let max_load_volume = levels.value().max_load_volume;

        let mut remaining = Vec::with_capacity(items.len());
        let mut leftovers = Vec::new();
        for stackable in items {
            let accepted = stackable.is_placeable()
                && stackable.volume() <= max_load_volume
                && stackable.weight() <= container.max_load_weight()
                && match levels.constraint() {
                    Some(constraint) => constraint.can_accept(stackable)?,
                    None => true,
                };
            if accepted {
                remaining.push(stackable.clone());
            } else {
                leftovers.push(stackable.clone());
            }
        }

        let mut points = ExtremePoints2D::new();

        while !remaining.is_empty() {
            if interrupt() {
                log::debug!("Packing '{}' interrupted", name);
                return Ok(PackOutcome::Interrupted);
            }

            let (load_dx, load_dy) = levels.free_footprint()?;
            let free_dz = levels.free_dz()?;
            let free_weight = levels.free_weight();
            let z = levels.stack().height();
            let level_index = levels.stack().levels().len();

            points.initialize(load_dx, load_dy);
            self.listener.free_space_calculated(
                name,
                level_index,
                &[Cuboid::new(0, 0, z, load_dx, load_dy, free_dz)],
            );

            let origin = match points.value(0) {
                Some(origin) => origin.clone(),
                None => break,
            };
            let Some((index, value)) =
                self.first(&levels, &remaining, &origin, free_weight, free_dz, z)?
            else {
                break;
            };

            let stackable = remaining.remove(index);
            let level_height = value.dz;
            levels.open_level(level_height);
            self.listener.level_added(name, level_index);
            log::debug!(
                "Level {} of '{}' at z={} with height {}",
                level_index,
                name,
                z,
                level_height
            );

            points.add(0, &Cuboid::new(0, 0, 0, value.dx, value.dy, value.dz))?;
            let mut level_weight = free_weight - stackable.weight();
            let placement = StackPlacement::new(stackable, value, 0, 0, z);
            log::trace!("Placed '{}' at 0x0x{}", placement.stackable().name(), z);
            self.listener.placement_added(name, &placement);
            levels.add(placement);
            self.listener
                .free_space_calculated(name, level_index, &points.free_spaces(z, level_height));

            while !points.is_empty() && level_weight > 0 && !remaining.is_empty() {
                let Some((index, value, point_index)) =
                    self.next(&levels, &remaining, &points, level_weight, level_height, z)?
                else {
                    break;
                };

                let (x, y) = match points.value(point_index) {
                    Some(point) => (point.min_x(), point.min_y()),
                    None => break,
                };
                points.add(point_index, &Cuboid::new(x, y, 0, value.dx, value.dy, value.dz))?;

                let stackable = remaining.remove(index);
                level_weight -= stackable.weight();
                let placement = StackPlacement::new(stackable, value, x, y, z);
                log::trace!(
                    "Placed '{}' at {}x{}x{}",
                    placement.stackable().name(),
                    x,
                    y,
                    z
                );
                self.listener.placement_added(name, &placement);
                levels.add(placement);
                self.listener
                    .free_space_calculated(name, level_index, &points.free_spaces(z, level_height));
            }

            log::debug!(
                "Level {} of '{}' closed with {} placements",
                level_index,
                name,
                levels.stack().levels().last().map_or(0, |l| l.len())
            );
            points.reset();
        }

        leftovers.extend(remaining);
        let (stack, snapshot) = levels.finish();
        let result = PackResult::new(stack, snapshot, leftovers);
        log::debug!(
            "Packed '{}': {} placed, {} leftovers",
            name,
            result.placed_count(),
            result.leftovers.len()
        );
        self.listener.pack_done(name, &result);
        Ok(PackOutcome::Packed(result))
    }
}
