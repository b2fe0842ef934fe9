//! Largest-area-fit-first packing with stacking inside levels.
//!
//! As in the floor-only packer, the best ranked item starts each level at its
//! origin and fixes the level height. The level is then tracked as a volume:
//! items may also go on top of items already in the level, as long as their
//! whole footprint rests on the floor or on the top face of the item below.

use crate::extreme_points::ExtremePoints3D;
use crate::point::Point3D;
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

/// Volumetric largest-area-fit-first packer.
pub struct LaffPacker<C = LargestAreaFitFirst> {
    comparator: C,
    listener: Arc<dyn PackListener>,
}

impl Default for LaffPacker<LargestAreaFitFirst> {
    fn default() -> Self {
        Self::new(LargestAreaFitFirst::default())
    }
}

/// Best candidate found while scanning a level.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    item: usize,
    value: StackValue,
    point: usize,
}

impl<C: PlacementComparator<Point3D>> LaffPacker<C> {
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

    fn first(
        &self,
        levels: &LevelStack,
        remaining: &[Arc<Stackable>],
        origin: &Point3D,
        free_weight: i64,
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
                if value.is_degenerate() || !origin.fits(value) {
                    continue;
                }
                if let Some(constraint) = constraint {
                    if !constraint.supports(levels.stack(), stackable, value, 0, 0, z)? {
                        continue;
                    }
                }

                let better = best.as_ref().map_or(true, |(best_item, best_value)| {
                    self.comparator
                        .compare_first_stackable(stackable, &remaining[*best_item])
                        .then_with(|| {
                            self.comparator
                                .compare_first_value(origin, value, origin, best_value)
                        })
                        == Ordering::Less
                });
                if better {
                    best = Some((i, *value));
                }
            }
        }

        Ok(best)
    }

    fn next(
        &self,
        levels: &LevelStack,
        remaining: &[Arc<Stackable>],
        points: &ExtremePoints3D,
        level_weight: i64,
        z: i64,
    ) -> Result<Option<Candidate>> {
        let constraint = levels.constraint();
        let max_volume = points.max_volume();
        let max_area = points.max_area();
        let mut best: Option<Candidate> = None;

        for (i, stackable) in remaining.iter().enumerate() {
            if stackable.weight() > level_weight
                || stackable.volume() > max_volume
                || stackable.minimum_area() > max_area
            {
                continue;
            }
            if let Some(constraint) = constraint {
                if !constraint.accepts(levels.stack(), stackable)? {
                    continue;
                }
            }

            for value in stackable.stack_values() {
                if value.is_degenerate() || value.area() > max_area {
                    continue;
                }

                for (point_index, point) in points.values().iter().enumerate() {
                    if !point.fits(value) || !point.supports(value.dx, value.dy) {
                        continue;
                    }
                    if let Some(constraint) = constraint {
                        if !constraint.supports(
                            levels.stack(),
                            stackable,
                            value,
                            point.min_x(),
                            point.min_y(),
                            z + point.min_z(),
                        )? {
                            continue;
                        }
                    }

                    let better = best.as_ref().map_or(true, |b| {
                        self.comparator
                            .compare_next_stackable(stackable, &remaining[b.item])
                            .then_with(|| {
                                self.comparator.compare_next_value(
                                    point,
                                    value,
                                    &points.values()[b.point],
                                    &b.value,
                                )
                            })
                            == Ordering::Less
                    });
                    if better {
                        best = Some(Candidate {
                            item: i,
                            value: *value,
                            point: point_index,
                        });
                    }
                }
            }
        }

        Ok(best)
    }
}

impl<C: PlacementComparator<Point3D>> LevelPacker for LaffPacker<C> {
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

        let mut points = ExtremePoints3D::new();

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

            if load_dx <= 0 || load_dy <= 0 || free_dz <= 0 {
                break;
            }
            self.listener.free_space_calculated(
                name,
                level_index,
                &[Cuboid::new(0, 0, z, load_dx, load_dy, free_dz)],
            );

            let origin = Point3D::new(0, 0, 0, load_dx, load_dy, free_dz)?;
            let Some((index, value)) = self.first(&levels, &remaining, &origin, free_weight, z)?
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

            points.initialize(load_dx, load_dy, level_height);
            points.add(0, &Cuboid::new(0, 0, 0, value.dx, value.dy, value.dz))?;
            let mut level_weight = free_weight - stackable.weight();
            let placement = StackPlacement::new(stackable, value, 0, 0, z);
            log::trace!("Placed '{}' at 0x0x{}", placement.stackable().name(), z);
            self.listener.placement_added(name, &placement);
            levels.add(placement);
            self.listener
                .free_space_calculated(name, level_index, &points.free_spaces(z));

            while !points.is_empty() && level_weight > 0 && !remaining.is_empty() {
                let Some(candidate) = self.next(&levels, &remaining, &points, level_weight, z)?
                else {
                    break;
                };

                let (x, y, local_z) = match points.value(candidate.point) {
                    Some(point) => (point.min_x(), point.min_y(), point.min_z()),
                    None => break,
                };
                let value = candidate.value;
                points.add(
                    candidate.point,
                    &Cuboid::new(x, y, local_z, value.dx, value.dy, value.dz),
                )?;

                let stackable = remaining.remove(candidate.item);
                level_weight -= stackable.weight();
                let placement = StackPlacement::new(stackable, value, x, y, z + local_z);
                log::trace!(
                    "Placed '{}' at {}x{}x{}",
                    placement.stackable().name(),
                    x,
                    y,
                    z + local_z
                );
                self.listener.placement_added(name, &placement);
                levels.add(placement);
                self.listener
                    .free_space_calculated(name, level_index, &points.free_spaces(z));
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
