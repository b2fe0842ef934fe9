//! Multi-container planning on top of a single-container packer.

use crate::config::{Deadline, PackagerConfig};
use crate::container::Container;
use crate::geometry::{Stackable, StackableItem};
use crate::result::{LevelPacker, PackOutcome, PackResult, PackagingResult};
use crate::Result;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Chooses containers for a list of items and packs them with `P`.
pub struct Packager<P: LevelPacker> {
    packer: P,
    containers: Vec<Container>,
    config: PackagerConfig,
    cancelled: Arc<AtomicBool>,
}

impl<P: LevelPacker> Packager<P> {
    /// Creates a packager over the given candidate containers, tried in order.
    pub fn new(packer: P, containers: Vec<Container>) -> Self {
        Self {
            packer,
            containers,
            config: PackagerConfig::default(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: PackagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PackagerConfig {
        &self.config
    }

    /// Returns the candidate containers.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Returns the single-container packer.
    pub fn packer(&self) -> &P {
        &self.packer
    }

    /// Requests the running call to stop at its next interrupt check.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns the flag set by [`cancel`](Self::cancel), for use from other threads.
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    fn start(&self) -> Deadline {
        self.cancelled.store(false, Ordering::Relaxed);
        Deadline::new(&self.config, self.cancelled.clone())
    }

    fn valid_containers(&self) -> Vec<&Container> {
        self.containers
            .iter()
            .filter(|c| match c.validate() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Skipping container '{}': {}", c.name(), e);
                    false
                }
            })
            .collect()
    }

    /// Packs all items into a single container.
    ///
    /// Only containers that could hold the whole set by volume, weight and
    /// per-item size are tried. Returns the first complete result, or `None`
    /// when no container takes every item.
    pub fn pack(&self, items: &[StackableItem]) -> Result<Option<PackResult>> {
        let deadline = self.start();
        let items = StackableItem::expand(items);

        let total_volume: i64 = items.iter().map(|s| s.volume()).sum();
        let total_weight: i64 = items.iter().map(|s| s.weight()).sum();

        let candidates: Vec<&Container> = self
            .valid_containers()
            .into_iter()
            .filter(|c| {
                c.max_load_volume() >= total_volume
                    && c.max_load_weight() >= total_weight
                    && items.iter().all(|s| c.can_hold(s.dimension()))
            })
            .collect();

        log::debug!(
            "Packing {} items, {} of {} containers are candidates",
            items.len(),
            candidates.len(),
            self.containers.len()
        );

        let results = self.attempt(&candidates, &items, &deadline)?;
        Ok(results.into_iter().find(PackResult::is_complete))
    }

    /// Spreads items over as many containers as needed.
    ///
    /// Each round takes the first container that packs every remaining item,
    /// otherwise the one placing the most volume. Stops when all items are
    /// placed, when nothing more fits, or at the configured container limit.
    pub fn pack_list(&self, items: &[StackableItem]) -> Result<PackagingResult> {
        let deadline = self.start();
        let mut remaining = StackableItem::expand(items);
        let candidates = self.valid_containers();
        let mut packaging = PackagingResult::default();

        while !remaining.is_empty()
            && (self.config.max_containers == 0
                || packaging.containers.len() < self.config.max_containers)
        {
            let results = self.attempt(&candidates, &remaining, &deadline)?;

            let mut best: Option<PackResult> = None;
            for result in results {
                if result.is_complete() {
                    best = Some(result);
                    break;
                }
                let better = best
                    .as_ref()
                    .map_or(true, |b| result.placed_volume() > b.placed_volume());
                if better {
                    best = Some(result);
                }
            }

            match best {
                Some(result) if result.placed_count() > 0 => {
                    log::debug!(
                        "Container {} '{}': {} placed, {} left",
                        packaging.containers.len(),
                        result.container.name(),
                        result.placed_count(),
                        result.leftovers.len()
                    );
                    remaining = result.leftovers.clone();
                    packaging.containers.push(result);
                }
                _ => break,
            }
        }

        packaging.leftovers = remaining;
        Ok(packaging)
    }

    // Runs the packer over `containers` in order and stops after the first
    // complete result. Any interrupt aborts the whole call.
    fn attempt(
        &self,
        containers: &[&Container],
        items: &[Arc<Stackable>],
        deadline: &Deadline,
    ) -> Result<Vec<PackResult>> {
        let interrupt = || deadline.is_reached();

        let outcomes: Vec<Result<PackOutcome>> = if self.config.parallel {
            containers
                .par_iter()
                .map(|c| self.packer.pack(items, c, &interrupt))
                .collect()
        } else {
            let mut outcomes = Vec::with_capacity(containers.len());
            for c in containers {
                let outcome = self.packer.pack(items, c, &interrupt);
                let done = !matches!(&outcome, Ok(PackOutcome::Packed(r)) if !r.is_complete());
                outcomes.push(outcome);
                if done {
                    break;
                }
            }
            outcomes
        };

        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome? {
                PackOutcome::Packed(result) => {
                    let complete = result.is_complete();
                    results.push(result);
                    if complete {
                        break;
                    }
                }
                PackOutcome::Interrupted => {
                    log::debug!("Packing aborted after {} ms", deadline.elapsed_ms());
                    return Err(deadline.error());
                }
            }
        }
        Ok(results)
    }
}
