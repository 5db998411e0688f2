//! Fixed-step simulation of entities rolling over a [`Grid`].
//!
//! The [`Stepper`] owns the grid and the watched entities. Each
//! [`Stepper::tick`] resolves every entity's cell, asks the tile for an
//! acceleration, integrates, and fires the tile enter/exit hooks when the
//! entity changes cell. Entities are processed in registration order, so
//! shared tile state changes in that order too.

use std::hash::BuildHasher;

use hashbrown::HashSet;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::error::{GridError, StepError};
use crate::grid::{Grid, TileId};
use crate::physics::{integrate, limit_friction};
use crate::vector_math::Vector2;
use crate::{DEFAULT_BOOST_RATE, REST_SPEED};

/// Receives the tiles whose appearance may have changed during a tick.
pub trait RedrawSink {
    /// Queues `tile` for redrawing.
    fn mark_dirty(&mut self, tile: TileId);
}

impl RedrawSink for Vec<TileId> {
    fn mark_dirty(&mut self, tile: TileId) {
        self.push(tile);
    }
}

impl<S: BuildHasher> RedrawSink for HashSet<TileId, S> {
    fn mark_dirty(&mut self, tile: TileId) {
        self.insert(tile);
    }
}

/// Discards redraw requests, for headless runs.
impl RedrawSink for () {
    fn mark_dirty(&mut self, _tile: TileId) {}
}

/// What a tick does when an entity leaves the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfBoundsPolicy {
    /// Stop the tick at the offending entity; later entities do not move.
    #[default]
    AbortStep,
    /// Leave the offending entity where it ended up and keep going.
    SkipEntity,
}

/// Tuning for a [`Stepper`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepperConfig {
    /// How fast boost tiles pull velocity toward their target, in 1/s. Zero
    /// disables the pull.
    pub boost_rate: f64,
    /// Speed below which an entity counts as settled.
    pub rest_speed: f64,
    /// Out-of-bounds handling.
    pub out_of_bounds: OutOfBoundsPolicy,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            boost_rate: DEFAULT_BOOST_RATE,
            rest_speed: REST_SPEED,
            out_of_bounds: OutOfBoundsPolicy::default(),
        }
    }
}

/// Outcome of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// At least one entity is still moving.
    Running,
    /// Every watched entity is slower than the rest speed.
    Settled,
    /// The entity came to rest in a hole.
    LevelComplete(EntityId),
    /// The entity is off the grid. With [`OutOfBoundsPolicy::AbortStep`] the
    /// tick stopped there.
    EntityOutOfBounds(EntityId),
}

impl StepResult {
    /// Whether the caller should keep ticking.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

#[derive(Debug, Clone)]
struct Watched {
    id: EntityId,
    entity: Entity,
    tile: TileId,
}

enum Advance {
    Moved,
    OutOfBounds,
}

/// Advances watched entities across a grid in fixed time steps.
#[derive(Debug, Clone)]
pub struct Stepper {
    grid: Grid,
    watched: Vec<Watched>,
    next_id: u64,
    config: StepperConfig,
    ticks: u64,
}

impl Stepper {
    /// Wraps `grid` with the default configuration.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::with_config(grid, StepperConfig::default())
    }

    /// Wraps `grid` with `config`.
    #[must_use]
    pub const fn with_config(grid: Grid, config: StepperConfig) -> Self {
        Self {
            grid,
            watched: Vec::new(),
            next_id: 0,
            config,
            ticks: 0,
        }
    }

    /// The course, for rendering between ticks.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the course, for editing between ticks.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Releases the course.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// Number of ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of watched entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    /// Whether no entity is watched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Starts simulating `entity` and enters it onto its starting tile.
    ///
    /// # Errors
    /// Returns [`StepError::OutsideGrid`] when the entity is not over a cell.
    pub fn watch(&mut self, entity: Entity) -> Result<EntityId, StepError> {
        let tile = locate(&self.grid, entity.position)?.ok_or(StepError::OutsideGrid {
            position: entity.position,
        })?;
        if let Some(start) = self.grid.tile_mut(tile) {
            start.on_enter(&entity);
        }
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.watched.push(Watched { id, entity, tile });
        info!("watching entity {id} at {} on {tile}", entity.position);
        Ok(id)
    }

    /// Stops simulating `id`, exiting it from its tile.
    pub fn unwatch(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.watched.iter().position(|slot| slot.id == id)?;
        let slot = self.watched.remove(index);
        if let Some(tile) = self.grid.tile_mut(slot.tile) {
            tile.on_exit(&slot.entity);
        }
        info!("stopped watching entity {id}");
        Some(slot.entity)
    }

    /// The watched entity `id`.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.slot(id).map(|slot| &slot.entity)
    }

    /// Watched entities in registration order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.watched.iter().map(|slot| (slot.id, &slot.entity))
    }

    /// The tile `id` was on at the end of the last tick.
    #[must_use]
    pub fn tile_of(&self, id: EntityId) -> Option<TileId> {
        self.slot(id).map(|slot| slot.tile)
    }

    fn slot(&self, id: EntityId) -> Option<&Watched> {
        self.watched.iter().find(|slot| slot.id == id)
    }

    /// Applies an impulse (newton-seconds) to the watched entity `id`.
    ///
    /// # Errors
    /// Returns [`StepError::UnknownEntity`] when `id` is not watched.
    pub fn strike(&mut self, id: EntityId, impulse: Vector2) -> Result<(), StepError> {
        let slot = self
            .watched
            .iter_mut()
            .find(|slot| slot.id == id)
            .ok_or(StepError::UnknownEntity(id))?;
        slot.entity.strike(impulse);
        debug!("struck entity {id}, velocity now {}", slot.entity.velocity);
        Ok(())
    }

    /// Current status without advancing.
    ///
    /// A resting hole capture wins over settling; an empty stepper is
    /// settled.
    #[must_use]
    pub fn status(&self) -> StepResult {
        let captured = self.watched.iter().find(|slot| {
            self.grid
                .tile(slot.tile)
                .is_some_and(|tile| tile.captures(&slot.entity))
        });
        if let Some(slot) = captured {
            return StepResult::LevelComplete(slot.id);
        }
        let rest_speed = self.config.rest_speed;
        if self
            .watched
            .iter()
            .all(|slot| slot.entity.is_at_rest(rest_speed))
        {
            StepResult::Settled
        } else {
            StepResult::Running
        }
    }

    /// Advances every watched entity by `dt` seconds.
    ///
    /// Tiles whose appearance may have changed are reported to `sink`.
    ///
    /// # Errors
    /// Returns [`StepError::InvalidTimeStep`] unless `dt` is positive and
    /// finite.
    pub fn tick<S>(&mut self, dt: f64, sink: &mut S) -> Result<StepResult, StepError>
    where
        S: RedrawSink + ?Sized,
    {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(StepError::InvalidTimeStep(dt));
        }
        let boost_steps = (1.0 / (dt * self.config.boost_rate)).max(1.0);
        let Self {
            grid,
            watched,
            config,
            ticks,
            ..
        } = self;
        *ticks += 1;

        let mut first_out = None;
        for slot in watched.iter_mut() {
            if let Advance::OutOfBounds = advance_one(grid, slot, dt, boost_steps, sink)? {
                warn!(
                    "entity {} left the grid at {}",
                    slot.id, slot.entity.position
                );
                if first_out.is_none() {
                    first_out = Some(slot.id);
                }
                if config.out_of_bounds == OutOfBoundsPolicy::AbortStep {
                    break;
                }
            }
        }
        match first_out {
            Some(id) => Ok(StepResult::EntityOutOfBounds(id)),
            None => Ok(self.status()),
        }
    }

    /// Runs one rendered frame as `substeps` ticks of `frame_dt / substeps`.
    ///
    /// Stops early at the first tick that is not [`StepResult::Running`].
    /// Zero substeps is treated as one.
    ///
    /// # Errors
    /// As [`Stepper::tick`].
    pub fn tick_frame<S>(
        &mut self,
        frame_dt: f64,
        substeps: u32,
        sink: &mut S,
    ) -> Result<StepResult, StepError>
    where
        S: RedrawSink + ?Sized,
    {
        let count = substeps.max(1);
        let dt = frame_dt / f64::from(count);
        for _ in 0..count {
            let result = self.tick(dt, sink)?;
            if !result.is_running() {
                return Ok(result);
            }
        }
        Ok(StepResult::Running)
    }
}

fn locate(grid: &Grid, position: Vector2) -> Result<Option<TileId>, StepError> {
    match grid.cell_at_point(position) {
        Ok(tile) => Ok(Some(tile)),
        Err(GridError::OutOfBounds { .. }) => Ok(None),
        Err(other) => Err(other.into()),
    }
}

fn transition(grid: &mut Grid, from: TileId, to: TileId, entity: &Entity) {
    if let Some(tile) = grid.tile_mut(from) {
        tile.on_exit(entity);
    }
    if let Some(tile) = grid.tile_mut(to) {
        tile.on_enter(entity);
    }
}

fn advance_one<S>(
    grid: &mut Grid,
    slot: &mut Watched,
    dt: f64,
    boost_steps: f64,
    sink: &mut S,
) -> Result<Advance, StepError>
where
    S: RedrawSink + ?Sized,
{
    let Some(old) = locate(grid, slot.entity.position)? else {
        return Ok(Advance::OutOfBounds);
    };
    if old != slot.tile {
        debug!("entity {} found on {old} after its cell changed", slot.id);
        transition(grid, slot.tile, old, &slot.entity);
        sink.mark_dirty(slot.tile);
        slot.tile = old;
    }

    let tile = grid.tile(old).ok_or(GridError::UnknownTile(old))?;
    let friction = tile.force_on(&mut slot.entity, boost_steps);
    let acceleration = limit_friction(friction, slot.entity.velocity, dt);
    let (position, velocity) = integrate(
        slot.entity.position,
        slot.entity.velocity,
        acceleration,
        dt,
    );
    slot.entity.position = position;
    slot.entity.velocity = velocity;
    trace!(
        "entity {} a={acceleration} v={velocity} p={position}",
        slot.id
    );
    sink.mark_dirty(old);

    let Some(new) = locate(grid, position)? else {
        return Ok(Advance::OutOfBounds);
    };
    if new != old {
        debug!("entity {} moved from {old} to {new}", slot.id);
        transition(grid, old, new, &slot.entity);
        sink.mark_dirty(new);
        slot.tile = new;
    }
    Ok(Advance::Moved)
}
