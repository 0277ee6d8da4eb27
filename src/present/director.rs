use std::f64::consts::TAU;

use crate::{
    foundation::{
        core::{Millis, Point, Vec2, Viewport},
        error::{CardError, CardResult},
        rng::Rng64,
    },
    present::decor::{HEART_GLYPHS, Icon},
};

/// Vertical start position of falling items, above the visible surface.
const FALL_START_Y: f64 = -100.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Timing and geometry of the falling-item presentation.
pub struct DirectorOpts {
    /// Interval between spawn attempts.
    pub spawn_period_ms: u64,
    /// Shortest fall duration of an item.
    pub fall_min_ms: u64,
    /// Longest fall duration of an item (exclusive).
    pub fall_max_ms: u64,
    /// Lifetime of an item that is never clicked.
    pub item_ttl_ms: u64,
    /// Particles emitted per click.
    pub burst_count: usize,
    /// Lifetime of a burst particle.
    pub particle_ttl_ms: u64,
    /// Delay between a click and the reveal of its message.
    pub reveal_delay_ms: u64,
    /// Minimum travel distance of a burst particle.
    pub burst_min_distance: f64,
    /// Maximum travel distance of a burst particle (exclusive).
    pub burst_max_distance: f64,
    /// Minimum particle glyph size.
    pub particle_min_size: f64,
    /// Maximum particle glyph size (exclusive).
    pub particle_max_size: f64,
    /// Width of a falling item; items spawn fully inside the viewport horizontally.
    pub item_width: f64,
    /// Viewing surface size.
    pub viewport: Viewport,
    /// Seed for decorative randomness.
    pub seed: u64,
}

impl Default for DirectorOpts {
    fn default() -> Self {
        Self {
            spawn_period_ms: 1_200,
            fall_min_ms: 7_000,
            fall_max_ms: 12_000,
            item_ttl_ms: 12_000,
            burst_count: 12,
            particle_ttl_ms: 2_000,
            reveal_delay_ms: 500,
            burst_min_distance: 40.0,
            burst_max_distance: 120.0,
            particle_min_size: 20.0,
            particle_max_size: 30.0,
            item_width: 50.0,
            viewport: Viewport::default(),
            seed: 0x6772_6565_7463_6172,
        }
    }
}

impl DirectorOpts {
    pub fn validate(&self) -> CardResult<()> {
        if self.spawn_period_ms == 0 {
            return Err(CardError::validation("spawn_period_ms must be > 0"));
        }
        if self.fall_min_ms == 0 || self.fall_min_ms > self.fall_max_ms {
            return Err(CardError::validation(
                "fall duration range must satisfy 0 < fall_min_ms <= fall_max_ms",
            ));
        }
        if self.burst_min_distance > self.burst_max_distance
            || self.particle_min_size > self.particle_max_size
        {
            return Err(CardError::validation("burst ranges must have min <= max"));
        }
        if self.item_width < 0.0 || self.item_width > self.viewport.width {
            return Err(CardError::validation(
                "item_width must fit inside the viewport",
            ));
        }
        Ok(())
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum DirectorState {
    /// No spawn schedule is armed.
    Idle,
    /// Items are spawned every period.
    Spawning,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum EntityKind {
    /// A clickable item falling from the top of the surface.
    FallingItem {
        icon: Icon,
        fall_duration_ms: u64,
        clicked: bool,
    },
    /// One particle of a click burst, flying from the click point by `offset`.
    Particle { glyph: char, offset: Vec2, size: f64 },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// An active visual entity. A rendering layer maps these to visuals; they carry no behavior.
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Start position: top-left of a falling item, click point of a particle.
    pub origin: Point,
    pub spawned_at: Millis,
    pub expires_at: Millis,
}

impl Entity {
    /// Animation progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Millis) -> f64 {
        let span = match self.kind {
            EntityKind::FallingItem {
                fall_duration_ms, ..
            } => fall_duration_ms,
            EntityKind::Particle { .. } => self.expires_at.since(self.spawned_at),
        };
        if span == 0 {
            return 1.0;
        }
        (now.since(self.spawned_at) as f64 / span as f64).clamp(0.0, 1.0)
    }

    /// Current position, for renderers that do not run their own tweening.
    pub fn position_at(&self, now: Millis, viewport: Viewport) -> Point {
        let t = self.progress(now);
        match self.kind {
            EntityKind::FallingItem { .. } => Point::new(
                self.origin.x,
                FALL_START_Y + (viewport.height - 2.0 * FALL_START_Y) * t,
            ),
            EntityKind::Particle { offset, .. } => {
                let eased = 1.0 - (1.0 - t) * (1.0 - t);
                self.origin + offset * eased
            }
        }
    }

    pub fn is_falling_item(&self) -> bool {
        matches!(self.kind, EntityKind::FallingItem { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum DirectorEvent {
    Spawned(EntityId),
    Expired(EntityId),
    /// The message at `message_index` is due to be shown; `item` has been removed.
    Revealed {
        item: EntityId,
        message_index: usize,
    },
}

/// Round-robin position over the message list. Advances once per click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealCursor {
    next: usize,
}

impl RevealCursor {
    /// Return the current index and advance by one, modulo `len`. `len` must be non-zero.
    pub fn take(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let idx = self.next % len;
        self.next = (idx + 1) % len;
        idx
    }

    pub fn peek(&self) -> usize {
        self.next
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingReveal {
    item: EntityId,
    message_index: usize,
    due: Millis,
}

/// Session-scoped driver of the falling-item presentation.
///
/// Time only advances through [`AnimationDirector::tick`]; expiry of items, particles and pending
/// reveals is handled by one sweep per tick instead of per-entity timers.
#[derive(Clone, Debug)]
pub struct AnimationDirector {
    opts: DirectorOpts,
    message_count: usize,
    state: DirectorState,
    rng: Rng64,
    next_entity: u64,
    next_spawn_at: Option<Millis>,
    cursor: RevealCursor,
    entities: Vec<Entity>,
    pending: Vec<PendingReveal>,
}

impl AnimationDirector {
    pub fn new(message_count: usize, opts: DirectorOpts) -> CardResult<Self> {
        opts.validate()?;
        Ok(Self {
            rng: Rng64::new(opts.seed),
            opts,
            message_count,
            state: DirectorState::Idle,
            next_entity: 0,
            next_spawn_at: None,
            cursor: RevealCursor::default(),
            entities: Vec::new(),
            pending: Vec::new(),
        })
    }

    pub fn opts(&self) -> &DirectorOpts {
        &self.opts
    }

    pub fn state(&self) -> DirectorState {
        self.state
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn falling_items(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_falling_item())
    }

    pub fn cursor(&self) -> RevealCursor {
        self.cursor
    }

    /// Arm the spawn schedule; the first item appears one period after `now`.
    pub fn start(&mut self, now: Millis) {
        if self.state == DirectorState::Spawning {
            return;
        }
        self.state = DirectorState::Spawning;
        self.next_spawn_at = Some(now.after(self.opts.spawn_period_ms));
        tracing::debug!(now = now.0, messages = self.message_count, "director started");
    }

    /// Cancel the spawn schedule and detach every entity and pending reveal.
    pub fn stop(&mut self) {
        self.state = DirectorState::Idle;
        self.next_spawn_at = None;
        self.entities.clear();
        self.pending.clear();
        tracing::debug!("director stopped");
    }

    /// Advance to `now`: run due spawns, then sweep expired entities and due reveals.
    pub fn tick(&mut self, now: Millis) -> Vec<DirectorEvent> {
        let mut events = Vec::new();

        self.skip_dead_periods(now);
        while let Some(at) = self.next_spawn_at.filter(|at| *at <= now) {
            if self.message_count > 0 {
                let id = self.spawn_item(at);
                events.push(DirectorEvent::Spawned(id));
            }
            let following = at.after(self.opts.spawn_period_ms);
            // The clock saturated; no later period exists.
            self.next_spawn_at = (following > at).then_some(following);
        }

        self.entities.retain(|e| {
            let alive = e.expires_at > now;
            if !alive {
                events.push(DirectorEvent::Expired(e.id));
            }
            alive
        });

        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        for reveal in due {
            self.entities.retain(|e| e.id != reveal.item);
            events.push(DirectorEvent::Revealed {
                item: reveal.item,
                message_index: reveal.message_index,
            });
        }

        events
    }

    /// Handle a click on a falling item at surface coordinates `at`.
    ///
    /// Returns the index of the message that will be revealed after the reveal delay, or `None`
    /// if `id` is not a live, unclicked falling item.
    pub fn click_item(&mut self, id: EntityId, at: Point, now: Millis) -> Option<usize> {
        if self.message_count == 0 {
            return None;
        }
        let item = self.entities.iter_mut().find(|e| e.id == id)?;
        match &mut item.kind {
            EntityKind::FallingItem { clicked, .. } if !*clicked => *clicked = true,
            _ => return None,
        }

        self.burst(at, now);
        let message_index = self.cursor.take(self.message_count);
        self.pending.push(PendingReveal {
            item: id,
            message_index,
            due: now.after(self.opts.reveal_delay_ms),
        });
        tracing::debug!(item = id.0, message_index, "falling item clicked");
        Some(message_index)
    }

    /// Move the spawn schedule past periods whose item would already have expired by `now`, so a
    /// large clock jump costs at most one item lifetime of spawns.
    fn skip_dead_periods(&mut self, now: Millis) {
        let Some(next) = self.next_spawn_at else {
            return;
        };
        let Some(cutoff) = now.0.checked_sub(self.opts.item_ttl_ms) else {
            return;
        };
        if next.0 > cutoff {
            return;
        }
        let period = self.opts.spawn_period_ms;
        let skipped = (cutoff - next.0) / period + 1;
        self.next_spawn_at = Some(next.after(skipped.saturating_mul(period)));
        tracing::debug!(skipped, now = now.0, "skipped expired spawn periods");
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    fn spawn_item(&mut self, at: Millis) -> EntityId {
        let id = self.alloc_id();
        let icon = Icon::ALL[self.rng.index(Icon::ALL.len())];
        let x = self
            .rng
            .range_f64(0.0, self.opts.viewport.width - self.opts.item_width);
        let fall_duration_ms = self
            .rng
            .range_u64(self.opts.fall_min_ms, self.opts.fall_max_ms);
        self.entities.push(Entity {
            id,
            kind: EntityKind::FallingItem {
                icon,
                fall_duration_ms,
                clicked: false,
            },
            origin: Point::new(x, FALL_START_Y),
            spawned_at: at,
            expires_at: at.after(self.opts.item_ttl_ms),
        });
        tracing::debug!(item = id.0, ?icon, x, fall_duration_ms, "spawned falling item");
        id
    }

    fn burst(&mut self, at: Point, now: Millis) {
        let n = self.opts.burst_count;
        for i in 0..n {
            let id = self.alloc_id();
            let angle = TAU / n as f64 * i as f64;
            let distance = self
                .rng
                .range_f64(self.opts.burst_min_distance, self.opts.burst_max_distance);
            let size = self
                .rng
                .range_f64(self.opts.particle_min_size, self.opts.particle_max_size);
            let glyph = HEART_GLYPHS[self.rng.index(HEART_GLYPHS.len())];
            self.entities.push(Entity {
                id,
                kind: EntityKind::Particle {
                    glyph,
                    offset: Vec2::new(angle.cos() * distance, angle.sin() * distance),
                    size,
                },
                origin: at,
                spawned_at: now,
                expires_at: now.after(self.opts.particle_ttl_ms),
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/director.rs"]
mod tests;
