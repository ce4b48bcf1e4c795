// Copyright (c) 2026 rezky_nightky

use crate::charset::Alphabet;
use crate::droplet::Droplet;
use crate::grid::Grid;
use crate::random::RandomSource;

pub const REMIX_INTERVAL_MS: u64 = 50;
pub const REMIX_CHANCE: f32 = 0.2;
pub const HEAD_REFRESH_INTERVAL_MS: u64 = 100;
pub const MIN_SPAWN_INTERVAL_MS: u32 = 250;
pub const MAX_SPAWN_INTERVAL_MS: u32 = 1000;

#[derive(Clone, Copy, Debug)]
pub struct RainSettings {
    pub cols: u16,
    pub rows: u16,
    pub alphabet: Alphabet,
    pub initial_drops: u16,
}

/// What a single tick changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub remixed: bool,
    pub spawned: Option<u16>,
    pub advanced: usize,
    pub recycled: Vec<u16>,
    pub heads_refreshed: bool,
}

impl TickReport {
    pub fn changed(&self) -> bool {
        self.remixed || self.spawned.is_some() || self.advanced > 0 || self.heads_refreshed
    }
}

/// All mutable state of the effect: the grid, the active drops and the
/// timers that pace them. Driven by [`Rain::tick`] once per frame.
pub struct Rain<R: RandomSource> {
    grid: Grid,
    drops: Vec<Droplet>,
    alphabet: Alphabet,
    enabled: bool,

    last_remix_ms: u64,
    last_spawn_ms: u64,
    spawn_interval_ms: u64,
    last_head_refresh_ms: u64,

    rng: R,
}

impl<R: RandomSource> Rain<R> {
    pub fn new(settings: &RainSettings, mut rng: R) -> Self {
        let grid = Grid::build(settings.cols, settings.rows, settings.alphabet, &mut rng);
        let mut rain = Self {
            grid,
            drops: Vec::with_capacity(settings.cols as usize),
            alphabet: settings.alphabet,
            enabled: true,
            last_remix_ms: 0,
            last_spawn_ms: 0,
            spawn_interval_ms: 0,
            last_head_refresh_ms: 0,
            rng,
        };
        rain.spawn_interval_ms = rain.next_spawn_interval();
        for _ in 0..settings.initial_drops {
            rain.spawn_random(0);
        }
        rain
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn drops(&self) -> &[Droplet] {
        &self.drops
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, on: bool) {
        self.enabled = on;
    }

    /// Flips the animation flag and returns the new state.
    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Advances the effect to `now_ms` (milliseconds since start).
    ///
    /// Remix, spawn, advance and head refresh are each gated on their own
    /// timer. A disabled rain returns an empty report and mutates nothing.
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        let mut report = TickReport::default();
        if !self.enabled {
            return report;
        }

        if now_ms.saturating_sub(self.last_remix_ms) >= REMIX_INTERVAL_MS {
            self.last_remix_ms = now_ms;
            self.remix();
            report.remixed = true;
        }

        if now_ms.saturating_sub(self.last_spawn_ms) >= self.spawn_interval_ms {
            self.last_spawn_ms = now_ms;
            self.spawn_interval_ms = self.next_spawn_interval();
            report.spawned = self.spawn_random(now_ms);
        }

        self.advance(now_ms, &mut report);

        if now_ms.saturating_sub(self.last_head_refresh_ms) >= HEAD_REFRESH_INTERVAL_MS {
            self.last_head_refresh_ms = now_ms;
            self.refresh_heads();
            report.heads_refreshed = true;
        }

        report
    }

    /// Starts a drop in `column` unless it already owns one.
    pub fn spawn_in(&mut self, column: u16, now_ms: u64) -> bool {
        if column >= self.grid.cols() || self.drops.iter().any(|d| d.column == column) {
            return false;
        }
        let drop = Droplet::spawn(column, self.grid.rows(), now_ms, &mut self.rng);
        self.drops.push(drop);
        true
    }

    fn spawn_random(&mut self, now_ms: u64) -> Option<u16> {
        let column = self.rng.range(0, self.grid.cols() as u32) as u16;
        self.spawn_in(column, now_ms).then_some(column)
    }

    fn next_spawn_interval(&mut self) -> u64 {
        self.rng.range(MIN_SPAWN_INTERVAL_MS, MAX_SPAWN_INTERVAL_MS) as u64
    }

    fn remix(&mut self) {
        let alphabet = self.alphabet;
        for cell in self.grid.cells_mut() {
            if self.rng.unit() < REMIX_CHANCE {
                cell.ch = alphabet.random_char(&mut self.rng);
            }
        }
    }

    fn advance(&mut self, now_ms: u64, report: &mut TickReport) {
        let rows = self.grid.rows();

        for drop in &mut self.drops {
            if !drop.is_due(now_ms) {
                continue;
            }
            drop.last_update_ms = Some(now_ms);
            if let Some(column) = self.grid.column_mut(drop.column) {
                drop.paint(column);
            }
            drop.row = drop.row.saturating_add(1);
            report.advanced += 1;
            if drop.has_fallen_off(rows) {
                log::trace!(
                    "column {} drop recycled after {} ms",
                    drop.column,
                    now_ms.saturating_sub(drop.created_ms)
                );
                report.recycled.push(drop.column);
            }
        }

        if report.recycled.is_empty() {
            return;
        }
        self.drops.retain(|d| !d.has_fallen_off(rows));
        for &column in &report.recycled {
            self.spawn_in(column, now_ms);
        }
    }

    fn refresh_heads(&mut self) {
        let alphabet = self.alphabet;
        for cell in self.grid.cells_mut().filter(|c| c.is_head()) {
            cell.ch = alphabet.random_char(&mut self.rng);
        }
    }
}
