//! Game Engine
//!
//! The authoritative state machine. One exclusive lock serializes every
//! mutation of the composite state (board, roster, pill supply, pending
//! rewards); the phase is additionally mirrored into an atomic scalar so
//! status pollers never contend the lock. Within the lock, operations are
//! linearizable: each move, join, start, and reset sees a consistent
//! snapshot, and a failed operation never leaves partial state behind.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::rng::{RandomSource, SystemRandom};
use crate::game::admin::AdminRegistry;
use crate::game::board::{Cell, Direction, Location, OccupantView, RedactedCell};
use crate::game::phase::{AtomicPhase, GamePhase};
use crate::game::player::{issue_token, Player, PlayerId, PlayerScore, PlayerToken};
use crate::game::timer;
use crate::game::GameError;

/// Debounce window for small rounds.
const FAST_NOTIFY_INTERVAL: Duration = Duration::from_millis(250);
/// Debounce window once per-move notification would flood subscribers.
const SLOW_NOTIFY_INTERVAL: Duration = Duration::from_millis(750);
/// Player count above which the slow window applies.
const SLOW_NOTIFY_PLAYER_THRESHOLD: usize = 20;
/// Cell count above which the slow window applies.
const SLOW_NOTIFY_CELL_THRESHOLD: usize = 10_000;

/// Parameters for starting a round.
#[derive(Clone, Debug)]
pub struct StartOptions {
    /// Board height.
    pub rows: u32,
    /// Board width.
    pub cols: u32,
    /// The configured secret code, or a valid admin token.
    pub secret_code: String,
    /// When set, the round ends after this long and the engine restarts
    /// itself with the same settings.
    pub round_length: Option<Duration>,
}

/// Result of a movement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Where the player is after the request.
    pub location: Location,
    /// Did the move land on a pill?
    pub ate_a_pill: bool,
}

/// Settings retained for timed auto-restart.
#[derive(Clone, Debug)]
struct RoundSettings {
    rows: u32,
    cols: u32,
    round_length: Option<Duration>,
}

/// Everything the engine lock protects.
struct EngineInner {
    players: BTreeMap<PlayerId, Player>,
    tokens: BTreeMap<PlayerToken, PlayerId>,
    cells: BTreeMap<Location, Cell>,
    player_locations: BTreeMap<PlayerToken, Location>,
    empty_cells: BTreeSet<Location>,
    pill_values: VecDeque<i64>,
    special_point_values: BTreeMap<Location, i64>,
    moved_this_round: BTreeSet<PlayerId>,
    remaining_pills: usize,
    active_players: usize,
    next_player_id: u32,
    max_rows: u32,
    max_cols: u32,
    rng: Box<dyn RandomSource>,
    settings: Option<RoundSettings>,
    round_ends_at: Option<Instant>,
    timer: Option<AbortHandle>,
    last_notified: Option<Instant>,
    notify_interval: Duration,
}

impl EngineInner {
    fn new(rng: Box<dyn RandomSource>) -> Self {
        Self {
            players: BTreeMap::new(),
            tokens: BTreeMap::new(),
            cells: BTreeMap::new(),
            player_locations: BTreeMap::new(),
            empty_cells: BTreeSet::new(),
            pill_values: VecDeque::new(),
            special_point_values: BTreeMap::new(),
            moved_this_round: BTreeSet::new(),
            remaining_pills: 0,
            active_players: 0,
            next_player_id: 0,
            max_rows: 0,
            max_cols: 0,
            rng,
            settings: None,
            round_ends_at: None,
            timer: None,
            last_notified: None,
            notify_interval: FAST_NOTIFY_INTERVAL,
        }
    }

    /// Pick a starting cell: random origin, then while occupied alternately
    /// bump the row or the column (wrapping at the edge), flipping the axis
    /// on every collision. Terminates because capacity is checked before
    /// placement begins.
    fn find_open_cell(&mut self) -> Location {
        let rows = self.max_rows as i32;
        let cols = self.max_cols as i32;
        let mut location = Location::new(
            self.rng.next_below(self.max_rows as usize) as i32,
            self.rng.next_below(self.max_cols as usize) as i32,
        );

        let mut bump_row = true;
        while self
            .cells
            .get(&location)
            .and_then(|cell| cell.occupied_by)
            .is_some()
        {
            let mut row = location.row;
            let mut col = location.col;
            if bump_row {
                row += 1;
            } else {
                col += 1;
            }
            if row >= rows {
                row = 0;
            }
            if col >= cols {
                col = 0;
            }
            location = Location::new(row, col);
            bump_row = !bump_row;
        }
        location
    }

    /// Value for a newly occupied pill cell: a pending special reward at
    /// that exact location wins, otherwise the next queued pill value. The
    /// queue guarantees the n-th pill eaten anywhere is worth n points.
    fn award_value(&mut self, location: Location) -> i64 {
        if let Some(value) = self.special_point_values.remove(&location) {
            debug!(%location, value, "special reward claimed");
            return value;
        }
        self.pill_values.pop_front().unwrap_or(0)
    }

    /// Remove a combatant whose score fell to zero or below. Their cell
    /// becomes empty with the pill restored; they stay in the roster.
    fn remove_if_dead(&mut self, player_id: PlayerId) -> bool {
        let Some(player) = self.players.get(&player_id) else {
            return false;
        };
        if player.score > 0 {
            return false;
        }
        let token = player.token.clone();
        let Some(location) = self.player_locations.remove(&token) else {
            return false;
        };

        if let Some(cell) = self.cells.get(&location).copied() {
            self.cells.insert(location, cell.reclaimed());
        }
        self.empty_cells.insert(location);
        self.remaining_pills += 1;
        self.active_players = self.active_players.saturating_sub(1);
        info!(player = %player_id, %location, "player eliminated");
        true
    }
}

/// The server-authoritative engine for one shared board.
///
/// Cheap status reads (`current_phase`, `is_game_over`, ...) go through an
/// atomic and never take the lock; everything else is serialized.
pub struct GameEngine {
    inner: Mutex<EngineInner>,
    phase: AtomicPhase,
    changes: broadcast::Sender<()>,
    admin: AdminRegistry,
    config: EngineConfig,
}

impl GameEngine {
    /// Build an engine with OS-entropy placement randomness.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, Box::new(SystemRandom::new()))
    }

    /// Build an engine with an injected randomness source.
    pub fn with_rng(config: EngineConfig, rng: Box<dyn RandomSource>) -> Self {
        let (changes, _) = broadcast::channel(64);
        let admin = AdminRegistry::new(config.admin_password.clone());
        Self {
            inner: Mutex::new(EngineInner::new(rng)),
            phase: AtomicPhase::new(),
            changes,
            admin,
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineInner> {
        // A panicked holder cannot leave partial state: every operation
        // completes its mutation before returning.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn credential_ok(&self, credential: &str) -> bool {
        (!self.config.secret_code.is_empty() && credential == self.config.secret_code)
            || self.admin.is_valid(credential)
    }

    /// Best-effort "something changed, re-poll" signal, coalesced by the
    /// per-round debounce window.
    fn raise_state_change(&self, inner: &mut EngineInner) {
        let now = Instant::now();
        let due = match inner.last_notified {
            None => true,
            Some(last) => now.duration_since(last) >= inner.notify_interval,
        };
        if due {
            let _ = self.changes.send(());
            inner.last_notified = Some(now);
        }
    }

    // =========================================================================
    // ROUND LIFECYCLE
    // =========================================================================

    /// Start a round: prune inactive players, rebuild the grid, place
    /// everyone, refill the pill queue, and advance to `Eating`.
    ///
    /// A credential mismatch or an already-running round is a silent no-op;
    /// callers deliberately cannot tell the two apart.
    pub fn start_game(self: &Arc<Self>, options: StartOptions) -> Result<(), GameError> {
        if !self.credential_ok(&options.secret_code) {
            return Ok(());
        }
        if self.phase.load() != GamePhase::Joining {
            return Ok(());
        }

        let mut inner = self.lock();
        // The atomic read above can race a concurrent start; the lock is the
        // real gate, so check again here.
        if self.phase.load() != GamePhase::Joining {
            return Ok(());
        }

        inner.max_rows = options.rows;
        inner.max_cols = options.cols;
        inner.settings = Some(RoundSettings {
            rows: options.rows,
            cols: options.cols,
            round_length: options.round_length,
        });

        self.initialize_round(&mut inner)?;

        if let Some(handle) = inner.timer.take() {
            handle.abort();
        }
        if let Some(length) = options.round_length {
            inner.round_ends_at = Some(Instant::now() + length);
            inner.timer = Some(timer::spawn(
                Arc::clone(self),
                length,
                self.config.restart_grace,
            ));
        }

        self.raise_state_change(&mut inner);
        Ok(())
    }

    /// Return to `Joining`: clear locations and scores, keep registrations.
    /// Silent no-op on credential mismatch or when no round has started.
    /// Cancels a pending timed restart.
    pub fn reset_game(&self, credential: &str) {
        if !self.credential_ok(credential) {
            return;
        }
        if self.phase.load() == GamePhase::Joining {
            return;
        }

        let mut inner = self.lock();
        if let Some(handle) = inner.timer.take() {
            handle.abort();
        }
        inner.round_ends_at = None;
        self.reset_round(&mut inner);
        self.raise_state_change(&mut inner);
    }

    /// Rebuild the full grid and seat the roster. Caller holds the lock and
    /// has already set `max_rows`/`max_cols`.
    fn initialize_round(&self, inner: &mut EngineInner) -> Result<(), GameError> {
        let capacity = (inner.max_rows as usize) * (inner.max_cols as usize);
        if inner.players.len() > capacity {
            return Err(GameError::TooManyPlayers {
                players: inner.players.len(),
                capacity,
            });
        }

        // Prune joiners who never acted during the round that just ended.
        let stale: Vec<PlayerId> = inner
            .players
            .keys()
            .copied()
            .filter(|id| !inner.moved_this_round.contains(id))
            .collect();
        for id in stale {
            if let Some(player) = inner.players.remove(&id) {
                info!(player = %id, name = %player.name, "pruning inactive player");
                inner.tokens.remove(&player.token);
            }
        }
        inner.moved_this_round.clear();

        inner.cells.clear();
        inner.player_locations.clear();
        inner.empty_cells.clear();
        inner.remaining_pills = capacity;
        inner.active_players = inner.players.len();

        for row in 0..inner.max_rows as i32 {
            for col in 0..inner.max_cols as i32 {
                let location = Location::new(row, col);
                inner.cells.insert(location, Cell::fresh(location));
                inner.empty_cells.insert(location);
            }
        }

        let roster: Vec<(PlayerId, PlayerToken)> = inner
            .players
            .values()
            .map(|p| (p.id, p.token.clone()))
            .collect();
        for (id, token) in roster {
            let location = inner.find_open_cell();
            if let Some(cell) = inner.cells.get(&location).copied() {
                inner.cells.insert(location, cell.with_occupant(id));
            }
            inner.player_locations.insert(token, location);
            inner.empty_cells.remove(&location);
            inner.remaining_pills -= 1;
            if let Some(player) = inner.players.get_mut(&id) {
                player.score = 0;
            }
        }

        inner.pill_values = (1..=capacity as i64).collect();

        inner.notify_interval = if inner.players.len() > SLOW_NOTIFY_PLAYER_THRESHOLD
            || capacity > SLOW_NOTIFY_CELL_THRESHOLD
        {
            SLOW_NOTIFY_INTERVAL
        } else {
            FAST_NOTIFY_INTERVAL
        };

        let phase = self.phase.advance();
        info!(
            rows = inner.max_rows,
            cols = inner.max_cols,
            players = inner.players.len(),
            ?phase,
            "round initialized"
        );
        Ok(())
    }

    fn reset_round(&self, inner: &mut EngineInner) {
        self.phase.store(GamePhase::Joining);
        inner.player_locations.clear();
        inner.empty_cells.clear();
        for player in inner.players.values_mut() {
            player.score = 0;
        }
        // Pending special rewards survive a reset and can be claimed at the
        // same coordinates in a later round.
        info!("round reset; players remain registered");
    }

    /// Timer hook: the round clock ran out.
    pub(crate) fn expire_round(&self) {
        let mut inner = self.lock();
        // A manual reset can win the race with this wake-up; the abort then
        // lands after we are already running. A reset engine must stay in
        // `Joining`, so the phase check happens under the lock.
        if self.phase.load() == GamePhase::Joining {
            return;
        }
        info!("round timer expired; game over");
        self.phase.store(GamePhase::GameOver);
        inner.round_ends_at = None;
        self.raise_state_change(&mut inner);
    }

    /// Timer hook: after the grace window, reset and immediately start the
    /// next round with the same settings. Returns false when the restart
    /// cannot proceed (the timer loop then stops).
    pub(crate) fn restart_round(&self) -> bool {
        let mut inner = self.lock();
        self.reset_round(&mut inner);

        let Some(settings) = inner.settings.clone() else {
            return false;
        };
        inner.max_rows = settings.rows;
        inner.max_cols = settings.cols;

        match self.initialize_round(&mut inner) {
            Ok(()) => {
                if let Some(length) = settings.round_length {
                    inner.round_ends_at = Some(Instant::now() + length);
                }
                self.raise_state_change(&mut inner);
                true
            }
            Err(error) => {
                warn!(%error, "timed restart failed; staying in joining phase");
                false
            }
        }
    }

    // =========================================================================
    // PLAYER REGISTRY
    // =========================================================================

    /// Register a player and issue their capability token. If a round is in
    /// progress the joiner is seated immediately at a uniformly random empty
    /// cell; with no empty cell left the join fails with `NoAvailableSpace`
    /// (the registration itself stands).
    pub fn join_player(&self, name: &str) -> Result<PlayerToken, GameError> {
        let token = issue_token();
        info!(name, %token, "player joining");

        let mut guard = self.lock();
        let inner = &mut *guard;
        inner.next_player_id += 1;
        let id = PlayerId(inner.next_player_id);
        debug!(player = %id, "assigned player id");

        inner.players.insert(
            id,
            Player {
                id,
                name: name.to_string(),
                token: token.clone(),
                score: 0,
            },
        );
        inner.tokens.insert(token.clone(), id);
        inner.moved_this_round.insert(id);

        if self.phase.load() != GamePhase::Joining {
            if inner.empty_cells.is_empty() {
                return Err(GameError::NoAvailableSpace);
            }
            let index = inner.rng.next_below(inner.empty_cells.len());
            let location = inner
                .empty_cells
                .iter()
                .copied()
                .nth(index)
                .ok_or(GameError::NoAvailableSpace)?;

            if let Some(cell) = inner.cells.get(&location).copied() {
                if cell.pill_available {
                    inner.remaining_pills -= 1;
                }
                inner.cells.insert(location, cell.with_occupant(id));
            }
            inner.player_locations.insert(token.clone(), location);
            inner.empty_cells.remove(&location);
            inner.active_players += 1;
            info!(player = %id, %location, "late joiner seated");
        }

        self.raise_state_change(inner);
        Ok(token)
    }

    // =========================================================================
    // MOVEMENT
    // =========================================================================

    /// Apply one directional move for the player owning `token`.
    ///
    /// Outside `Eating`/`Battle` this is a no-op that reports the current
    /// location. Off-grid destinations are rejected in place. An occupied
    /// destination is rejected during `Eating` and resolves an attack during
    /// `Battle`.
    pub fn move_player(&self, token: &str, direction: Direction) -> Result<MoveOutcome, GameError> {
        let token = token.trim().trim_matches('"');

        let mut inner = self.lock();
        let player_id = *inner.tokens.get(token).ok_or(GameError::PlayerNotFound)?;

        let current = *inner
            .player_locations
            .get(token)
            .ok_or(GameError::InvalidMove("player is not currently on the board"))?;
        let current_cell = inner
            .cells
            .get(&current)
            .copied()
            .ok_or(GameError::InvalidMove("player is not currently on the board"))?;

        inner.moved_this_round.insert(player_id);

        if current_cell.occupied_by.is_none() {
            return Err(GameError::InvalidMove("player is not currently on the board"));
        }

        let phase = self.phase.load();
        if phase != GamePhase::Eating && phase != GamePhase::Battle {
            // Between rounds a move request is harmless.
            return Ok(MoveOutcome {
                location: current,
                ate_a_pill: false,
            });
        }

        let destination = current.step(direction);
        let outcome = match inner.cells.get(&destination).copied() {
            // Off the board: stay put.
            None => MoveOutcome {
                location: current,
                ate_a_pill: false,
            },
            Some(dest_cell) => match dest_cell.occupied_by {
                None => self.relocate(&mut inner, player_id, current, destination, dest_cell),
                Some(defender) if phase == GamePhase::Battle => {
                    self.attack(&mut inner, player_id, current, defender, destination)
                }
                // No swapping or stacking while eating.
                Some(_) => MoveOutcome {
                    location: current,
                    ate_a_pill: false,
                },
            },
        };

        self.raise_state_change(&mut inner);
        Ok(outcome)
    }

    fn relocate(
        &self,
        inner: &mut EngineInner,
        player_id: PlayerId,
        from: Location,
        to: Location,
        dest_cell: Cell,
    ) -> MoveOutcome {
        let mut ate_a_pill = false;
        if dest_cell.pill_available {
            let points = inner.award_value(to);
            if let Some(player) = inner.players.get_mut(&player_id) {
                player.score += points;
                debug!(player = %player_id, points, score = player.score, "pill eaten");
            }
            ate_a_pill = true;
            inner.remaining_pills -= 1;
        }

        inner.cells.insert(to, dest_cell.with_occupant(player_id));
        // The vacated cell stays pill-free; pills never respawn on movement.
        if let Some(source) = inner.cells.get(&from).copied() {
            inner.cells.insert(from, source.vacated());
        }

        if let Some(token) = inner.players.get(&player_id).map(|p| p.token.clone()) {
            inner.player_locations.insert(token, to);
        }
        inner.empty_cells.remove(&to);
        inner.empty_cells.insert(from);

        info!(player = %player_id, %from, %to, ate_a_pill, "player moved");
        self.battle_if_pills_exhausted(inner);

        MoveOutcome {
            location: to,
            ate_a_pill,
        }
    }

    // =========================================================================
    // BATTLE
    // =========================================================================

    /// Symmetric damage: both combatants lose the smaller of the two scores,
    /// so at least one lands exactly on zero. The attacker keeps their cell;
    /// the turn is consumed either way.
    fn attack(
        &self,
        inner: &mut EngineInner,
        attacker_id: PlayerId,
        attacker_at: Location,
        defender_id: PlayerId,
        defender_at: Location,
    ) -> MoveOutcome {
        let attacker_score = inner.players.get(&attacker_id).map(|p| p.score).unwrap_or(0);
        let defender_score = inner.players.get(&defender_id).map(|p| p.score).unwrap_or(0);
        let damage = attacker_score.min(defender_score);
        info!(attacker = %attacker_id, defender = %defender_id, damage, "attack");

        if let Some(attacker) = inner.players.get_mut(&attacker_id) {
            attacker.score -= damage;
        }
        if let Some(defender) = inner.players.get_mut(&defender_id) {
            defender.score -= damage;
        }

        let attacker_died = inner.remove_if_dead(attacker_id);
        let defender_died = inner.remove_if_dead(defender_id);
        if attacker_died || defender_died {
            // Seed the bounty at the defender's cell for the next visitor.
            // An existing pending reward at that cell is kept, not replaced.
            inner
                .special_point_values
                .entry(defender_at)
                .or_insert_with(|| half_rounded_to_even(damage));
            self.check_for_winner(inner);
        }

        MoveOutcome {
            location: attacker_at,
            ate_a_pill: false,
        }
    }

    fn check_for_winner(&self, inner: &mut EngineInner) {
        debug!(active = inner.active_players, "checking for winner");
        if inner.active_players <= 1 {
            let phase = self.phase.advance();
            info!(?phase, "at most one player remains");
        }
    }

    fn battle_if_pills_exhausted(&self, inner: &mut EngineInner) {
        if self.phase.load() != GamePhase::Eating {
            return;
        }
        if inner.remaining_pills == 0 {
            if inner.active_players <= 1 {
                // Nothing to fight over.
                self.phase.store(GamePhase::GameOver);
                info!("pills exhausted with at most one active player; game over");
            } else {
                let phase = self.phase.advance();
                info!(?phase, "pills exhausted; entering battle");
            }
        }
    }

    // =========================================================================
    // READ-SIDE PROJECTIONS
    // =========================================================================

    /// Snapshot of one cell; fails outside the configured grid.
    pub fn get_cell(&self, row: i32, col: i32) -> Result<Cell, GameError> {
        let inner = self.lock();
        inner
            .cells
            .get(&Location::new(row, col))
            .copied()
            .ok_or(GameError::OutOfRange { row, col })
    }

    /// The whole board, redacted for public consumption: occupant id, name,
    /// and score only, never the token. Empty while `Joining`.
    pub fn board_state(&self) -> Vec<RedactedCell> {
        if self.phase.load() == GamePhase::Joining {
            return Vec::new();
        }

        let inner = self.lock();
        inner
            .cells
            .values()
            .map(|cell| RedactedCell {
                location: cell.location,
                pill_available: cell.pill_available,
                occupied_by: cell
                    .occupied_by
                    .and_then(|id| inner.players.get(&id))
                    .map(|player| OccupantView {
                        id: player.id,
                        name: player.name.clone(),
                        score: player.score,
                    }),
            })
            .collect()
    }

    /// Leaderboard, highest score first; ties keep join order.
    pub fn players_by_score_descending(&self) -> Vec<PlayerScore> {
        let inner = self.lock();
        let mut scores: Vec<PlayerScore> = inner.players.values().map(PlayerScore::from).collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores
    }

    /// Has a round started? Lock-free.
    pub fn is_game_started(&self) -> bool {
        self.phase.load() != GamePhase::Joining
    }

    /// Current phase. Lock-free; may be stale by one in-flight operation.
    pub fn current_phase(&self) -> GamePhase {
        self.phase.load()
    }

    /// Is the round over? Lock-free.
    pub fn is_game_over(&self) -> bool {
        self.phase.load() == GamePhase::GameOver
    }

    /// Time until the round timer fires; `None` for untimed rounds.
    pub fn time_remaining(&self) -> Option<Duration> {
        let inner = self.lock();
        inner
            .round_ends_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Subscribe to the debounced change signal. Receivers must treat it as
    /// "state changed since last notice, re-poll"; notices coalesce.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    // =========================================================================
    // ADMIN
    // =========================================================================

    /// Exchange the admin password for a capability token.
    pub fn admin_login(&self, password: &str) -> Option<String> {
        self.admin.login(password)
    }

    /// Invalidate an admin token.
    pub fn admin_logout(&self, token: &str) {
        self.admin.logout(token);
    }

    /// Is this a currently issued admin token?
    pub fn is_valid_admin_token(&self, token: &str) -> bool {
        self.admin.is_valid(token)
    }

    /// Remove one player entirely: roster, board, activity tracking. Their
    /// cell becomes empty with the pill restored. Returns false for an
    /// invalid admin token or an unknown player.
    pub fn boot_player(&self, admin_token: &str, player_id: PlayerId) -> bool {
        if !self.admin.is_valid(admin_token) {
            return false;
        }

        let mut inner = self.lock();
        let Some(player) = inner.players.remove(&player_id) else {
            return false;
        };
        inner.tokens.remove(&player.token);
        inner.moved_this_round.remove(&player_id);

        if let Some(location) = inner.player_locations.remove(&player.token) {
            if let Some(cell) = inner.cells.get(&location).copied() {
                inner.cells.insert(location, cell.reclaimed());
            }
            inner.empty_cells.insert(location);
            inner.remaining_pills += 1;
            inner.active_players = inner.active_players.saturating_sub(1);
        }

        info!(player = %player_id, name = %player.name, "player booted by admin");
        self.raise_state_change(&mut inner);
        true
    }

    /// Drop every registration and free the whole board.
    pub fn clear_all_players(&self, admin_token: &str) -> bool {
        if !self.admin.is_valid(admin_token) {
            return false;
        }

        let mut inner = self.lock();
        let seated: Vec<Location> = inner.player_locations.values().copied().collect();
        for location in seated {
            if let Some(cell) = inner.cells.get(&location).copied() {
                inner.cells.insert(location, cell.reclaimed());
            }
            inner.empty_cells.insert(location);
            inner.remaining_pills += 1;
        }
        inner.player_locations.clear();
        inner.players.clear();
        inner.tokens.clear();
        inner.moved_this_round.clear();
        inner.active_players = 0;

        info!("all players cleared by admin");
        self.raise_state_change(&mut inner);
        true
    }
}

/// Half of `value`, with .5 ties rounding to the even neighbour.
fn half_rounded_to_even(value: i64) -> i64 {
    let half = value / 2;
    if value % 2 == 0 || half % 2 == 0 {
        half
    } else {
        half + 1
    }
}
