//! Bank Heist game logic, the only writer of [`GameState`].
//!
//! Puzzle handlers report outcomes; everything that changes the clock, the
//! solved set, the inventory or the phase goes through here. Invalid input
//! (locked hotspot, wrong answer, input after the game ended) is a silent
//! no-op.

use std::rc::Rc;

use super::puzzles::{ActivePuzzle, Outcome, PuzzleContext, PuzzleInput};
use super::state::{GameState, Notice, Phase, PuzzleId, Reward, Toast};

/// Advance the game by `delta_ticks` ticks (at 10 ticks/sec).
pub fn advance(state: &mut GameState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }

    if let Some(toast) = &mut state.toast {
        toast.ticks_left = toast.ticks_left.saturating_sub(delta_ticks);
        if toast.ticks_left == 0 {
            state.toast = None;
        }
    }

    // A safe that unlocks in the same frame as the last second still counts
    let unlocked = match &mut state.active {
        Some(active) => match active.advance(delta_ticks) {
            Outcome::Solved(reward) => Some((active.id(), reward)),
            Outcome::Pending => None,
        },
        None => None,
    };
    if let Some((id, reward)) = unlocked {
        complete(state, id, reward);
    }
    if state.pending_unlock.advance(delta_ticks) {
        complete(state, PuzzleId::Safe, None);
    }

    for _ in 0..state.clock.advance(delta_ticks) {
        tick(state);
    }
}

/// One second of game time.
pub fn tick(state: &mut GameState) {
    if state.phase != Phase::Playing {
        return;
    }
    state.time_remaining = state.time_remaining.saturating_sub(1);
    if state.time_remaining == 0 {
        finish(state, Phase::Failed, Notice::Captured);
    }
}

/// Whether `id` can be opened right now: prerequisite met and not yet solved.
pub fn is_available(state: &GameState, id: PuzzleId) -> bool {
    !state.puzzle_status.is_solved(id) && id.prerequisite_met(&state.puzzle_status, &state.inventory)
}

/// Open the puzzle behind a hotspot. Returns `false` (and changes nothing)
/// if the game is over, a dialog is already open, or the puzzle is locked
/// or solved.
pub fn attempt_open(state: &mut GameState, id: PuzzleId) -> bool {
    if state.phase != Phase::Playing || state.active.is_some() || !is_available(state, id) {
        return false;
    }
    log::debug!("heist: open {:?}", id);
    state.active = Some(ActivePuzzle::open(id));
    true
}

/// Close the open dialog without solving it. A safe that already holds the
/// correct code keeps counting down and still opens.
pub fn close_puzzle(state: &mut GameState) -> bool {
    match state.active.take() {
        Some(ActivePuzzle::Safe(dial)) => {
            if let Some(delay) = dial.into_pending() {
                state.pending_unlock = delay;
            }
            true
        }
        Some(_) => true,
        None => false,
    }
}

/// Route input to the open puzzle and apply its outcome.
pub fn submit_input(state: &mut GameState, input: PuzzleInput) -> bool {
    if state.phase != Phase::Playing {
        return false;
    }
    let Some(active) = state.active.as_mut() else {
        return false;
    };
    let ctx = PuzzleContext {
        content: &state.content,
        safe_code: state.inventory.safe_code.as_deref(),
        safe_confirm_ticks: state.rules.safe_confirm_ticks,
    };
    let id = active.id();
    let outcome = active.handle(input, &ctx);
    if let Outcome::Solved(reward) = outcome {
        complete(state, id, reward);
    }
    true
}

/// Mark a puzzle solved, merge its reward and close its dialog, then run the
/// win check. Returns `false` if nothing changed: the game is over, the
/// puzzle was already solved, or its prerequisite does not hold.
pub fn resolve_puzzle(state: &mut GameState, id: PuzzleId, reward: Option<Reward>) -> bool {
    if state.phase != Phase::Playing || !is_available(state, id) {
        return false;
    }
    state.puzzle_status.mark_solved(id);
    if let Some(reward) = reward {
        state.inventory.grant(reward);
    }
    if state.active.as_ref().map(ActivePuzzle::id) == Some(id) {
        state.active = None;
    }
    log::info!(
        "heist: {:?} solved ({}/6)",
        id,
        state.puzzle_status.solved_count()
    );
    check_win(state);
    true
}

/// Take `seconds` off the clock, never below zero. Hitting zero ends the
/// game on the spot.
pub fn apply_time_penalty(state: &mut GameState, seconds: u32) {
    if state.phase != Phase::Playing {
        return;
    }
    deduct(state, seconds);
    if state.time_remaining == 0 {
        finish(state, Phase::Failed, Notice::Captured);
    }
}

fn deduct(state: &mut GameState, seconds: u32) {
    state.time_remaining = state.time_remaining.saturating_sub(seconds);
    log::info!(
        "heist: -{}s penalty, {}s left",
        seconds,
        state.time_remaining
    );
}

/// Playing → Success once all six puzzles are solved.
pub fn check_win(state: &mut GameState) -> bool {
    if state.phase == Phase::Playing && state.puzzle_status.all_solved() {
        finish(state, Phase::Success, Notice::HeistSuccess);
        return true;
    }
    false
}

/// Start over: stop the running clock first, then rebuild the game around
/// a freshly started one.
pub fn reset(state: &mut GameState) {
    let stopped = state.clock.cancel();
    let rules = state.rules.clone();
    let content = Rc::clone(&state.content);
    let clock = state.clock.clone();
    *state = GameState::with_clock(rules, content, clock);
    log::info!(
        "heist: reset, run #{} (previous clock running: {})",
        state.clock.starts,
        stopped
    );
}

/// Per-puzzle follow-up after a handler reports success.
fn complete(state: &mut GameState, id: PuzzleId, reward: Option<Reward>) {
    if state.phase != Phase::Playing || !is_available(state, id) {
        return;
    }
    let penalty = state.rules.window_penalty_secs;
    // The alarm trips as part of the solve, so it lands even on the winning
    // move; there the penalty is taken before the win and cannot fail the run
    if id == PuzzleId::Window {
        state.alarm_triggered = true;
        if completes_the_set(state, id) {
            deduct(state, penalty);
        }
    }
    resolve_puzzle(state, id, reward);
    // The last puzzle already raised the success notice
    if state.phase != Phase::Playing {
        return;
    }
    match id {
        PuzzleId::Bookshelf => notify(state, Notice::CodeFound),
        PuzzleId::Couch => notify(state, Notice::GlassFound),
        PuzzleId::Safe => {
            state.pending_unlock.cancel();
            notify(state, Notice::SafeOpened);
        }
        PuzzleId::Window => {
            notify(state, Notice::AlarmTriggered);
            apply_time_penalty(state, penalty);
        }
        PuzzleId::Helix => notify(state, Notice::AccessGranted),
        PuzzleId::Vault => {}
    }
}

fn completes_the_set(state: &GameState, id: PuzzleId) -> bool {
    PuzzleId::ALL
        .iter()
        .all(|&p| p == id || state.puzzle_status.is_solved(p))
}

/// Leave Playing. Runs at most once per game because every caller checks
/// the phase first.
fn finish(state: &mut GameState, phase: Phase, notice: Notice) {
    state.phase = phase;
    state.active = None;
    state.clock.cancel();
    log::info!(
        "heist: game over {:?} with {}s left",
        phase,
        state.time_remaining
    );
    notify(state, notice);
}

fn notify(state: &mut GameState, notice: Notice) {
    let text = state
        .content
        .notices
        .get(notice)
        .replace("{code}", &state.content.bookshelf.code);
    state.add_log(&text, true);
    state.toast = Some(Toast {
        notice,
        text,
        ticks_left: state.rules.toast_ticks,
    });
}
