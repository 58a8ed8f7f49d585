/// Bank Heist game state.

use std::rc::Rc;

use crate::time::{Delay, IntervalTimer, TICKS_PER_SEC};

use super::content::Content;
use super::puzzles::ActivePuzzle;

/// The six puzzles. Closed set: every dispatch over it is an exhaustive match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PuzzleId {
    Bookshelf,
    Couch,
    Safe,
    Window,
    Helix,
    Vault,
}

impl PuzzleId {
    /// Scene order. Hotspot keys `1`..`6` follow this order.
    pub const ALL: [PuzzleId; 6] = [
        PuzzleId::Bookshelf,
        PuzzleId::Couch,
        PuzzleId::Safe,
        PuzzleId::Window,
        PuzzleId::Helix,
        PuzzleId::Vault,
    ];

    pub fn index(self) -> usize {
        match self {
            PuzzleId::Bookshelf => 0,
            PuzzleId::Couch => 1,
            PuzzleId::Safe => 2,
            PuzzleId::Window => 3,
            PuzzleId::Helix => 4,
            PuzzleId::Vault => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<PuzzleId> {
        Self::ALL.get(index).copied()
    }

    /// Whether this puzzle's prerequisite holds. Solved-ness is checked
    /// separately.
    pub fn prerequisite_met(self, status: &PuzzleStatus, inventory: &Inventory) -> bool {
        match self {
            PuzzleId::Bookshelf | PuzzleId::Couch | PuzzleId::Window => true,
            PuzzleId::Safe => inventory.has_magnifying_glass,
            PuzzleId::Helix => status.is_solved(PuzzleId::Safe),
            PuzzleId::Vault => status.is_solved(PuzzleId::Helix),
        }
    }
}

/// Solved flags for all six puzzles. Flags only ever go from false to true.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PuzzleStatus {
    solved: [bool; 6],
}

impl PuzzleStatus {
    pub fn is_solved(&self, id: PuzzleId) -> bool {
        self.solved[id.index()]
    }

    /// Mark `id` solved. Returns `false` if it already was.
    pub fn mark_solved(&mut self, id: PuzzleId) -> bool {
        let slot = &mut self.solved[id.index()];
        let newly = !*slot;
        *slot = true;
        newly
    }

    pub fn solved_count(&self) -> usize {
        self.solved.iter().filter(|s| **s).count()
    }

    pub fn all_solved(&self) -> bool {
        self.solved.iter().all(|s| *s)
    }
}

/// Inventory data granted upon solving a puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reward {
    SafeCode(String),
    MagnifyingGlass,
}

/// Write-once inventory: a field, once set, stays set until reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub has_magnifying_glass: bool,
    pub safe_code: Option<String>,
}

impl Inventory {
    /// Merge a reward. Returns `false` if the field was already set.
    pub fn grant(&mut self, reward: Reward) -> bool {
        match reward {
            Reward::MagnifyingGlass => {
                let newly = !self.has_magnifying_glass;
                self.has_magnifying_glass = true;
                newly
            }
            Reward::SafeCode(code) => {
                if self.safe_code.is_some() {
                    return false;
                }
                self.safe_code = Some(code);
                true
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Success,
    Failed,
}

/// Transient notifications raised by the game. The view decides how to show
/// them; text comes from the content table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    CodeFound,
    GlassFound,
    SafeOpened,
    AlarmTriggered,
    AccessGranted,
    HeistSuccess,
    Captured,
}

impl Notice {
    /// Alarming notices are drawn in red.
    pub fn is_alert(self) -> bool {
        matches!(self, Notice::AlarmTriggered | Notice::Captured)
    }
}

/// The notice currently on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub notice: Notice,
    /// Content text with placeholders filled in.
    pub text: String,
    pub ticks_left: u32,
}

/// Represents a message log entry.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Tunable rules. Fixed at compile time; `Default` is the shipped game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRules {
    /// Starting clock in seconds (15 minutes).
    pub time_limit_secs: u32,
    /// Seconds lost when the alarm goes off.
    pub window_penalty_secs: u32,
    /// Ticks between a correct safe code and the safe opening (0.5s).
    pub safe_confirm_ticks: u32,
    /// Ticks a notice stays on screen (3s).
    pub toast_ticks: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            time_limit_secs: 900,
            window_penalty_secs: 120,
            safe_confirm_ticks: TICKS_PER_SEC / 2,
            toast_ticks: TICKS_PER_SEC * 3,
        }
    }
}

const MAX_LOG: usize = 50;

pub struct GameState {
    pub rules: GameRules,
    pub content: Rc<Content>,
    pub time_remaining: u32,
    pub puzzle_status: PuzzleStatus,
    pub inventory: Inventory,
    pub phase: Phase,
    pub alarm_triggered: bool,
    /// Shown on the success screen. Nothing grants hints yet.
    pub hints_used: u32,
    /// The open puzzle dialog, if any.
    pub active: Option<ActivePuzzle>,
    /// Safe confirm still counting down after its dialog was closed.
    pub pending_unlock: Delay,
    pub toast: Option<Toast>,
    pub log: Vec<LogEntry>,
    /// One-second tick source. Cancelled when the phase leaves Playing.
    pub clock: IntervalTimer,
}

impl GameState {
    pub fn new(rules: GameRules, content: Rc<Content>) -> Self {
        Self::with_clock(rules, content, IntervalTimer::new(TICKS_PER_SEC))
    }

    /// Build a fresh game around an existing (stopped) tick source and start it.
    pub(super) fn with_clock(rules: GameRules, content: Rc<Content>, mut clock: IntervalTimer) -> Self {
        clock.start();
        let mut state = Self {
            time_remaining: rules.time_limit_secs,
            rules,
            puzzle_status: PuzzleStatus::default(),
            inventory: Inventory::default(),
            phase: Phase::Playing,
            alarm_triggered: false,
            hints_used: 0,
            active: None,
            pending_unlock: Delay::default(),
            toast: None,
            log: Vec::new(),
            clock,
            content,
        };
        let intro = state.content.screens.intro.clone();
        state.add_log(&intro, true);
        state
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    /// Seconds used so far, for the success screen.
    pub fn time_elapsed(&self) -> u32 {
        self.rules.time_limit_secs.saturating_sub(self.time_remaining)
    }
}

/// `m:ss` clock text.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
