//! Semantic action IDs for Bank Heist click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Scene ───────────────────────────────────────────────────────
/// Open hotspot (base + scene index 0..5).
pub const OPEN_HOTSPOT_BASE: u16 = 10;

// ── Puzzle dialogs ──────────────────────────────────────────────
/// Pick a choice (base + choice index).
pub const CHOICE_BASE: u16 = 20;
/// Safe keypad digit (base + digit 0..9).
pub const DIGIT_BASE: u16 = 40;
pub const ERASE_DIGIT: u16 = 50;
pub const CONFIRM: u16 = 60;

// ── Modal chrome ────────────────────────────────────────────────
pub const CLOSE_MODAL: u16 = 100;
/// Swallows taps inside a dialog that miss every button.
pub const MODAL_SINK: u16 = 101;

// ── End screens ─────────────────────────────────────────────────
pub const RESTART: u16 = 110;
