//! Where hotspots sit in the room and whether they can be used.

use ratzilla::ratatui::layout::Rect;

use super::state::{GameState, PuzzleId};

/// Derived view of one hotspot for the current frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hotspot {
    pub id: PuzzleId,
    /// Keyboard shortcut, `'1'..='6'`.
    pub key: char,
    pub x: u8,
    pub y: u8,
    pub available: bool,
    pub completed: bool,
}

impl Hotspot {
    pub fn interactable(&self) -> bool {
        self.available && !self.completed
    }
}

pub fn hotspots(state: &GameState) -> Vec<Hotspot> {
    PuzzleId::ALL
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let text = state.content.hotspot(id);
            Hotspot {
                id,
                key: char::from(b'1' + i as u8),
                x: text.x,
                y: text.y,
                available: id.prerequisite_met(&state.puzzle_status, &state.inventory),
                completed: state.puzzle_status.is_solved(id),
            }
        })
        .collect()
}

/// One-row label rect centered on a percentage position, kept inside `scene`.
pub fn place(scene: Rect, x_pct: u8, y_pct: u8, label_width: u16) -> Rect {
    let width = label_width.min(scene.width);
    let cx = scene.x as u32 + scene.width as u32 * x_pct.min(100) as u32 / 100;
    let cy = scene.y as u32 + scene.height.saturating_sub(1) as u32 * y_pct.min(100) as u32 / 100;

    let max_x = (scene.x + scene.width - width) as u32;
    let x = cx.saturating_sub(width as u32 / 2).clamp(scene.x as u32, max_x);
    Rect::new(x as u16, cy as u16, width, 1.min(scene.height))
}
