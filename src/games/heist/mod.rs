/// Bank Heist: a timed six-puzzle escape room.

pub mod actions;
pub mod content;
pub mod logic;
pub mod puzzles;
pub mod render;
pub mod scene;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use content::Content;
use puzzles::{ActivePuzzle, PuzzleInput};
use state::{GameRules, GameState, Phase, PuzzleId};

pub struct HeistGame {
    pub state: GameState,
}

impl HeistGame {
    pub fn new(content: Rc<Content>) -> Self {
        Self {
            state: GameState::new(GameRules::default(), content),
        }
    }

    fn handle_end_screen(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('r') | InputEvent::Key('R') | InputEvent::Click(RESTART) => {
                logic::reset(&mut self.state);
                true
            }
            _ => false,
        }
    }

    fn handle_dialog(&mut self, event: &InputEvent) -> bool {
        let is_safe = matches!(self.state.active, Some(ActivePuzzle::Safe(_)));
        let input = match *event {
            InputEvent::Cancel | InputEvent::Click(CLOSE_MODAL) => {
                return logic::close_puzzle(&mut self.state);
            }
            InputEvent::Click(MODAL_SINK) => return true,
            InputEvent::Submit | InputEvent::Click(CONFIRM) => PuzzleInput::Confirm,
            InputEvent::Erase | InputEvent::Click(ERASE_DIGIT) => PuzzleInput::Erase,
            InputEvent::Key(c) if is_safe => PuzzleInput::Digit(c),
            InputEvent::Key(c @ '1'..='9') => PuzzleInput::Choose(c as usize - '1' as usize),
            InputEvent::Click(id) if (DIGIT_BASE..DIGIT_BASE + 10).contains(&id) => {
                PuzzleInput::Digit(char::from(b'0' + (id - DIGIT_BASE) as u8))
            }
            InputEvent::Click(id) if (CHOICE_BASE..DIGIT_BASE).contains(&id) => {
                PuzzleInput::Choose((id - CHOICE_BASE) as usize)
            }
            _ => return false,
        };
        logic::submit_input(&mut self.state, input)
    }

    fn handle_scene(&mut self, event: &InputEvent) -> bool {
        let index = match *event {
            InputEvent::Key(c @ '1'..='6') => c as usize - '1' as usize,
            InputEvent::Click(id) if (OPEN_HOTSPOT_BASE..OPEN_HOTSPOT_BASE + 6).contains(&id) => {
                (id - OPEN_HOTSPOT_BASE) as usize
            }
            _ => return false,
        };
        match PuzzleId::from_index(index) {
            Some(id) => logic::attempt_open(&mut self.state, id),
            None => false,
        }
    }
}

impl Game for HeistGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.state.phase != Phase::Playing {
            self.handle_end_screen(event)
        } else if self.state.active.is_some() {
            self.handle_dialog(event)
        } else {
            self.handle_scene(event)
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        logic::advance(&mut self.state, delta_ticks);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
