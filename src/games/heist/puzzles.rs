//! Puzzle handlers.
//!
//! One variant per puzzle, each holding only its own transient input. A
//! handler never touches [`GameState`](super::state::GameState): it reports
//! an [`Outcome`] and the controller in `logic` applies it.

use crate::time::Delay;

use super::content::Content;
use super::state::{PuzzleId, Reward};

const SAFE_DIGITS: usize = 4;

/// Player input routed to the open puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleInput {
    /// Pick option `n` (0-based) of a multiple-choice puzzle.
    Choose(usize),
    /// Type a character on the safe keypad. Non-digits are ignored.
    Digit(char),
    /// Remove the last safe digit.
    Erase,
    /// Press the puzzle's action button.
    Confirm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Solved(Option<Reward>),
}

/// Read-only view of the game a handler may consult.
pub struct PuzzleContext<'a> {
    pub content: &'a Content,
    /// `None` until the bookshelf has given up the code.
    pub safe_code: Option<&'a str>,
    /// Ticks between a correct code and the safe opening.
    pub safe_confirm_ticks: u32,
}

/// Keypad state for the safe.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SafeDial {
    digits: String,
    confirm: Delay,
}

impl SafeDial {
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// True while a correct code is waiting to auto-confirm.
    pub fn is_unlocking(&self) -> bool {
        self.confirm.is_armed()
    }

    /// The confirm countdown, if a correct code is still unlocking.
    pub fn into_pending(self) -> Option<Delay> {
        self.is_unlocking().then_some(self.confirm)
    }

    fn press(&mut self, c: char, ctx: &PuzzleContext) {
        if !c.is_ascii_digit() || self.digits.len() >= SAFE_DIGITS {
            return;
        }
        self.digits.push(c);
        // Without a discovered code the dial can never match
        if ctx.safe_code == Some(self.digits.as_str()) {
            self.confirm.arm(ctx.safe_confirm_ticks);
        }
    }

    fn erase(&mut self) {
        self.digits.pop();
        self.confirm.cancel();
    }
}

/// The open puzzle dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivePuzzle {
    Bookshelf,
    Couch,
    Safe(SafeDial),
    Window,
    Helix { selected: Option<usize> },
    Vault,
}

impl ActivePuzzle {
    pub fn open(id: PuzzleId) -> Self {
        match id {
            PuzzleId::Bookshelf => ActivePuzzle::Bookshelf,
            PuzzleId::Couch => ActivePuzzle::Couch,
            PuzzleId::Safe => ActivePuzzle::Safe(SafeDial::default()),
            PuzzleId::Window => ActivePuzzle::Window,
            PuzzleId::Helix => ActivePuzzle::Helix { selected: None },
            PuzzleId::Vault => ActivePuzzle::Vault,
        }
    }

    pub fn id(&self) -> PuzzleId {
        match self {
            ActivePuzzle::Bookshelf => PuzzleId::Bookshelf,
            ActivePuzzle::Couch => PuzzleId::Couch,
            ActivePuzzle::Safe(_) => PuzzleId::Safe,
            ActivePuzzle::Window => PuzzleId::Window,
            ActivePuzzle::Helix { .. } => PuzzleId::Helix,
            ActivePuzzle::Vault => PuzzleId::Vault,
        }
    }

    /// Apply one input. Anything a puzzle does not understand is a no-op.
    pub fn handle(&mut self, input: PuzzleInput, ctx: &PuzzleContext) -> Outcome {
        match (self, input) {
            (ActivePuzzle::Bookshelf, PuzzleInput::Choose(i)) if i == ctx.content.bookshelf.answer => {
                Outcome::Solved(Some(Reward::SafeCode(ctx.content.bookshelf.code.clone())))
            }
            (ActivePuzzle::Couch, PuzzleInput::Confirm) => Outcome::Solved(Some(Reward::MagnifyingGlass)),
            (ActivePuzzle::Safe(dial), PuzzleInput::Digit(c)) => {
                dial.press(c, ctx);
                Outcome::Pending
            }
            (ActivePuzzle::Safe(dial), PuzzleInput::Erase) => {
                dial.erase();
                Outcome::Pending
            }
            (ActivePuzzle::Window, PuzzleInput::Confirm) => Outcome::Solved(None),
            (ActivePuzzle::Helix { selected }, PuzzleInput::Choose(i)) => {
                if i < ctx.content.helix.options.len() {
                    *selected = Some(i);
                }
                Outcome::Pending
            }
            (ActivePuzzle::Helix { selected }, PuzzleInput::Confirm) => {
                if *selected == Some(ctx.content.helix.answer) {
                    Outcome::Solved(None)
                } else {
                    Outcome::Pending
                }
            }
            (ActivePuzzle::Vault, PuzzleInput::Confirm) => Outcome::Solved(None),
            _ => Outcome::Pending,
        }
    }

    /// Feed game ticks to time-based handlers (the safe's auto-confirm).
    pub fn advance(&mut self, delta_ticks: u32) -> Outcome {
        if let ActivePuzzle::Safe(dial) = self {
            if dial.confirm.advance(delta_ticks) {
                return Outcome::Solved(None);
            }
        }
        Outcome::Pending
    }

    /// Whether the confirm button should be offered for the helix answer.
    pub fn helix_unlocked(&self, content: &Content) -> bool {
        matches!(self, ActivePuzzle::Helix { selected } if *selected == Some(content.helix.answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> Content {
        Content::builtin().unwrap()
    }

    fn ctx<'a>(content: &'a Content, code: Option<&'a str>) -> PuzzleContext<'a> {
        PuzzleContext {
            content,
            safe_code: code,
            safe_confirm_ticks: 5,
        }
    }

    fn type_code(p: &mut ActivePuzzle, digits: &str, ctx: &PuzzleContext) {
        for c in digits.chars() {
            assert_eq!(p.handle(PuzzleInput::Digit(c), ctx), Outcome::Pending);
        }
    }

    #[test]
    fn open_and_id_agree() {
        for id in PuzzleId::ALL {
            assert_eq!(ActivePuzzle::open(id).id(), id);
        }
    }

    #[test]
    fn bookshelf_only_the_code_book_works() {
        let c = content();
        let cx = ctx(&c, None);
        let mut p = ActivePuzzle::open(PuzzleId::Bookshelf);
        for i in [0, 1, 3, 4, 5, 6, 100] {
            assert_eq!(p.handle(PuzzleInput::Choose(i), &cx), Outcome::Pending);
        }
        assert_eq!(p.handle(PuzzleInput::Confirm, &cx), Outcome::Pending);
        assert_eq!(
            p.handle(PuzzleInput::Choose(2), &cx),
            Outcome::Solved(Some(Reward::SafeCode("1985".into())))
        );
    }

    #[test]
    fn couch_gives_the_glass() {
        let c = content();
        let mut p = ActivePuzzle::open(PuzzleId::Couch);
        assert_eq!(
            p.handle(PuzzleInput::Confirm, &ctx(&c, None)),
            Outcome::Solved(Some(Reward::MagnifyingGlass))
        );
    }

    #[test]
    fn safe_without_code_never_unlocks() {
        let c = content();
        let cx = ctx(&c, None);
        let mut p = ActivePuzzle::open(PuzzleId::Safe);
        type_code(&mut p, "1985", &cx);
        assert_eq!(p.advance(100), Outcome::Pending);
    }

    #[test]
    fn safe_auto_confirms_after_delay() {
        let c = content();
        let cx = ctx(&c, Some("1985"));
        let mut p = ActivePuzzle::open(PuzzleId::Safe);
        type_code(&mut p, "1985", &cx);
        assert_eq!(p.advance(4), Outcome::Pending);
        assert_eq!(p.advance(1), Outcome::Solved(None));
        // Fires only once
        assert_eq!(p.advance(10), Outcome::Pending);
    }

    #[test]
    fn safe_ignores_non_digits_and_extra_digits() {
        let c = content();
        let cx = ctx(&c, Some("1985"));
        let mut p = ActivePuzzle::open(PuzzleId::Safe);
        type_code(&mut p, "1a9 8-5", &cx);
        type_code(&mut p, "7", &cx);
        match &p {
            ActivePuzzle::Safe(dial) => {
                assert_eq!(dial.digits(), "1985");
                assert!(dial.is_unlocking());
            }
            other => panic!("unexpected puzzle {other:?}"),
        }
    }

    #[test]
    fn safe_wrong_code_then_correction() {
        let c = content();
        let cx = ctx(&c, Some("1985"));
        let mut p = ActivePuzzle::open(PuzzleId::Safe);
        type_code(&mut p, "1986", &cx);
        assert_eq!(p.advance(10), Outcome::Pending);

        p.handle(PuzzleInput::Erase, &cx);
        type_code(&mut p, "5", &cx);
        assert_eq!(p.advance(5), Outcome::Solved(None));
    }

    #[test]
    fn erasing_cancels_pending_unlock() {
        let c = content();
        let cx = ctx(&c, Some("1985"));
        let mut p = ActivePuzzle::open(PuzzleId::Safe);
        type_code(&mut p, "1985", &cx);
        p.advance(3);
        p.handle(PuzzleInput::Erase, &cx);
        assert_eq!(p.advance(10), Outcome::Pending);
    }

    #[test]
    fn unlocking_dial_hands_over_its_countdown() {
        let c = content();
        let cx = ctx(&c, Some("1985"));
        let mut p = ActivePuzzle::open(PuzzleId::Safe);
        type_code(&mut p, "1985", &cx);
        p.advance(2);
        let ActivePuzzle::Safe(dial) = p else {
            panic!("safe dialog expected");
        };
        let mut delay = dial.into_pending().expect("correct code is unlocking");
        assert!(!delay.advance(2));
        assert!(delay.advance(1));
    }

    #[test]
    fn idle_dial_has_nothing_pending() {
        let c = content();
        let cx = ctx(&c, Some("1985"));
        let mut p = ActivePuzzle::open(PuzzleId::Safe);
        type_code(&mut p, "198", &cx);
        let ActivePuzzle::Safe(dial) = p else {
            panic!("safe dialog expected");
        };
        assert_eq!(dial.into_pending(), None);
    }

    #[test]
    fn helix_needs_correct_selection_before_confirm() {
        let c = content();
        let cx = ctx(&c, None);
        let mut p = ActivePuzzle::open(PuzzleId::Helix);

        assert_eq!(p.handle(PuzzleInput::Confirm, &cx), Outcome::Pending);
        p.handle(PuzzleInput::Choose(0), &cx);
        assert!(!p.helix_unlocked(&c));
        assert_eq!(p.handle(PuzzleInput::Confirm, &cx), Outcome::Pending);

        p.handle(PuzzleInput::Choose(2), &cx);
        assert!(p.helix_unlocked(&c));
        // Out-of-range choice keeps the previous selection
        p.handle(PuzzleInput::Choose(9), &cx);
        assert!(p.helix_unlocked(&c));
        assert_eq!(p.handle(PuzzleInput::Confirm, &cx), Outcome::Solved(None));
    }

    #[test]
    fn window_and_vault_are_single_actions() {
        let c = content();
        let cx = ctx(&c, None);
        for id in [PuzzleId::Window, PuzzleId::Vault] {
            let mut p = ActivePuzzle::open(id);
            assert_eq!(p.handle(PuzzleInput::Choose(0), &cx), Outcome::Pending);
            assert_eq!(p.handle(PuzzleInput::Confirm, &cx), Outcome::Solved(None));
        }
    }
}
