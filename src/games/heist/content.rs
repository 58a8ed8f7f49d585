//! Text and answer keys for the heist, loaded from `content.json`.
//!
//! Everything a writer might want to change (titles, choice labels, the
//! correct answers, the safe code, notice text, hotspot positions) lives in
//! the table. Game logic only looks things up by [`PuzzleId`] or [`Notice`].

use serde::Deserialize;
use thiserror::Error;

use super::state::{Notice, PuzzleId};

const BUILTIN: &str = include_str!("content.json");

const BOOKSHELF_CHOICES: usize = 6;
const HELIX_OPTIONS: usize = 4;
const SAFE_CODE_LEN: usize = 4;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{puzzle:?} needs {expected} choices, found {found}")]
    ChoiceCount {
        puzzle: PuzzleId,
        expected: usize,
        found: usize,
    },
    #[error("{puzzle:?} answer index {answer} is outside its {choices} choices")]
    AnswerOutOfRange {
        puzzle: PuzzleId,
        answer: usize,
        choices: usize,
    },
    #[error("safe code {0:?} is not 4 digits")]
    BadSafeCode(String),
    #[error("{0:?} hotspot lies outside the scene")]
    HotspotOutOfScene(PuzzleId),
}

/// One value per puzzle, addressed by [`PuzzleId`].
#[derive(Clone, Debug, Deserialize)]
pub struct PerPuzzle<T> {
    pub bookshelf: T,
    pub couch: T,
    pub safe: T,
    pub window: T,
    pub helix: T,
    pub vault: T,
}

impl<T> PerPuzzle<T> {
    pub fn get(&self, id: PuzzleId) -> &T {
        match id {
            PuzzleId::Bookshelf => &self.bookshelf,
            PuzzleId::Couch => &self.couch,
            PuzzleId::Safe => &self.safe,
            PuzzleId::Window => &self.window,
            PuzzleId::Helix => &self.helix,
            PuzzleId::Vault => &self.vault,
        }
    }
}

/// Scene placement and dialog text for one hotspot.
#[derive(Clone, Debug, Deserialize)]
pub struct HotspotText {
    pub name: String,
    /// Horizontal position, percent of the scene width.
    pub x: u8,
    /// Vertical position, percent of the scene height.
    pub y: u8,
    pub title: String,
    pub intro: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BookshelfText {
    pub choices: Vec<String>,
    pub answer: usize,
    pub code: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ActionText {
    pub action: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SafeText {
    pub hint: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HelixText {
    pub question: String,
    pub options: Vec<String>,
    pub answer: usize,
    pub confirm: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NoticeText {
    pub code_found: String,
    pub glass_found: String,
    pub safe_opened: String,
    pub alarm_triggered: String,
    pub access_granted: String,
    pub heist_success: String,
    pub captured: String,
}

impl NoticeText {
    pub fn get(&self, notice: Notice) -> &str {
        match notice {
            Notice::CodeFound => &self.code_found,
            Notice::GlassFound => &self.glass_found,
            Notice::SafeOpened => &self.safe_opened,
            Notice::AlarmTriggered => &self.alarm_triggered,
            Notice::AccessGranted => &self.access_granted,
            Notice::HeistSuccess => &self.heist_success,
            Notice::Captured => &self.captured,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScreenText {
    pub title: String,
    pub intro: String,
    pub success_title: String,
    pub success_text: String,
    pub failure_title: String,
    pub failure_text: String,
    pub success_restart: String,
    pub failure_restart: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Content {
    pub screens: ScreenText,
    pub hotspots: PerPuzzle<HotspotText>,
    pub bookshelf: BookshelfText,
    pub couch: ActionText,
    pub safe: SafeText,
    pub window: ActionText,
    pub helix: HelixText,
    pub vault: ActionText,
    pub notices: NoticeText,
}

impl Content {
    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::load(BUILTIN)
    }

    /// Parse and validate a content table.
    pub fn load(json: &str) -> Result<Self, ContentError> {
        let content: Content = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    pub fn hotspot(&self, id: PuzzleId) -> &HotspotText {
        self.hotspots.get(id)
    }

    fn validate(&self) -> Result<(), ContentError> {
        check_choices(
            PuzzleId::Bookshelf,
            self.bookshelf.choices.len(),
            BOOKSHELF_CHOICES,
            self.bookshelf.answer,
        )?;
        check_choices(
            PuzzleId::Helix,
            self.helix.options.len(),
            HELIX_OPTIONS,
            self.helix.answer,
        )?;

        let code = &self.bookshelf.code;
        if code.len() != SAFE_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ContentError::BadSafeCode(code.clone()));
        }

        for id in PuzzleId::ALL {
            let h = self.hotspot(id);
            if h.x > 100 || h.y > 100 {
                return Err(ContentError::HotspotOutOfScene(id));
            }
        }
        Ok(())
    }
}

fn check_choices(
    puzzle: PuzzleId,
    found: usize,
    expected: usize,
    answer: usize,
) -> Result<(), ContentError> {
    if found != expected {
        return Err(ContentError::ChoiceCount {
            puzzle,
            expected,
            found,
        });
    }
    if answer >= found {
        return Err(ContentError::AnswerOutOfRange {
            puzzle,
            answer,
            choices: found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_value() -> serde_json::Value {
        serde_json::from_str(BUILTIN).unwrap()
    }

    fn load_value(v: &serde_json::Value) -> Result<Content, ContentError> {
        Content::load(&v.to_string())
    }

    #[test]
    fn builtin_table_loads() {
        let c = Content::builtin().unwrap();
        assert_eq!(c.bookshelf.choices[c.bookshelf.answer], "CODE");
        assert_eq!(c.bookshelf.code, "1985");
        assert_eq!(c.helix.options[c.helix.answer], "Release sleeping gases");
        assert_eq!(c.hotspot(PuzzleId::Vault).name, "Main Vault");
        assert_eq!(c.hotspot(PuzzleId::Bookshelf).x, 15);
        assert_eq!(c.hotspot(PuzzleId::Bookshelf).y, 35);
    }

    #[test]
    fn every_notice_has_text() {
        let c = Content::builtin().unwrap();
        for n in [
            Notice::CodeFound,
            Notice::GlassFound,
            Notice::SafeOpened,
            Notice::AlarmTriggered,
            Notice::AccessGranted,
            Notice::HeistSuccess,
            Notice::Captured,
        ] {
            assert!(!c.notices.get(n).is_empty(), "{n:?} has no text");
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Content::load("{"), Err(ContentError::Parse(_))));
    }

    #[test]
    fn missing_hotspot_is_a_parse_error() {
        let mut v = builtin_value();
        v["hotspots"].as_object_mut().unwrap().remove("vault");
        assert!(matches!(load_value(&v), Err(ContentError::Parse(_))));
    }

    #[test]
    fn wrong_choice_count_rejected() {
        let mut v = builtin_value();
        v["bookshelf"]["choices"].as_array_mut().unwrap().pop();
        assert!(matches!(
            load_value(&v),
            Err(ContentError::ChoiceCount {
                puzzle: PuzzleId::Bookshelf,
                expected: 6,
                found: 5
            })
        ));
    }

    #[test]
    fn answer_out_of_range_rejected() {
        let mut v = builtin_value();
        v["helix"]["answer"] = serde_json::json!(4);
        assert!(matches!(
            load_value(&v),
            Err(ContentError::AnswerOutOfRange {
                puzzle: PuzzleId::Helix,
                ..
            })
        ));
    }

    #[test]
    fn non_digit_safe_code_rejected() {
        let mut v = builtin_value();
        v["bookshelf"]["code"] = serde_json::json!("19a5");
        assert!(matches!(load_value(&v), Err(ContentError::BadSafeCode(_))));

        v["bookshelf"]["code"] = serde_json::json!("198");
        assert!(matches!(load_value(&v), Err(ContentError::BadSafeCode(_))));
    }

    #[test]
    fn hotspot_outside_scene_rejected() {
        let mut v = builtin_value();
        v["hotspots"]["window"]["x"] = serde_json::json!(101);
        assert!(matches!(
            load_value(&v),
            Err(ContentError::HotspotOutOfScene(PuzzleId::Window))
        ));
    }

    #[test]
    fn error_messages_are_readable() {
        let e = ContentError::BadSafeCode("19a5".into());
        assert_eq!(e.to_string(), "safe code \"19a5\" is not 4 digits");
    }
}
