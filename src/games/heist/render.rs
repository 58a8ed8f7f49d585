//! Bank Heist rendering: HUD, room scene, footer, puzzle dialogs, end screens.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{centered_rect, ClickableList, Modal};

use super::actions::*;
use super::puzzles::{ActivePuzzle, SafeDial};
use super::scene::{self, Hotspot};
use super::state::{format_time, GameState, Phase, PuzzleId};

/// Below this many seconds the clock turns red.
const LOW_TIME_SECS: u32 = 60;

const KEYPAD_ROWS: [&[char]; 4] = [&['1', '2', '3'], &['4', '5', '6'], &['7', '8', '9'], &['0']];

pub fn render(state: &GameState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    if state.phase != Phase::Playing {
        render_end_screen(state, f, area, click_state);
        return;
    }

    // Log panel on the right when there is room for it
    let (main_area, log_area) = if area.width >= 100 {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(70), Constraint::Length(30)])
            .split(area);
        (h[0], Some(h[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // HUD
            Constraint::Min(8),    // scene
            Constraint::Length(4), // inventory + notice
        ])
        .split(main_area);

    render_hud(state, f, chunks[0]);
    render_scene(state, f, chunks[1], click_state);
    render_footer(state, f, chunks[2]);
    if let Some(log_area) = log_area {
        render_log(state, f, log_area);
    }

    if let Some(active) = &state.active {
        render_puzzle(state, active, f, area, click_state);
    }
}

fn render_hud(state: &GameState, f: &mut Frame, area: Rect) {
    let clock_color = if state.time_remaining < LOW_TIME_SECS || state.alarm_triggered {
        Color::Red
    } else {
        Color::Green
    };

    let mut spans = vec![Span::styled(
        format!(" ⏱ {} ", format_time(state.time_remaining)),
        Style::default().fg(clock_color).add_modifier(Modifier::BOLD),
    )];
    if state.alarm_triggered {
        spans.push(Span::styled(
            " ALARM ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw("  "));
    for id in PuzzleId::ALL {
        if state.puzzle_status.is_solved(id) {
            spans.push(Span::styled("●", Style::default().fg(Color::Green)));
        } else {
            spans.push(Span::styled("○", Style::default().fg(Color::DarkGray)));
        }
    }
    spans.push(Span::styled(
        format!(" {}/6", state.puzzle_status.solved_count()),
        Style::default().fg(Color::Gray),
    ));

    let hud = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} ", state.content.screens.title),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(hud, area);
}

fn hotspot_line(state: &GameState, h: &Hotspot, narrow: bool) -> Line<'static> {
    let name = &state.content.hotspot(h.id).name;
    let (mark, style) = if h.completed {
        ("✓", Style::default().fg(Color::Green))
    } else if h.available {
        (
            "",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("×", Style::default().fg(Color::DarkGray))
    };
    let text = if narrow {
        format!("[{}]{}", h.key, mark)
    } else {
        format!("[{}] {}{}", h.key, name, mark)
    };
    Line::from(Span::styled(text, style))
}

fn render_scene(state: &GameState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Bank Lobby ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let narrow = is_narrow_layout(area.width);
    let mut cs = click_state.borrow_mut();
    for (i, h) in scene::hotspots(state).iter().enumerate() {
        let line = hotspot_line(state, h, narrow);
        let rect = scene::place(inner, h.x, h.y, line.width() as u16);
        f.render_widget(Paragraph::new(line), rect);
        if h.interactable() {
            cs.add_click_target(rect, OPEN_HOTSPOT_BASE + i as u16);
        }
    }
}

fn render_footer(state: &GameState, f: &mut Frame, area: Rect) {
    let badge = |on: bool| {
        if on {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let code = state.inventory.safe_code.as_deref().unwrap_or("----");
    let inventory = Line::from(vec![
        Span::styled(
            format!(" Code: {} ", code),
            badge(state.inventory.safe_code.is_some()),
        ),
        Span::raw(" "),
        Span::styled(" Magnifying glass ", badge(state.inventory.has_magnifying_glass)),
    ]);

    let notice = match &state.toast {
        Some(toast) => {
            let color = if toast.notice.is_alert() {
                Color::Red
            } else {
                Color::Yellow
            };
            Line::from(Span::styled(
                format!(" {}", toast.text),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(Span::styled(
            " 1-6: examine  Esc: close",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let footer = Paragraph::new(vec![inventory, notice]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Inventory "),
    );
    f.render_widget(footer, area);
}

fn render_log(state: &GameState, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

// ── Puzzle dialogs ──────────────────────────────────────────────

fn render_puzzle(
    state: &GameState,
    active: &ActivePuzzle,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let id = active.id();
    let text = state.content.hotspot(id);
    let width = 56.min(area.width);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {}", text.intro),
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));

    match active {
        ActivePuzzle::Bookshelf => {
            for (i, choice) in state.content.bookshelf.choices.iter().enumerate() {
                cl.push_button(&(i + 1).to_string(), choice.as_str(), true, CHOICE_BASE + i as u16);
            }
        }
        ActivePuzzle::Couch => {
            cl.push_button("Enter", state.content.couch.action.as_str(), true, CONFIRM);
        }
        ActivePuzzle::Safe(dial) => safe_body(state, dial, &mut cl),
        ActivePuzzle::Window => {
            cl.push_button("Enter", state.content.window.action.as_str(), true, CONFIRM);
        }
        ActivePuzzle::Helix { selected } => {
            let helix = &state.content.helix;
            cl.push(Line::from(Span::styled(
                format!(" {}", helix.question),
                Style::default().fg(Color::Cyan),
            )));
            for (i, option) in helix.options.iter().enumerate() {
                let label = if *selected == Some(i) {
                    format!("{} ◀", option)
                } else {
                    option.clone()
                };
                cl.push_button(&(i + 1).to_string(), label, true, CHOICE_BASE + i as u16);
            }
            cl.push(Line::from(""));
            let unlocked = active.helix_unlocked(&state.content);
            cl.push_button("Enter", helix.confirm.as_str(), unlocked, CONFIRM);
        }
        ActivePuzzle::Vault => {
            cl.push_button("Enter", state.content.vault.action.as_str(), true, CONFIRM);
        }
    }

    let accent = if id == PuzzleId::Window {
        Color::Red
    } else {
        Color::Yellow
    };
    let mut cs = click_state.borrow_mut();
    Modal::new(text.title.as_str(), accent, CLOSE_MODAL, MODAL_SINK)
        .body(cl)
        .render(f, area, width, &mut cs);
}

/// The safe's hint line, shown once the bookshelf has given up the code.
fn safe_hint(state: &GameState) -> Option<&str> {
    state
        .inventory
        .safe_code
        .as_ref()
        .map(|_| state.content.safe.hint.as_str())
}

fn safe_body(state: &GameState, dial: &SafeDial, cl: &mut ClickableList) {
    if let Some(hint) = safe_hint(state) {
        cl.push(Line::from(Span::styled(
            format!(" {}", hint),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let mut shown = String::new();
    for i in 0..4 {
        shown.push(dial.digits().chars().nth(i).unwrap_or('_'));
        shown.push(' ');
    }
    let (status, color) = if dial.is_unlocking() {
        ("unlocking...", Color::Green)
    } else {
        ("", Color::Yellow)
    };
    cl.push(Line::from(vec![
        Span::styled(
            format!(" Code: {}", shown),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status, Style::default().fg(Color::Green)),
    ]));
    cl.push(Line::from(""));

    for row in KEYPAD_ROWS {
        let keys: Vec<(char, u16)> = row
            .iter()
            .map(|&c| (c, DIGIT_BASE + c.to_digit(10).unwrap_or(0) as u16))
            .collect();
        cl.push_keys(&keys);
    }
    cl.push_button("⌫", "Erase", !dial.digits().is_empty(), ERASE_DIGIT);
}

// ── End screens ─────────────────────────────────────────────────

fn render_end_screen(state: &GameState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let screens = &state.content.screens;
    let (title, text, restart, color) = if state.phase == Phase::Success {
        (
            &screens.success_title,
            &screens.success_text,
            &screens.success_restart,
            Color::Yellow,
        )
    } else {
        (
            &screens.failure_title,
            &screens.failure_text,
            &screens.failure_restart,
            Color::Red,
        )
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    if state.phase == Phase::Success {
        cl.push(Line::from(format!(
            " Time used:  {}",
            format_time(state.time_elapsed())
        )));
        cl.push(Line::from(format!(" Hints used: {}", state.hints_used)));
    }
    cl.push(Line::from(format!(
        " Puzzles:    {}/6",
        state.puzzle_status.solved_count()
    )));
    if state.alarm_triggered {
        cl.push(Line::from(Span::styled(
            " The alarm went off.",
            Style::default().fg(Color::Red),
        )));
    }
    cl.push(Line::from(""));
    cl.push_button("R", restart.as_str(), true, RESTART);

    let height = cl.len() as u16 + 2;
    let rect = centered_rect(area, 60.min(area.width), height);

    let mut cs = click_state.borrow_mut();
    cl.register_targets(rect, &mut cs, 1, 1);

    let widget = Paragraph::new(cl.into_lines())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Left);
    f.render_widget(widget, rect);
}

#[cfg(test)]
mod tests {
    use super::super::logic::{self, test_support::new_state};
    use super::super::puzzles::PuzzleInput;
    use super::*;

    #[test]
    fn safe_hint_waits_for_the_code() {
        let mut s = new_state();
        assert_eq!(safe_hint(&s), None);

        assert!(logic::attempt_open(&mut s, PuzzleId::Bookshelf));
        let answer = s.content.bookshelf.answer;
        logic::submit_input(&mut s, PuzzleInput::Choose(answer));
        assert_eq!(safe_hint(&s), Some(s.content.safe.hint.as_str()));
    }
}
