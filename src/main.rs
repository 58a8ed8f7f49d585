mod games;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use games::heist::content::Content;
use games::heist::HeistGame;
use games::Game;
use input::{ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::{GameTime, TICKS_PER_SEC};

/// Resolve a mouse position against the grid container's bounding rect.
fn dom_hit_test(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let hit = cs.hit_test_pixels(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    );
    log::debug!("click: x={} y={} hit={:?}", mouse_x, mouse_y, hit);
    hit
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger: {}", e).into());
    }

    let content = Content::builtin().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let game = Rc::new(RefCell::new(HeistGame::new(Rc::new(content))));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;
    log::info!("heist: started");

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let hit = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_hit_test(mouse_event.x, mouse_event.y, &cs)
            };

            if let Some(action_id) = hit {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Enter => InputEvent::Submit,
                KeyCode::Backspace => InputEvent::Erase,
                KeyCode::Esc => InputEvent::Cancel,
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    let game_time = RefCell::new(GameTime::new(TICKS_PER_SEC));
    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let ticks = game_time.borrow_mut().update(now_ms());
            let mut game = game.borrow_mut();
            if ticks > 0 {
                game.tick(ticks);
            }

            let size = f.area();
            click_state.borrow_mut().begin_frame(size.width, size.height);
            game.render(f, size, &click_state);
        }
    });

    Ok(())
}
