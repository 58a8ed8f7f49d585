//! Reusable clickable UI components.
//!
//! Each component keeps rendering and click-target registration together so
//! that what is drawn and what is tappable cannot drift apart.
//!
//! # Components
//!
//! - [`ClickableList`]: vertical list of lines with per-row click targets.
//! - [`Modal`]: a bordered dialog drawn over the rest of the screen.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── ClickableList ──────────────────────────────────────────────

/// Columns taken by one `push_keys` key: ` [k] `.
const KEY_WIDTH: usize = 5;

/// A builder that pairs rendered [`Line`]s with click actions.
///
/// Lines are assumed not to wrap: every logical line occupies one row.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
    /// `(line_index, column, width, action_id)` for lines holding several keys.
    segments: Vec<(u16, u16, u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that triggers `action_id` when tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    /// Add a `[k] label` button line.
    pub fn push_button(&mut self, key: &str, label: impl Into<String>, enabled: bool, action_id: u16) {
        let (key_style, label_style) = if enabled {
            (
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            )
        };
        let line = Line::from(vec![
            Span::styled(format!(" [{}] ", key), key_style),
            Span::styled(label.into(), label_style),
        ]);
        self.push_clickable(line, action_id);
    }

    /// Add one line of `[k]` keys, each its own click target.
    pub fn push_keys(&mut self, keys: &[(char, u16)]) {
        let line_idx = self.lines.len() as u16;
        let style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let mut spans = Vec::with_capacity(keys.len());
        for (i, &(key, action_id)) in keys.iter().enumerate() {
            self.segments
                .push((line_idx, (i * KEY_WIDTH) as u16, KEY_WIDTH as u16, action_id));
            spans.push(Span::styled(format!(" [{}] ", key), style));
        }
        self.lines.push(Line::from(spans));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by borders above and
    /// below the content.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, top_offset: u16, bottom_offset: u16) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
        // Key segments sit after a one-column left border
        for &(line_idx, col, width, action_id) in &self.segments {
            let row = content_y + line_idx;
            let x = area.x + 1 + col;
            if row >= content_end || x + width > area.x + area.width {
                continue;
            }
            cs.add_click_target(Rect::new(x, row, width, 1), action_id);
        }
    }
}

// ── Modal ──────────────────────────────────────────────────────

/// A centered dialog with a title bar and a close button.
///
/// The whole dialog area is registered as a click sink first, so taps that
/// miss every button inside are swallowed instead of reaching the scene
/// below.
pub struct Modal<'a> {
    title: String,
    accent: Color,
    body: ClickableList<'a>,
    close_action: u16,
    sink_action: u16,
}

impl<'a> Modal<'a> {
    pub fn new(title: impl Into<String>, accent: Color, close_action: u16, sink_action: u16) -> Self {
        Self {
            title: title.into(),
            accent,
            body: ClickableList::new(),
            close_action,
            sink_action,
        }
    }

    pub fn body(mut self, body: ClickableList<'a>) -> Self {
        self.body = body;
        self
    }

    /// Rows needed to show the body plus borders and the close row.
    pub fn height(&self) -> u16 {
        self.body.len() as u16 + 4
    }

    pub fn render(self, f: &mut Frame, screen: Rect, width: u16, cs: &mut ClickState) {
        let area = centered_rect(screen, width, self.height());
        cs.add_click_target(area, self.sink_action);

        let mut body = self.body;
        body.push(Line::from(""));
        body.push_button("Esc", "Close", true, self.close_action);
        body.register_targets(area, cs, 1, 1);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ));
        // No wrapping: one line per row keeps the click targets aligned
        let widget = Paragraph::new(body.into_lines()).block(block);
        f.render_widget(Clear, area);
        f.render_widget(widget, area);
    }
}

/// A `width` x `height` rectangle centered in `outer`, clipped to fit.
pub fn centered_rect(outer: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(outer.width);
    let h = height.min(outer.height);
    Rect::new(
        outer.x + (outer.width - w) / 2,
        outer.y + (outer.height - h) / 2,
        w,
        h,
    )
}
