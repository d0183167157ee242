// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Interactive terminal viewer.
//!
//! Renders the annotated document with tier-colored highlight cells, floating feedback tooltips,
//! a bottom minimap strip and a key-hint footer (ratatui + crossterm). Mouse move/click map onto
//! the surface's pointer events; arrow keys cycle the lock, Esc clears it, `a` toggles show-all.

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::interact::NavKey;
use crate::metrics::MonospaceMetrics;
use crate::model::{Document, FeedbackItem, Tier};
use crate::project::Geometry;
use crate::render::Frame as ViewFrame;
use crate::surface::Surface;

mod theme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const TOOLTIP_WIDTH: u16 = 38;
const TOOLTIP_MAX_HEIGHT: u16 = 8;

/// Runs the interactive viewer over `document` annotated with `items`.
pub fn run(document: Document, items: Vec<FeedbackItem>) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(document, items);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Runs the viewer with the built-in demo essay and feedback set.
pub fn run_demo() -> Result<(), Box<dyn Error>> {
    run(
        crate::model::fixtures::demo_document(),
        crate::model::fixtures::demo_feedback(),
    )
}

struct App {
    surface: Surface<MonospaceMetrics>,
    scroll: u16,
    text_area: Rect,
    should_quit: bool,
}

impl App {
    fn new(document: Document, items: Vec<FeedbackItem>) -> Self {
        let surface = Surface::with_content(
            MonospaceMetrics::cells(),
            Geometry::cells(80.0),
            document,
            items,
        );
        Self {
            surface,
            scroll: 0,
            text_area: Rect::default(),
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.surface.nav_key(NavKey::Clear),
            KeyCode::Right => {
                self.surface.nav_key(NavKey::Next);
                self.scroll_lock_into_view();
            }
            KeyCode::Left => {
                self.surface.nav_key(NavKey::Prev);
                self.scroll_lock_into_view();
            }
            KeyCode::Char('a') => self.surface.toggle_show_all(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-(self.page_height() as i32)),
            KeyCode::PageDown => self.scroll_by(self.page_height() as i32),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = u16::MAX,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let inside = self.text_area.width > 0
            && mouse.column >= self.text_area.x
            && mouse.column < self.text_area.x + self.text_area.width
            && mouse.row >= self.text_area.y
            && mouse.row < self.text_area.y + self.text_area.height;

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if inside {
                    let (x, y) = self.engine_coords(mouse.column, mouse.row);
                    self.surface.pointer_move(x, y);
                } else {
                    self.surface.pointer_leave();
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if inside {
                    let (x, y) = self.engine_coords(mouse.column, mouse.row);
                    self.surface.click(x, y);
                }
            }
            MouseEventKind::ScrollUp => self.scroll_by(-1),
            MouseEventKind::ScrollDown => self.scroll_by(1),
            _ => {}
        }
    }

    fn engine_coords(&self, column: u16, row: u16) -> (f64, f64) {
        let x = f64::from(column - self.text_area.x);
        let y = f64::from(row - self.text_area.y) + f64::from(self.scroll);
        (x, y)
    }

    fn page_height(&self) -> u16 {
        self.text_area.height.max(1)
    }

    fn scroll_by(&mut self, delta: i32) {
        let scrolled = i32::from(self.scroll) + delta;
        self.scroll = scrolled.clamp(0, i32::from(u16::MAX)) as u16;
    }

    /// After a keyboard cycle, keep the locked item's tooltip row on screen.
    fn scroll_lock_into_view(&mut self) {
        let Some(locked) = self.surface.selection().locked_key() else {
            return;
        };
        if self.text_area.height == 0 {
            return;
        }
        let view = self.surface.frame();
        let Some(tooltip) = view.tooltips.iter().find(|t| t.item == locked) else {
            return;
        };
        let row = tooltip.y.max(0.0) as u16;
        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + self.text_area.height {
            self.scroll = row + 1 - self.text_area.height;
        }
    }

    /// Re-wraps to the current viewport width and clamps the scroll offset.
    fn sync_viewport(&mut self, inner: Rect) {
        self.text_area = inner;
        let width = f64::from(inner.width.max(1));
        if self.surface.geometry().max_width != width {
            self.surface.set_geometry(Geometry::cells(width));
        }
    }

    fn clamp_scroll(&mut self, line_count: usize) {
        let max_scroll = line_count.saturating_sub(self.text_area.height as usize);
        self.scroll = self.scroll.min(max_scroll.min(u16::MAX as usize) as u16);
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let block = Block::default().borders(Borders::ALL).title(" marginalia ");
    let inner = block.inner(chunks[0]);
    app.sync_viewport(inner);

    let view = app.surface.frame();
    app.clamp_scroll(view.lines.len());

    let lines = styled_lines(&view);
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, chunks[0]);

    frame.render_widget(
        Paragraph::new(Line::from(minimap_spans(&view, chunks[1].width))),
        chunks[1],
    );

    draw_footer(frame, chunks[2]);
    draw_tooltips(frame, app, &view, inner);
}

/// Splits each laid-out line into styled runs from the frame's highlight fills.
///
/// An active fill wins over an overlapping base fill; otherwise the first-defined item wins,
/// matching hit-test order.
fn styled_lines(view: &ViewFrame) -> Vec<Line<'static>> {
    let mut out = Vec::with_capacity(view.lines.len());

    for (row, line) in view.lines.iter().enumerate() {
        let mut spans = Vec::new();
        let mut buf = String::new();
        let mut current = Style::default();

        for (col, ch) in line.text().chars().enumerate() {
            if ch == '\n' {
                continue;
            }
            let style = cell_style(view, row, col).unwrap_or_default();
            if style != current {
                if !buf.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut buf), current));
                }
                current = style;
            }
            buf.push(ch);
        }

        if !buf.is_empty() {
            spans.push(Span::styled(buf, current));
        } else if spans.is_empty() {
            spans.push(Span::raw(String::new()));
        }

        out.push(Line::from(spans));
    }

    out
}

fn cell_style(view: &ViewFrame, row: usize, col: usize) -> Option<Style> {
    let covering = view.highlights.iter().filter(|h| {
        let rect = h.rect;
        let y = row as f64;
        let x = col as f64;
        y >= rect.y && y < rect.y + rect.height && x >= rect.x && x < rect.x + rect.width
    });

    let mut first: Option<(Tier, bool)> = None;
    for highlight in covering {
        let entry = (highlight.rect.tier, highlight.is_active());
        if entry.1 {
            return Some(theme::highlight_style(entry.0, true));
        }
        first.get_or_insert(entry);
    }
    first.map(|(tier, active)| theme::highlight_style(tier, active))
}

/// One terminal row standing in for the canvas minimap strip; later segments paint over
/// earlier ones, matching the canvas draw order.
fn minimap_spans(view: &ViewFrame, width: u16) -> Vec<Span<'static>> {
    let width = width as usize;
    let mut cells: Vec<Option<Tier>> = vec![None; width];
    for segment in &view.minimap {
        let start = segment.x.max(0.0) as usize;
        let end = (segment.x + segment.width).ceil() as usize;
        for cell in cells.iter_mut().take(end.min(width)).skip(start.min(width)) {
            *cell = Some(segment.tier);
        }
    }

    let mut spans = Vec::new();
    let mut run_len = 0usize;
    let mut run_tier: Option<Tier> = None;
    for (idx, tier) in cells.iter().enumerate() {
        if idx == 0 || *tier == run_tier {
            run_tier = *tier;
            run_len += 1;
            continue;
        }
        spans.push(minimap_run(run_len, run_tier));
        run_tier = *tier;
        run_len = 1;
    }
    if run_len > 0 {
        spans.push(minimap_run(run_len, run_tier));
    }
    spans
}

fn minimap_run(len: usize, tier: Option<Tier>) -> Span<'static> {
    let bg = match tier {
        Some(tier) => theme::tier_color(tier),
        None => theme::color(theme::MINIMAP_BG),
    };
    Span::styled(" ".repeat(len), Style::default().bg(bg))
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " click lock/unlock · ←/→ cycle · Esc clear · a show all · ↑/↓ scroll · q quit",
            theme::footer_hint_style(),
        ))),
        chunks[0],
    );

    let mut legend = vec![Span::raw(" ")];
    for tier in Tier::ALL {
        legend.push(Span::styled("  ", Style::default().bg(theme::tier_color(tier))));
        legend.push(Span::raw(format!(" {}  ", tier.label())));
    }
    frame.render_widget(Paragraph::new(Line::from(legend)), chunks[1]);
}

fn draw_tooltips(frame: &mut Frame<'_>, app: &App, view: &ViewFrame, inner: Rect) {
    for tooltip in &view.tooltips {
        let Some(item) = app.surface.feedback().get(tooltip.item) else {
            continue;
        };
        let Some(area) = tooltip_area(tooltip.x, tooltip.y, app.scroll, inner) else {
            continue;
        };
        frame.render_widget(Clear, area);
        frame.render_widget(tooltip_widget(item), area);
    }
}

/// Clamps a tooltip near its anchor so it stays inside the text viewport; anchors scrolled out
/// of view yield no popup.
fn tooltip_area(x: f64, y: f64, scroll: u16, inner: Rect) -> Option<Rect> {
    if inner.width < 8 || inner.height < 3 {
        return None;
    }

    let anchor_row = y.max(0.0) as u16;
    if anchor_row < scroll {
        return None;
    }
    let row_in_view = anchor_row - scroll;
    if row_in_view >= inner.height {
        return None;
    }

    let width = TOOLTIP_WIDTH.min(inner.width);
    let height = TOOLTIP_MAX_HEIGHT.min(inner.height);

    let max_x = inner.x + inner.width - width;
    let sx = (inner.x + (x.max(0.0) as u16).min(inner.width)).min(max_x);
    let max_y = inner.y + inner.height - height;
    let sy = (inner.y + row_in_view).min(max_y);

    Some(Rect::new(sx, sy, width, height))
}

fn tooltip_widget(item: &FeedbackItem) -> Paragraph<'static> {
    let title = format!(" {} ({}%) ", item.criterion, item.score);
    Paragraph::new(item.feedback.clone())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::tooltip_border_style())
                .title(title),
        )
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    /// Acquires raw mode, the alternate screen and mouse capture as one unit; every failure
    /// path and [`Drop`] release all three together.
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}
