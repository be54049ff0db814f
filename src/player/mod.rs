//! The live terminal front end.
//!
//! Runs the scene at a fixed frame rate and drives it to the terminal.
//! The player does not decide anything about the door or the figures; it
//! forwards input to the scene, asks the engine what to draw, and writes
//! only the cells that changed since the previous frame.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use crossterm::{cursor, event, execute, queue, style, terminal};
use tracing::debug;

use crate::clock::{TimeControl, WallTime};
use crate::config::{AppConfig, KeyBindings, matches_binding};
use crate::engine::Engine;
use crate::engine::projection::Projection;
use crate::menubar::{MENU_ITEMS, render_menubar};
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::types::{Cell, Color, Frame, Grid, Style, TerminalContract};

/// Rows reserved above the canvas for the menu bar.
const CANVAS_OFFSET: u16 = 1;
const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Player {
    scene: Scene,
    time: TimeControl,
    bindings: KeyBindings,
    frame_budget: Duration,
    contract: TerminalContract,
    grid: Option<Grid>,
    fullscreen: bool,
}

impl Player {
    pub fn new(scene: Scene, config: &AppConfig) -> Self {
        Self {
            scene,
            time: TimeControl::new(),
            bindings: config.key_bindings.clone(),
            frame_budget: Duration::from_millis(config.scene.frame_ms),
            contract: TerminalContract {
                width: MIN_COLS,
                height: MIN_ROWS,
            },
            grid: None,
            fullscreen: false,
        }
    }

    /// Play the scene in the terminal until the user quits.
    ///
    /// Sets up the terminal, enters the frame loop, and restores the terminal
    /// on exit (even on error).
    pub fn play(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        // +2: one row for menu bar, one row for status bar
        if term_w < MIN_COLS || term_h < MIN_ROWS + 2 {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                MIN_COLS,
                MIN_ROWS + 2,
                term_w,
                term_h,
            );
        }
        self.fit(term_w, term_h);

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Frame loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        render_menubar(stdout, MENU_ITEMS)?;
        let start = Instant::now();

        loop {
            let frame_start = Instant::now();
            while event::poll(Duration::ZERO)? {
                if self.handle_event(event::read()?, stdout)? == Flow::Quit {
                    return Ok(());
                }
            }

            let now = self.time.resolve(WallTime::now_local());
            self.scene.advance(start.elapsed().as_millis() as u64, now);
            self.time.tick();

            self.render_canvas(stdout)?;
            self.render_status(stdout, now)?;

            // Sleep out the rest of the frame, waking early for input.
            if let Some(rest) = self.frame_budget.checked_sub(frame_start.elapsed()) {
                event::poll(rest)?;
            }
        }
    }

    fn handle_event(&mut self, ev: event::Event, stdout: &mut io::Stdout) -> Result<Flow> {
        match ev {
            event::Event::Key(key) if key.kind != KeyEventKind::Release => {
                return self.handle_key(key, stdout);
            }
            event::Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    if let Some(row) = mouse.row.checked_sub(CANVAS_OFFSET) {
                        let proj = Projection::new(self.scene.canvas(), self.contract);
                        let (x, y) = proj.to_canvas(mouse.column, row);
                        if self.scene.toggle_at(x, y) {
                            debug!(x, y, "barn clicked");
                        }
                    }
                }
            }
            event::Event::Resize(w, h) => {
                self.fit(w, h);
                execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                render_menubar(stdout, MENU_ITEMS)?;
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn handle_key(&mut self, key: KeyEvent, stdout: &mut io::Stdout) -> Result<Flow> {
        let b = &self.bindings;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Flow::Quit);
        }

        // While the time panel is open it owns the arrows, Enter and Esc.
        if self.time.panel().is_some() {
            if matches_binding(&b.apply, &key) {
                if self.time.apply() {
                    self.scene.recheck_view();
                }
            } else if matches_binding(&b.cancel, &key) || matches_binding(&b.time_control, &key) {
                self.time.cancel();
            } else {
                match key.code {
                    KeyCode::Left => self.time.adjust_hour(-1),
                    KeyCode::Right => self.time.adjust_hour(1),
                    KeyCode::Up => self.time.adjust_minute(1),
                    KeyCode::Down => self.time.adjust_minute(-1),
                    _ => {}
                }
            }
            return Ok(Flow::Continue);
        }

        if matches_binding(&b.quit, &key) || matches_binding(&b.cancel, &key) {
            return Ok(Flow::Quit);
        }
        if matches_binding(&b.toggle, &key) {
            self.scene.toggle();
        } else if matches_binding(&b.time_control, &key) {
            self.time.toggle_panel(WallTime::now_local());
        } else if matches_binding(&b.system_time, &key) {
            if self.time.use_system_time() {
                self.scene.recheck_view();
            }
        } else if matches_binding(&b.fullscreen, &key) {
            self.fullscreen = !self.fullscreen;
            if self.fullscreen {
                stdout.write_all(b"\x1b[10;1t")?;
            } else {
                stdout.write_all(b"\x1b[10;0t")?;
            }
            stdout.flush()?;
        } else if let KeyCode::Char(c @ '1'..='5') = key.code {
            if self.time.preset(c as u8 - b'0') {
                self.scene.recheck_view();
            }
        }
        Ok(Flow::Continue)
    }

    /// Size the canvas grid to the terminal, minus the menu and status rows.
    fn fit(&mut self, term_w: u16, term_h: u16) {
        self.contract = TerminalContract {
            width: term_w.max(1),
            height: term_h.saturating_sub(2).max(1),
        };
        self.grid = None;
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn render_canvas(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let resolved = Engine::resolve(&self.scene, self.contract);
        let grid = Renderer::rasterize(&resolved);

        match Renderer::frame(self.grid.as_ref(), &grid) {
            Frame::Full { cells } => {
                for (y, row) in cells.iter().enumerate() {
                    queue!(stdout, cursor::MoveTo(0, y as u16 + CANVAS_OFFSET))?;
                    for cell in row {
                        print_cell(stdout, cell)?;
                    }
                }
            }
            Frame::Diff { changes } => {
                for change in &changes {
                    queue!(stdout, cursor::MoveTo(change.x, change.y + CANVAS_OFFSET))?;
                    print_cell(stdout, &change.cell)?;
                }
            }
        }
        stdout.flush()?;
        self.grid = Some(grid);
        Ok(())
    }

    fn render_status(&self, stdout: &mut io::Stdout, now: WallTime) -> Result<()> {
        let status_y = self.contract.height + CANVAS_OFFSET;
        let status = fit_width(
            status_line(&self.scene, &self.time, now),
            self.contract.width,
        );

        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);

        queue!(
            stdout,
            cursor::MoveTo(0, status_y),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        stdout.flush()?;
        Ok(())
    }
}

fn print_cell(stdout: &mut io::Stdout, cell: &Cell) -> Result<()> {
    let cs = to_content_style(&cell.style);
    queue!(
        stdout,
        style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
    )?;
    Ok(())
}

/// The bottom line: the time panel while it is open, a pending message, or
/// the state of the scene.
fn status_line(scene: &Scene, time: &TimeControl, now: WallTime) -> String {
    if let Some(t) = time.panel() {
        return format!(
            " Time: {t}   \u{25c4}\u{25ba} hours   \u{25b2}\u{25bc} minutes   Enter apply, Esc cancel "
        );
    }
    if let Some(message) = time.message() {
        return format!(" {message} ");
    }
    let clock = if time.is_manual() {
        format!("{now} (manual)")
    } else {
        now.to_string()
    };
    format!(
        " {clock} | {:?} | door {:?} | heading {:?} ",
        Engine::visible_view(scene),
        scene.door().stage(),
        scene.crossing().desired_side(),
    )
    .to_lowercase()
}

/// Cut a line to the terminal width so it never wraps onto the next row.
fn fit_width(line: String, width: u16) -> String {
    match line.char_indices().nth(width as usize) {
        Some((end, _)) => line[..end].to_string(),
        None => line,
    }
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneTuning;
    use crate::schedule::View;
    use crate::types::rgb;

    #[test]
    fn status_shows_scene_state() {
        let scene = Scene::new(&SceneTuning::default(), View::Exterior);
        let line = status_line(&scene, &TimeControl::new(), WallTime::new(7, 5));
        assert_eq!(line, " 07:05 | exterior | door closed | heading outside ");
    }

    #[test]
    fn status_prefers_panel_then_message() {
        let scene = Scene::new(&SceneTuning::default(), View::Exterior);
        let mut time = TimeControl::new();
        time.preset(4);
        assert_eq!(
            status_line(&scene, &time, WallTime::new(18, 0)),
            " Time set to 18:00 "
        );
        time.toggle_panel(WallTime::new(1, 0));
        assert!(status_line(&scene, &time, WallTime::new(18, 0)).starts_with(" Time: 18:00"));
    }

    #[test]
    fn long_lines_are_cut_to_the_terminal() {
        let scene = Scene::new(&SceneTuning::default(), View::Exterior);
        let mut time = TimeControl::new();
        time.toggle_panel(WallTime::new(9, 0));
        let panel = status_line(&scene, &time, WallTime::new(9, 0));
        assert!(panel.chars().count() > usize::from(MIN_COLS));

        let cut = fit_width(panel, MIN_COLS);
        assert_eq!(cut.chars().count(), usize::from(MIN_COLS));
        assert!(cut.starts_with(" Time: 09:00"));
        assert_eq!(fit_width("short".to_string(), MIN_COLS), "short");
    }

    #[test]
    fn converts_styles() {
        let cs = to_content_style(&Style {
            bold: true,
            ..Style::on(rgb(200, 0, 0), rgb(1, 2, 3))
        });
        assert_eq!(cs.foreground_color, Some(style::Color::Rgb { r: 200, g: 0, b: 0 }));
        assert_eq!(cs.background_color, Some(style::Color::Rgb { r: 1, g: 2, b: 3 }));
        assert!(cs.attributes.has(style::Attribute::Bold));
    }
}
