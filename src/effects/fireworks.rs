use super::Effect;
use crate::autofire::PatternCycle;
use crate::color::Rgb;
use crate::config::SimConfig;
use crate::patterns::PatternType;
use crate::render::{Canvas, View, draw_frame};
use crate::sim::{Command, SimEvent, Simulation};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use glam::Vec2;
use std::io::Write;

/// Interactive fireworks show: translates terminal input into simulation
/// commands and paints every frame through a half-block canvas.
pub struct FireworksShow {
    sim: Simulation,
    canvas: Canvas,
    view: View,
    selected: Option<PatternType>,
    manual: PatternCycle,
    text_entry: Option<String>,
    output_buf: Vec<u8>,
}

fn viewport(cols: usize, rows: usize, scale: f32) -> Vec2 {
    Vec2::new(cols as f32, rows as f32 * 2.0) * scale
}

impl FireworksShow {
    pub fn new(cols: usize, rows: usize, scale: f32, bg: Rgb, config: &SimConfig) -> Self {
        Self {
            sim: Simulation::new(viewport(cols, rows, scale), config),
            canvas: Canvas::new(cols, rows * 2, bg),
            view: View { scale },
            selected: None,
            manual: PatternCycle::new(),
            text_entry: None,
            output_buf: Vec::with_capacity(cols * rows * 25),
        }
    }

    /// Pattern used by click launches; `None` rotates through every pattern.
    pub fn select(&mut self, pattern: Option<PatternType>) {
        self.selected = pattern;
    }

    pub fn selected(&self) -> Option<PatternType> {
        self.selected
    }

    pub fn apply(&mut self, command: Command) {
        self.sim.apply(command);
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn text_entry(&self) -> Option<&str> {
        self.text_entry.as_deref()
    }

    fn to_sim(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(column as f32, row as f32 * 2.0) * self.view.scale
    }

    fn cycle_selection(&mut self) {
        let mut next = match self.selected {
            Some(p) => enum_iterator::next_cycle(&p),
            None => PatternType::Standard,
        };
        while next.is_drone() {
            next = enum_iterator::next_cycle(&next);
        }
        tracing::debug!(pattern = %next, "pattern selected");
        self.selected = Some(next);
    }

    fn handle_text_key(&mut self, key: &KeyEvent) {
        let Some(text) = self.text_entry.as_mut() else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => {
                let text = std::mem::take(text);
                self.text_entry = None;
                self.sim.apply(Command::CommitText(text));
            }
            KeyCode::Esc => self.text_entry = None,
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) if !c.is_control() && !ctrl => text.push(c),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char('f') => self.sim.apply(Command::TriggerFinale),
            KeyCode::Char('a') => {
                let on = !self.sim.auto_fire_enabled();
                tracing::info!(on, "auto-fire toggled");
                self.sim.apply(Command::SetAutoFire(on));
            }
            KeyCode::Char('d') => {
                let on = !self.sim.is_drawing();
                self.sim.apply(Command::SetDrawing(on));
            }
            KeyCode::Enter => self.sim.apply(Command::ConfirmDrawing),
            KeyCode::Char('c') => self.sim.apply(Command::ClearDrawing),
            KeyCode::Char('x') => self.sim.apply(Command::SetCustomShape(None)),
            KeyCode::Char('t') => self.text_entry = Some(String::new()),
            KeyCode::Tab => self.cycle_selection(),
            KeyCode::Char('0') => self.selected = None,
            _ => {}
        }
    }

    fn status_line(&self) -> String {
        if let Some(text) = &self.text_entry {
            return format!(" text: {text}_ ");
        }
        let pattern = self.selected.map_or("rotate", PatternType::tag);
        let mut status = format!(" {pattern} ");
        if self.sim.auto_fire_enabled() {
            status.push_str("| auto ");
        }
        if self.sim.is_drawing() {
            status.push_str("| drawing ");
        }
        if let Some(shape) = self.sim.custom_shape() {
            status.push_str(&format!("| shape {} ", shape.len()));
        }
        status
    }
}

impl Effect for FireworksShow {
    fn update(&mut self, dt: f32) {
        self.sim.step(dt as f64 * 1000.0);

        for event in self.sim.drain_events() {
            match event {
                SimEvent::ShapeCompleted { points } => {
                    tracing::info!(points, "shape ready for the drone display")
                }
                SimEvent::Exploded { pattern, particles } => {
                    tracing::trace!(%pattern, particles, "burst")
                }
                SimEvent::FinaleLaunched { count } => tracing::debug!(count, "finale in the air"),
                SimEvent::ShellBurst { particles } => tracing::trace!(particles, "shell burst"),
            }
        }
    }

    fn render(&mut self, out: &mut dyn Write) -> std::io::Result<()> {
        self.output_buf.clear();
        draw_frame(&self.sim, &mut self.canvas, self.view);
        self.canvas.write_to(&mut self.output_buf)?;

        // Status overlay in the top left
        let status = self.status_line();
        write!(self.output_buf, "\x1b[1;1H\x1b[38;2;255;255;255m\x1b[48;2;0;0;0m{status}\x1b[0m")?;

        out.write_all(&self.output_buf)?;
        out.flush()?;
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if self.text_entry.is_some() {
                    self.handle_text_key(key);
                } else {
                    self.handle_key(key);
                }
            }
            Event::Mouse(mouse) => {
                let point = self.to_sim(mouse.column, mouse.row);
                let has_shape = self.sim.custom_shape().is_some();
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) if self.sim.is_drawing() => {
                        self.sim.apply(Command::PointerDown(point));
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        let pattern = self.selected.unwrap_or_else(|| self.manual.next());
                        self.sim.apply(Command::Launch { target: point, pattern });
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        self.sim.apply(Command::PointerMove(point))
                    }
                    MouseEventKind::Up(MouseButton::Left) => self.sim.apply(Command::PointerUp),
                    MouseEventKind::Down(MouseButton::Right) if has_shape => {
                        let pattern = PatternType::CustomShape;
                        self.sim.apply(Command::Launch { target: point, pattern });
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn resize(&mut self, cols: usize, rows: usize) {
        let bg = self.canvas.bg();
        self.canvas = Canvas::new(cols, rows * 2, bg);
        self.sim.apply(Command::Resize(viewport(cols, rows, self.view.scale)));
    }

    fn captures_text(&self) -> bool {
        self.text_entry.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn show() -> FireworksShow {
        let config = SimConfig { seed: Some(3), ..SimConfig::default() };
        FireworksShow::new(40, 20, 4.0, (0, 0, 0), &config)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    #[test]
    fn click_launches_toward_the_pointer() {
        let mut show = show();
        show.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));

        let rockets = show.sim().projectiles();
        assert_eq!(rockets.len(), 1);
        assert_eq!(rockets[0].target, Vec2::new(40.0, 40.0));
        assert_eq!(rockets[0].origin, Vec2::new(80.0, 160.0));
        assert_eq!(rockets[0].pattern, PatternType::Standard);
    }

    #[test]
    fn unselected_clicks_rotate_patterns() {
        let mut show = show();
        show.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        show.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 12, 5));
        let patterns: Vec<_> = show.sim().projectiles().iter().map(|p| p.pattern).collect();
        assert_eq!(patterns, vec![PatternType::Standard, PatternType::Streamer]);
    }

    #[test]
    fn tab_skips_the_drone_and_zero_clears() {
        let mut show = show();
        show.select(Some(PatternType::TreeBurst));
        show.handle_event(&key(KeyCode::Tab));
        assert_eq!(show.selected(), Some(PatternType::Standard));

        show.handle_event(&key(KeyCode::Char('0')));
        assert_eq!(show.selected(), None);
    }

    #[test]
    fn right_click_needs_a_shape() {
        let mut show = show();
        show.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 10, 5));
        assert!(show.sim().projectiles().is_empty());

        show.apply(Command::CommitText("hi".into()));
        show.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 10, 5));
        assert_eq!(show.sim().projectiles()[0].pattern, PatternType::CustomShape);
    }

    #[test]
    fn drawing_mode_turns_clicks_into_strokes() {
        let mut show = show();
        show.handle_event(&key(KeyCode::Char('d')));
        show.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        for i in 2..8 {
            show.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), i, i));
        }
        show.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 8, 8));
        assert!(show.sim().projectiles().is_empty());
        assert_eq!(show.sim().strokes().len(), 1);

        show.handle_event(&key(KeyCode::Enter));
        assert_eq!(show.sim().custom_shape().map(|s| s.len()), Some(7));
    }

    #[test]
    fn text_entry_swallows_quit_keys() {
        let mut show = show();
        show.handle_event(&key(KeyCode::Char('t')));
        assert!(show.captures_text());

        for c in "aqz".chars() {
            show.handle_event(&key(KeyCode::Char(c)));
        }
        show.handle_event(&key(KeyCode::Backspace));
        assert_eq!(show.text_entry(), Some("aq"));
        assert!(!show.sim().auto_fire_enabled());

        show.handle_event(&key(KeyCode::Enter));
        assert!(!show.captures_text());
        assert!(show.sim().custom_shape().is_some());
    }

    #[test]
    fn escape_cancels_text_entry() {
        let mut show = show();
        show.handle_event(&key(KeyCode::Char('t')));
        show.handle_event(&key(KeyCode::Char('w')));
        show.handle_event(&key(KeyCode::Esc));
        assert!(!show.captures_text());
        assert!(show.sim().custom_shape().is_none());
    }

    #[test]
    fn resize_rebuilds_the_viewport() {
        let mut show = show();
        show.handle_event(&key(KeyCode::Char('f')));
        show.resize(20, 10);
        assert_eq!(show.sim().viewport(), Vec2::new(80.0, 80.0));
        assert!(show.sim().projectiles().is_empty());
    }

    #[test]
    fn render_writes_a_frame_with_status() {
        let mut show = show();
        show.update(1.0 / 60.0);
        let mut out = Vec::new();
        show.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[H"));
        assert!(text.contains(" rotate "));
    }
}
