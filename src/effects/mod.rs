use crossterm::event::Event;
use std::io::Write;

pub mod fireworks;

pub trait Effect {
    fn update(&mut self, dt: f32);
    fn render(&mut self, out: &mut dyn Write) -> std::io::Result<()>;
    fn handle_event(&mut self, _event: &Event) {}
    /// New terminal size in cells.
    fn resize(&mut self, cols: usize, rows: usize);
    /// While true the host leaves quit keys to the effect.
    fn captures_text(&self) -> bool {
        false
    }
}
