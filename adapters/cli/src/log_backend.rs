use anyhow::Result as AnyResult;
use gesture_strike_core::GameState;
use gesture_strike_rendering::{banner, Presentation, RenderingBackend};
use tracing::{debug, info};

/// Headless backend that logs a summary line instead of drawing.
#[derive(Debug)]
pub(crate) struct LogBackend {
    every: u32,
    frame: u32,
    last_state: Option<GameState>,
}

impl LogBackend {
    /// Logs every `every`-th frame plus every state change; `0` logs only state changes.
    pub(crate) fn new(every: u32) -> Self {
        Self {
            every,
            frame: 0,
            last_state: None,
        }
    }
}

impl RenderingBackend for LogBackend {
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()> {
        let state = presentation.hud.state;
        if self.last_state != Some(state) {
            self.last_state = Some(state);
            info!(
                title = %presentation.window_title,
                banner = banner(state).unwrap_or(""),
                ?state,
                "screen changed"
            );
        }

        if self.every > 0 && self.frame % self.every == 0 {
            debug!(
                frame = self.frame,
                hud = %presentation.hud_lines().join(" | "),
                enemies = presentation.enemies.len(),
                bullets = presentation.bullets.len(),
                particles = presentation.particles.len(),
                gesture = ?presentation.gesture,
                shake_x = presentation.shake.x,
                shake_y = presentation.shake.y,
                "frame"
            );
        }
        self.frame = self.frame.wrapping_add(1);
        Ok(())
    }
}
