//! Canvas 2D drawing
//!
//! Grid, food, snake, eat flash, explosion particles and the paused /
//! game-over overlays. Reads the session, never mutates it.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::CELL;
use crate::session::Session;
use crate::sim::{FoodKind, GamePhase, Particle, Tint};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Wrap the canvas' 2D context. `None` when the browser refuses one.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: f64::from(canvas.width()),
            height: f64::from(canvas.height()),
        })
    }

    /// Draw the current frame
    pub fn render(&self, session: &Session) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        self.draw_grid(session);

        // While the snake bursts only the particles are on the board
        if session.is_animating() {
            self.draw_particles(session.particles());
            return;
        }

        self.draw_food(session);
        self.draw_snake(session);
        if session.settings().effective_eat_flash() {
            self.draw_eat_flash(session.state().eat_flash);
        }

        if session.game_over_ready() {
            self.draw_banner("GAME OVER", "red", "Press any key / tap to restart");
        } else if session.phase() == GamePhase::Paused {
            self.draw_banner("PAUSED", "black", "Press Space to resume");
        }
    }

    fn draw_grid(&self, session: &Session) {
        let grid = session.state().grid;
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(0.12);
        ctx.begin_path();
        for x in 0..=grid.cols {
            let px = f64::from(x) * f64::from(CELL);
            ctx.move_to(px, 0.0);
            ctx.line_to(px, self.height);
        }
        for y in 0..=grid.rows {
            let py = f64::from(y) * f64::from(CELL);
            ctx.move_to(0.0, py);
            ctx.line_to(self.width, py);
        }
        ctx.stroke();
        ctx.restore();
    }

    fn fill_cell(&self, x: i32, y: i32) {
        let cell = f64::from(CELL);
        self.ctx
            .fill_rect(f64::from(x) * cell, f64::from(y) * cell, cell, cell);
    }

    fn draw_food(&self, session: &Session) {
        let Some(food) = session.state().food else {
            return;
        };
        let color = match food.kind {
            FoodKind::Normal => "tomato",
            FoodKind::Gold => "gold",
        };
        self.ctx.set_fill_style_str(color);
        self.fill_cell(food.cell.x, food.cell.y);
    }

    fn draw_snake(&self, session: &Session) {
        for (i, seg) in session.state().snake.iter().enumerate() {
            let tint = if i == 0 { Tint::Head } else { Tint::Body };
            self.ctx.set_fill_style_str(tint.css());
            self.fill_cell(seg.x, seg.y);
        }
    }

    fn draw_eat_flash(&self, frames: u8) {
        if frames == 0 {
            return;
        }
        let ctx = &self.ctx;
        let alpha = f64::from(frames) * 0.12;
        ctx.save();
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str("white");
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        ctx.set_global_alpha((alpha * 1.2).min(1.0));
        ctx.set_line_width(8.0);
        ctx.set_stroke_style_str("white");
        ctx.stroke_rect(4.0, 4.0, self.width - 8.0, self.height - 8.0);
        ctx.restore();
    }

    fn draw_particles(&self, particles: &[Particle]) {
        let ctx = &self.ctx;
        for p in particles {
            ctx.save();
            ctx.set_global_alpha(f64::from(p.alpha().max(0.0)));
            ctx.set_fill_style_str(p.tint.css());
            ctx.fill_rect(
                f64::from(p.pos.x),
                f64::from(p.pos.y),
                f64::from(p.size),
                f64::from(p.size),
            );
            ctx.restore();
        }
    }

    fn draw_banner(&self, title: &str, color: &str, hint: &str) {
        let ctx = &self.ctx;
        let (cx, cy) = (self.width / 2.0, self.height / 2.0);
        ctx.save();
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        ctx.set_font("bold 52px system-ui, sans-serif");
        ctx.set_fill_style_str(color);
        let _ = ctx.fill_text(title, cx, cy);

        ctx.set_font("20px system-ui, sans-serif");
        ctx.set_fill_style_str("black");
        let _ = ctx.fill_text(hint, cx, cy + 52.0);
        ctx.restore();
    }
}
