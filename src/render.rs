//! Canvas 2D view
//!
//! Pure drawing, no game logic: clear the surface, draw the ball (an image
//! clipped to a circle, or a solid disc until an image has loaded), draw
//! the paddle.

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::GameState;

/// Disc color used when no ball image is usable
pub const BALL_FALLBACK_COLOR: &str = "#3b82f6";
pub const PADDLE_COLOR: &str = "#1f2937";

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Draw one frame
    pub fn draw(&self, state: &GameState, ball_image: Option<&HtmlImageElement>) {
        self.ctx
            .clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        self.draw_ball(state, ball_image);
        self.draw_paddle(state);
    }

    fn draw_ball(&self, state: &GameState, image: Option<&HtmlImageElement>) {
        let ball = &state.ball;
        let (x, y, r) = (ball.pos.x as f64, ball.pos.y as f64, ball.radius as f64);

        match image {
            Some(img) => {
                self.ctx.save();
                self.ctx.begin_path();
                let _ = self.ctx.arc(x, y, r, 0.0, TAU);
                self.ctx.close_path();
                self.ctx.clip();

                let size = r * 2.0;
                let _ = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        x - r,
                        y - r,
                        size,
                        size,
                    );
                self.ctx.restore();
            }
            None => {
                self.ctx.begin_path();
                let _ = self.ctx.arc(x, y, r, 0.0, TAU);
                self.ctx.set_fill_style_str(BALL_FALLBACK_COLOR);
                self.ctx.fill();
                self.ctx.close_path();
            }
        }
    }

    fn draw_paddle(&self, state: &GameState) {
        let paddle = &state.paddle;
        self.ctx.set_fill_style_str(PADDLE_COLOR);
        self.ctx.fill_rect(
            paddle.x as f64,
            paddle.y as f64,
            paddle.width as f64,
            paddle.height as f64,
        );
    }
}
