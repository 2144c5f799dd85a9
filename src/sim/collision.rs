//! Collision detection against the three walls and the paddle
//!
//! All checks are pure predicates over ball/paddle geometry; the response
//! (sign flips, snapping, scoring) stays in the step function.

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

use super::state::{Ball, Paddle};

/// Which axis-aligned boundary the ball is currently breaching, if any.
///
/// A wall only reports while the ball is moving toward it, so a breach that
/// persists across frames (no position correction is applied) reflects
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHit {
    Left,
    Right,
    Top,
}

/// Check the side walls (x = 0 and x = CANVAS_WIDTH)
pub fn side_wall_hit(ball: &Ball) -> Option<WallHit> {
    if ball.pos.x + ball.radius > CANVAS_WIDTH && ball.vel.x > 0.0 {
        Some(WallHit::Right)
    } else if ball.pos.x - ball.radius < 0.0 && ball.vel.x < 0.0 {
        Some(WallHit::Left)
    } else {
        None
    }
}

/// Check the ceiling (y = 0)
pub fn top_wall_hit(ball: &Ball) -> Option<WallHit> {
    if ball.top() < 0.0 && ball.vel.y < 0.0 {
        Some(WallHit::Top)
    } else {
        None
    }
}

/// True once the ball's top edge has passed the bottom of the playfield,
/// i.e. the ball is fully off-screen.
#[inline]
pub fn past_bottom(ball: &Ball) -> bool {
    ball.top() > CANVAS_HEIGHT
}

/// Bounding-box overlap between ball and paddle (latched policy test)
pub fn ball_paddle_overlap(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bottom() >= paddle.y
        && ball.top() <= paddle.bottom()
        && ball.pos.x + ball.radius >= paddle.x
        && ball.pos.x - ball.radius <= paddle.right()
}

/// Looser contact test used by the simple policy: vertical spans overlap
/// and the ball's center x lies within the paddle's horizontal span.
pub fn ball_center_over_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bottom() > paddle.y
        && ball.top() < paddle.bottom()
        && ball.pos.x > paddle.x
        && ball.pos.x < paddle.right()
}
