//! Per-frame simulation step
//!
//! One call per animation frame while the game is in the Playing phase.
//! Everything here is pure in-memory state; nothing can fail.

use crate::clamp_paddle_x;
use crate::consts::*;

use super::collision;
use super::state::{CollisionPolicy, GamePhase, GameState};

/// Merged player intent for a single frame.
///
/// Event handlers write these fields asynchronously; the step reads them
/// once at the start of the frame. `touch_x` is None when no touch is
/// active, in which case the pointer position drives the paddle.
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub pointer_x: f32,
    pub touch_x: Option<f32>,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            left: false,
            right: false,
            pointer_x: BALL_START_X,
            touch_x: None,
        }
    }
}

impl FrameInput {
    /// Absolute drive target: active touch wins over the pointer
    #[inline]
    pub fn target_x(&self) -> f32 {
        self.touch_x.unwrap_or(self.pointer_x)
    }
}

/// What happened during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// The paddle deflected the ball this frame
    pub scored: bool,
    /// The ball left the bottom of the playfield this frame
    pub game_over: bool,
}

/// Advance the game by one frame
pub fn step(state: &mut GameState, input: &FrameInput) -> StepEvents {
    let mut events = StepEvents::default();

    if state.phase != GamePhase::Playing {
        return events;
    }

    // Paddle drive: discrete keys take priority, absolute position otherwise
    if input.left {
        state.paddle.x = clamp_paddle_x(state.paddle.x - PADDLE_KEY_STEP);
    }
    if input.right {
        state.paddle.x = clamp_paddle_x(state.paddle.x + PADDLE_KEY_STEP);
    }
    if !input.left && !input.right {
        let target = input.target_x();
        state.paddle.x = clamp_paddle_x(target - state.paddle.width / 2.0);
    }

    // Explicit Euler, one step per frame. No sub-stepping: a fast ball can
    // tunnel through thin geometry, which is accepted behavior.
    state.ball.pos += state.ball.vel;

    if collision::side_wall_hit(&state.ball).is_some() {
        state.ball.vel.x = -state.ball.vel.x;
    }
    if collision::top_wall_hit(&state.ball).is_some() {
        state.ball.vel.y = -state.ball.vel.y;
    }

    match state.policy {
        CollisionPolicy::Latched => {
            if collision::ball_paddle_overlap(&state.ball, &state.paddle)
                && state.ball.vel.y > 0.0
                && state.can_score
            {
                state.ball.vel.y = -state.ball.vel.y;
                // Snap on top of the paddle so the ball never sinks in
                state.ball.pos.y = state.paddle.y - state.ball.radius;
                state.can_score = false;
                state.score += 1;
                events.scored = true;

                // Linear ramp: 1% faster per point, signs preserved
                let speed = BALL_BASE_SPEED
                    * (1.0 + state.score as f32 * SPEED_GAIN_PER_POINT);
                state.ball.vel.x = speed.copysign(state.ball.vel.x);
                state.ball.vel.y = speed.copysign(state.ball.vel.y);
            }

            // Re-arm once the ball has cleared the paddle top by a margin
            if state.ball.pos.y
                < state.paddle.y - state.ball.radius - RESCORE_MARGIN
            {
                state.can_score = true;
            }
        }
        CollisionPolicy::Simple => {
            // Known issue: fires on every frame of overlap, so one slow
            // contact can count several times
            if collision::ball_center_over_paddle(&state.ball, &state.paddle) {
                state.ball.vel.y = -state.ball.vel.y;
                state.score += 1;
                events.scored = true;
            }
        }
    }

    if collision::past_bottom(&state.ball) {
        state.phase = GamePhase::GameOver;
        events.game_over = true;
    }

    events
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::consts::*;

    fn playing(policy: CollisionPolicy) -> GameState {
        let mut state = GameState::new(policy);
        state.phase = GamePhase::Playing;
        state
    }

    fn hands_off() -> FrameInput {
        // Pointer parked so the absolute-drive branch keeps the paddle still
        FrameInput {
            pointer_x: PADDLE_START_X + PADDLE_WIDTH / 2.0,
            ..FrameInput::default()
        }
    }

    #[test]
    fn step_is_noop_outside_playing() {
        let mut state = GameState::default();
        let before = state.clone();
        let events = step(&mut state, &FrameInput::default());
        assert_eq!(events, StepEvents::default());
        assert_eq!(state, before);
    }

    #[test]
    fn keys_drive_paddle_with_clamping() {
        let mut state = playing(CollisionPolicy::Latched);
        state.paddle.x = 3.0;
        let input = FrameInput {
            left: true,
            ..FrameInput::default()
        };
        step(&mut state, &input);
        assert_eq!(state.paddle.x, 0.0);

        state.paddle.x = CANVAS_WIDTH - PADDLE_WIDTH - 2.0;
        let input = FrameInput {
            right: true,
            ..FrameInput::default()
        };
        step(&mut state, &input);
        assert_eq!(state.paddle.x, CANVAS_WIDTH - PADDLE_WIDTH);
    }

    #[test]
    fn touch_overrides_pointer() {
        let mut state = playing(CollisionPolicy::Latched);
        let input = FrameInput {
            pointer_x: 20.0,
            touch_x: Some(300.0),
            ..FrameInput::default()
        };
        step(&mut state, &input);
        assert_eq!(state.paddle.x, clamp_paddle_x(300.0 - PADDLE_WIDTH / 2.0));

        let input = FrameInput {
            pointer_x: 20.0,
            touch_x: None,
            ..FrameInput::default()
        };
        step(&mut state, &input);
        assert_eq!(state.paddle.x, 0.0);
    }

    #[test]
    fn side_wall_reverses_exactly_once() {
        let mut state = playing(CollisionPolicy::Latched);
        state.ball.pos = Vec2::new(CANVAS_WIDTH - 20.0, 100.0);
        state.ball.vel = Vec2::new(3.0, 1.0);

        step(&mut state, &hands_off());
        assert_eq!(state.ball.vel.x, -3.0);

        // Residual overlap is not corrected; the ball still breaches the
        // wall this frame but is moving away, so no second reversal
        assert!(state.ball.pos.x + state.ball.radius > CANVAS_WIDTH);
        step(&mut state, &hands_off());
        assert_eq!(state.ball.vel.x, -3.0);
    }

    #[test]
    fn top_wall_reverses_dy() {
        let mut state = playing(CollisionPolicy::Latched);
        state.ball.pos = Vec2::new(100.0, state.ball.radius + 1.0);
        state.ball.vel = Vec2::new(1.0, -3.0);

        step(&mut state, &hands_off());
        assert_eq!(state.ball.vel.y, 3.0);
    }

    #[test]
    fn latched_contact_scores_once_and_snaps() {
        let mut state = playing(CollisionPolicy::Latched);
        let mid = state.paddle.x + state.paddle.width / 2.0;
        state.ball.pos = Vec2::new(mid, PADDLE_Y - 2.0);
        state.ball.vel = Vec2::new(2.5, 2.5);

        let events = step(&mut state, &hands_off());
        assert!(events.scored);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.pos.y, PADDLE_Y - state.ball.radius);
        assert!(state.ball.vel.y < 0.0);
        assert!(!state.can_score);

        // Force the ball downward into the paddle again without clearing
        // the re-arm margin: the latch must block a second score
        state.ball.vel.y = state.ball.vel.y.abs();
        let events = step(&mut state, &hands_off());
        assert!(!events.scored);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn latch_rearms_after_clearing_margin() {
        let mut state = playing(CollisionPolicy::Latched);
        state.can_score = false;
        state.ball.pos =
            Vec2::new(100.0, PADDLE_Y - state.ball.radius - RESCORE_MARGIN - 5.0);
        state.ball.vel = Vec2::new(0.0, -2.5);

        step(&mut state, &hands_off());
        assert!(state.can_score);
    }

    #[test]
    fn speed_ramps_one_percent_per_point() {
        let mut state = playing(CollisionPolicy::Latched);
        let mid = state.paddle.x + state.paddle.width / 2.0;
        state.ball.pos = Vec2::new(mid, PADDLE_Y - 2.0);
        state.ball.vel = Vec2::new(-2.5, 2.5);

        step(&mut state, &hands_off());

        let expected = BALL_BASE_SPEED * (1.0 + SPEED_GAIN_PER_POINT);
        assert!((state.ball.vel.x - (-expected)).abs() < 1e-6);
        assert!((state.ball.vel.y - (-expected)).abs() < 1e-6);
    }

    #[test]
    fn simple_policy_can_double_count() {
        // Documents the known issue with the simple policy: overlap fires
        // every frame, so a lingering contact scores repeatedly
        let mut state = playing(CollisionPolicy::Simple);
        let mid = state.paddle.x + state.paddle.width / 2.0;
        state.ball.pos = Vec2::new(mid, PADDLE_Y + 1.0);
        state.ball.vel = Vec2::new(0.0, 0.5);

        let first = step(&mut state, &hands_off());
        let second = step(&mut state, &hands_off());
        assert!(first.scored && second.scored);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn bottom_exit_ends_the_game_once() {
        let mut state = playing(CollisionPolicy::Latched);
        state.ball.pos =
            Vec2::new(100.0, CANVAS_HEIGHT + state.ball.radius + 1.0);
        state.ball.vel = Vec2::new(0.0, 3.0);

        let events = step(&mut state, &hands_off());
        assert!(events.game_over);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Terminal state is idempotent: no further motion, no more events
        let frozen = state.clone();
        let events = step(&mut state, &hands_off());
        assert_eq!(events, StepEvents::default());
        assert_eq!(state, frozen);
    }

    proptest! {
        #[test]
        fn paddle_stays_in_bounds(
            inputs in prop::collection::vec(
                (any::<bool>(), any::<bool>(), -500.0f32..900.0, prop::option::of(-500.0f32..900.0)),
                1..200,
            )
        ) {
            let mut state = playing(CollisionPolicy::Latched);
            for (left, right, pointer_x, touch_x) in inputs {
                let input = FrameInput { left, right, pointer_x, touch_x };
                step(&mut state, &input);
                prop_assert!(state.paddle.x >= 0.0);
                prop_assert!(state.paddle.x <= CANVAS_WIDTH - state.paddle.width);
            }
        }
    }
}
