//! Sound effect playback
//!
//! One short clip per effect, played from the start with an adjustable
//! rate. Playback failure is logged and dropped; it never reaches the
//! frame loop.

/// Playback-rate range for the bounce clip
pub const BOUNCE_RATE_MIN: f32 = 0.8;
pub const BOUNCE_RATE_SPAN: f32 = 0.4;

/// Map a unit random sample to a bounce playback rate (0.8x - 1.2x)
#[inline]
pub fn jitter_rate(unit: f32) -> f32 {
    BOUNCE_RATE_MIN + unit * BOUNCE_RATE_SPAN
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioPlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use web_sys::HtmlAudioElement;

    use crate::Settings;
    use crate::assets::{BOUNCE_SOUND_PATH, GAME_OVER_SOUND_PATH, load_audio_clip};

    use super::jitter_rate;

    /// Owns the game's sound clips. A clip that failed to load stays None
    /// and playing it is silence.
    pub struct AudioPlayer {
        bounce: Option<HtmlAudioElement>,
        game_over: Option<HtmlAudioElement>,
        volume: f32,
        rng: Pcg32,
    }

    impl AudioPlayer {
        pub fn new(settings: &Settings, seed: u64) -> Self {
            Self {
                bounce: load_audio_clip(BOUNCE_SOUND_PATH),
                game_over: load_audio_clip(GAME_OVER_SOUND_PATH),
                volume: settings.effective_volume(),
                rng: Pcg32::seed_from_u64(seed),
            }
        }

        /// Impact sound for a catch, at a randomized playback rate
        pub fn play_bounce(&mut self) {
            let rate = jitter_rate(self.rng.random::<f32>());
            self.play_clip_at(&self.bounce, rate);
        }

        /// End-of-run jingle at normal rate
        pub fn play_game_over(&mut self) {
            self.play_clip_at(&self.game_over, 1.0);
        }

        fn play_clip_at(&self, clip: &Option<HtmlAudioElement>, rate: f32) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(clip) = clip else { return };

            clip.set_volume(self.volume as f64);
            clip.set_current_time(0.0);
            clip.set_playback_rate(rate as f64);
            if let Err(err) = clip.play() {
                log::warn!("Audio playback failed: {err:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_in_range() {
        assert_eq!(jitter_rate(0.0), 0.8);
        assert!((jitter_rate(1.0) - 1.2).abs() < 1e-6);
        let mid = jitter_rate(0.5);
        assert!(mid > 0.8 && mid < 1.2);
    }
}
