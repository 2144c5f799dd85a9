//! Asset loading
//!
//! Images and sound clips load fire-and-forget; the frame loop never waits
//! on them. Each ball image resolves independently into a fixed slot, and
//! failed loads are simply absent from the usable set. Until at least one
//! image arrives the renderer falls back to a solid-color disc.

use crate::consts::IMAGE_CYCLE_POINTS;

/// Ball image paths, in cycling order
pub const BALL_IMAGE_PATHS: [&str; 3] = [
    "assets/ball-0.jpg",
    "assets/ball-1.jpg",
    "assets/ball-2.jpg",
];

/// Short impact clip played on each catch
pub const BOUNCE_SOUND_PATH: &str = "assets/bounce.mp3";
/// Jingle played when the run ends
pub const GAME_OVER_SOUND_PATH: &str = "assets/game-over.mp3";

/// Index into the usable image set for a score: the image advances every
/// [`IMAGE_CYCLE_POINTS`] points and wraps modulo the set size. None when
/// no image is usable.
pub fn image_index(score: u32, usable: usize) -> Option<usize> {
    if usable == 0 {
        None
    } else {
        Some((score / IMAGE_CYCLE_POINTS) as usize % usable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{BallImages, load_audio_clip};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::Rng;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{HtmlAudioElement, HtmlImageElement};

    use super::{BALL_IMAGE_PATHS, image_index};

    /// The set of ball images, filling in as loads complete
    pub struct BallImages {
        slots: Rc<RefCell<Vec<Option<HtmlImageElement>>>>,
    }

    impl BallImages {
        /// Kick off all image loads. Returns immediately; slots fill in as
        /// the browser finishes each fetch.
        pub fn load() -> Self {
            let slots = Rc::new(RefCell::new(vec![None; BALL_IMAGE_PATHS.len()]));

            for (i, path) in BALL_IMAGE_PATHS.into_iter().enumerate() {
                let Ok(img) = HtmlImageElement::new() else {
                    log::warn!("Could not create image element for {path}");
                    continue;
                };

                let onload = Closure::<dyn FnMut()>::new({
                    let slots = slots.clone();
                    let img = img.clone();
                    move || {
                        slots.borrow_mut()[i] = Some(img.clone());
                    }
                });
                let onerror = Closure::<dyn FnMut()>::new(move || {
                    log::warn!("Ball image failed to load: {path}");
                });

                img.set_onload(Some(onload.as_ref().unchecked_ref()));
                img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
                onload.forget();
                onerror.forget();

                img.set_src(path);
            }

            Self { slots }
        }

        /// Image for the given score, cycling through whatever has loaded
        pub fn for_score(&self, score: u32) -> Option<HtmlImageElement> {
            let slots = self.slots.borrow();
            let usable: Vec<&HtmlImageElement> = slots.iter().flatten().collect();
            image_index(score, usable.len()).map(|i| usable[i].clone())
        }

        /// A uniformly random usable image (game-over face)
        pub fn random<R: Rng>(&self, rng: &mut R) -> Option<HtmlImageElement> {
            let slots = self.slots.borrow();
            let usable: Vec<&HtmlImageElement> = slots.iter().flatten().collect();
            if usable.is_empty() {
                None
            } else {
                Some(usable[rng.random_range(0..usable.len())].clone())
            }
        }
    }

    /// Create an audio element for a clip. A failure yields None and the
    /// game simply plays nothing.
    pub fn load_audio_clip(path: &str) -> Option<HtmlAudioElement> {
        match HtmlAudioElement::new_with_src(path) {
            Ok(audio) => {
                audio.set_preload("auto");
                Some(audio)
            }
            Err(err) => {
                log::warn!("Could not create audio element for {path}: {err:?}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_image() {
        assert_eq!(image_index(0, 0), None);
        assert_eq!(image_index(57, 0), None);
    }

    #[test]
    fn image_cycles_every_ten_points() {
        assert_eq!(image_index(0, 3), Some(0));
        assert_eq!(image_index(9, 3), Some(0));
        assert_eq!(image_index(10, 3), Some(1));
        assert_eq!(image_index(29, 3), Some(2));
        // Wraps modulo the usable set
        assert_eq!(image_index(30, 3), Some(0));
        // A partially loaded set still cycles over what's there
        assert_eq!(image_index(10, 2), Some(1));
        assert_eq!(image_index(20, 2), Some(0));
    }
}
