//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web)
//! - Viewport size
//! - Time

#[cfg(target_arch = "wasm32")]
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub use frame::FrameLoop;

use crate::sim::Playfield;

/// Playfield for the current browser viewport
#[cfg(target_arch = "wasm32")]
pub fn viewport_playfield() -> Playfield {
    let size = web_sys::window().map(|w| {
        let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (width as f32, height as f32)
    });
    match size {
        Some((width, height)) => Playfield::fit_viewport(width, height),
        None => Playfield::default(),
    }
}

/// Native builds have no viewport; use the default layout
#[cfg(not(target_arch = "wasm32"))]
pub fn viewport_playfield() -> Playfield {
    Playfield::default()
}

/// Start-screen instruction for a viewport of the given CSS width
pub fn flap_hint(viewport_width: f32) -> &'static str {
    if viewport_width <= crate::consts::NARROW_VIEWPORT_WIDTH {
        "Tap screen to flap"
    } else {
        "Press SPACE to flap"
    }
}

/// Viewport width in CSS pixels
#[cfg(target_arch = "wasm32")]
pub fn viewport_width() -> f32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(crate::consts::DEFAULT_PLAYFIELD_WIDTH as f64) as f32
}

/// Milliseconds since an arbitrary epoch, for seeding and frame timing
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flap_hint_follows_viewport() {
        assert_eq!(flap_hint(390.0), "Tap screen to flap");
        assert_eq!(flap_hint(768.0), "Tap screen to flap");
        assert_eq!(flap_hint(1280.0), "Press SPACE to flap");
    }

    #[test]
    fn test_native_viewport_is_default() {
        assert_eq!(viewport_playfield(), Playfield::default());
    }
}
