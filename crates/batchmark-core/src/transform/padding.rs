//! Letterboxing onto a fixed-size canvas.
//!
//! Content is always normalized to fit the target box: scaled by
//! `min(W / w, H / h)`, which may enlarge it, and centered. It is never
//! cropped or distorted.

use super::resize::{resize, scaled_dimensions, FilterType};
use crate::color::Rgba8;
use crate::composite::draw_bitmap;
use crate::decode::Bitmap;
use crate::settings::MIN_PADDING_DIMENSION;

/// Where the content ends up inside the padded canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddingLayout {
    pub scale: f64,
    pub content_width: u32,
    pub content_height: u32,
    pub offset_x: i64,
    pub offset_y: i64,
}

/// Compute the scale, scaled size and centering offset of `content` inside
/// a `target_width` by `target_height` box.
pub fn compute_padding_layout(
    content_width: u32,
    content_height: u32,
    target_width: u32,
    target_height: u32,
) -> PaddingLayout {
    let target_width = target_width.max(MIN_PADDING_DIMENSION);
    let target_height = target_height.max(MIN_PADDING_DIMENSION);
    let content_width = content_width.max(1);
    let content_height = content_height.max(1);

    let scale = f64::min(
        target_width as f64 / content_width as f64,
        target_height as f64 / content_height as f64,
    );
    let (sw, sh) = scaled_dimensions(content_width, content_height, scale);
    let sw = sw.min(target_width);
    let sh = sh.min(target_height);

    PaddingLayout {
        scale,
        content_width: sw,
        content_height: sh,
        offset_x: (target_width as i64 - sw as i64) / 2,
        offset_y: (target_height as i64 - sh as i64) / 2,
    }
}

/// Place `content` on a new `target_width` x `target_height` canvas filled
/// with `background`.
pub fn apply_padding(
    content: &Bitmap,
    target_width: u32,
    target_height: u32,
    background: Rgba8,
) -> Bitmap {
    let layout = compute_padding_layout(content.width, content.height, target_width, target_height);
    let target_width = target_width.max(MIN_PADDING_DIMENSION);
    let target_height = target_height.max(MIN_PADDING_DIMENSION);
    let mut canvas = Bitmap::filled(target_width, target_height, background);

    match resize(
        content,
        layout.content_width,
        layout.content_height,
        FilterType::Bilinear,
    ) {
        Ok(scaled) => draw_bitmap(&mut canvas, &scaled, layout.offset_x, layout.offset_y, 1.0),
        Err(e) => {
            tracing::warn!(error = %e, "could not scale content for padding, drawing unscaled");
            draw_bitmap(&mut canvas, content, layout.offset_x, layout.offset_y, 1.0);
        }
    }

    tracing::debug!(
        target_width,
        target_height,
        scale = layout.scale,
        content_width = layout.content_width,
        content_height = layout.content_height,
        "padded canvas"
    );
    canvas
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the scaled content fits the box, touches it on at least
        /// one axis and is centered.
        #[test]
        fn prop_layout_containment(
            w in 1u32..=800,
            h in 1u32..=800,
            tw in 1u32..=800,
            th in 1u32..=800,
        ) {
            let layout = compute_padding_layout(w, h, tw, th);
            prop_assert!(layout.content_width <= tw);
            prop_assert!(layout.content_height <= th);
            prop_assert!(layout.content_width == tw || layout.content_height == th);
            prop_assert!(layout.offset_x >= 0 && layout.offset_y >= 0);
            prop_assert_eq!(layout.offset_x, (tw as i64 - layout.content_width as i64) / 2);
            prop_assert_eq!(layout.offset_y, (th as i64 - layout.content_height as i64) / 2);
        }

        /// Property: the padded output is exactly the target size.
        #[test]
        fn prop_output_is_target_size(
            w in 1u32..=20,
            h in 1u32..=20,
            tw in 1u32..=40,
            th in 1u32..=40,
        ) {
            let content = Bitmap::filled(w, h, Rgba8::new(1, 2, 3, 255));
            let padded = apply_padding(&content, tw, th, Rgba8::BLACK);
            prop_assert_eq!((padded.width, padded.height), (tw, th));
            prop_assert_eq!(padded.pixels.len(), (tw * th * 4) as usize);
        }
    }
}
