//! Watermark placement.
//!
//! Positions are absolute top-left pixel coordinates in source-image space.
//! Named anchors are resolved by the caller, before the pipeline runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::settings::WatermarkPosition;

/// Resolve where a watermark of `content` size goes inside `container`.
///
/// The requested position is used as is: no clamping, no anchoring. Content
/// that overflows the container is clipped when drawn.
pub fn fit_position(
    _container_width: u32,
    _container_height: u32,
    _content_width: f32,
    _content_height: f32,
    requested: WatermarkPosition,
) -> (f32, f32) {
    (requested.x, requested.y)
}

/// The editor's preset placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatermarkAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl WatermarkAnchor {
    pub const ALL: [WatermarkAnchor; 7] = [
        WatermarkAnchor::TopLeft,
        WatermarkAnchor::TopCenter,
        WatermarkAnchor::TopRight,
        WatermarkAnchor::Center,
        WatermarkAnchor::BottomLeft,
        WatermarkAnchor::BottomCenter,
        WatermarkAnchor::BottomRight,
    ];

    /// The fixed coordinate this preset stands for.
    pub fn position(self) -> WatermarkPosition {
        const NEAR: f32 = 20.0;
        const MID: f32 = 200.0;
        const FAR: f32 = 400.0;

        let (x, y) = match self {
            WatermarkAnchor::TopLeft => (NEAR, NEAR),
            WatermarkAnchor::TopCenter => (MID, NEAR),
            WatermarkAnchor::TopRight => (FAR, NEAR),
            WatermarkAnchor::Center => (MID, MID),
            WatermarkAnchor::BottomLeft => (NEAR, FAR),
            WatermarkAnchor::BottomCenter => (MID, FAR),
            WatermarkAnchor::BottomRight => (FAR, FAR),
        };
        WatermarkPosition::new(x, y)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WatermarkAnchor::TopLeft => "top-left",
            WatermarkAnchor::TopCenter => "top-center",
            WatermarkAnchor::TopRight => "top-right",
            WatermarkAnchor::Center => "center",
            WatermarkAnchor::BottomLeft => "bottom-left",
            WatermarkAnchor::BottomCenter => "bottom-center",
            WatermarkAnchor::BottomRight => "bottom-right",
        }
    }
}

impl FromStr for WatermarkAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        WatermarkAnchor::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == needle)
            .ok_or_else(|| format!("unknown watermark anchor: {}", s))
    }
}

impl fmt::Display for WatermarkAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
