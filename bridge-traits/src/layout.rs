//! Layout Abstraction
//!
//! Inserting and styling elements is purely cosmetic from the core's point of
//! view. Hosts implement [`FrameLayout`] over whatever element model they have
//! (the DOM in `bridge-wasm`, a fake tree in tests).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Style of the rounded box the widget frame lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStyle {
    pub background: String,
    pub border_radius_px: u32,
    pub width_px: u32,
    pub height_px: u32,
    pub overflow_hidden: bool,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            border_radius_px: 5,
            width_px: 488,
            height_px: 465,
            overflow_hidden: true,
        }
    }
}

impl ContainerStyle {
    /// CSS declarations in a stable order.
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut declarations = vec![
            ("background", self.background.clone()),
            ("border-radius", format!("{}px", self.border_radius_px)),
            ("height", format!("{}px", self.height_px)),
            ("width", format!("{}px", self.width_px)),
        ];
        if self.overflow_hidden {
            declarations.push(("overflow", "hidden".to_string()));
        }
        declarations
    }
}

/// Style applied to the embedded frame itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStyle {
    pub scrolling: bool,
    pub border_px: u32,
    pub width: String,
    pub height: String,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            scrolling: false,
            border_px: 0,
            width: "100%".to_string(),
            height: "100%".to_string(),
        }
    }
}

impl FrameStyle {
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("border", self.border_px.to_string()),
            ("height", self.height.clone()),
            ("width", self.width.clone()),
        ]
    }
}

/// Container/layout primitive
pub trait FrameLayout {
    /// Host element type (containers and frames alike).
    type Element;

    /// Create a styled container and append it to `parent`.
    fn insert_container(&self, parent: &Self::Element, style: &ContainerStyle)
        -> Result<Self::Element>;

    /// Create a plain frame pointed at `url` and append it to `append_to`.
    ///
    /// Used when no methods need to be exposed to the widget.
    fn create_frame(&self, url: &Url, append_to: &Self::Element) -> Result<Self::Element>;

    /// Apply the frame style.
    fn style_frame(&self, frame: &Self::Element, style: &FrameStyle) -> Result<()>;
}
