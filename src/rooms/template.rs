use serde::{Deserialize, Serialize};

use super::utils::px;

/// Layout of a single room: a canvas plus the items drawn on it.
///
/// Items are kept in file order, which is also the order they are drawn in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTemplate {
    pub room_width: f64,
    pub room_height: f64,
    #[serde(default)]
    pub items: Vec<RoomTemplateItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTemplateItem {
    pub id: String,
    /// Asset path, or a composite key naming a sprite-sheet slice.
    pub src: String,
    pub label: String,
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice: Option<SpriteSlice>,
}

/// Sub-rectangle of a sprite sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSlice {
    pub src: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "sheetW")]
    pub sheet_w: f64,
    #[serde(rename = "sheetH")]
    pub sheet_h: f64,
}

/// Optional override replacing the composed layout with one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRoomConfig {
    #[serde(default)]
    pub background_image: Option<String>,
}

/// How an item ends up on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemVisual<'a> {
    Sheet {
        sheet: &'a str,
        position: String,
        size: String,
    },
    Image {
        src: &'a str,
    },
}

impl SpriteSlice {
    /// CSS `background-position` that moves the slice into view.
    pub fn background_position(&self) -> String {
        format!("{} {}", px(-self.x), px(-self.y))
    }

    /// CSS `background-size` keeping the sheet at its native scale.
    pub fn background_size(&self) -> String {
        format!("{} {}", px(self.sheet_w), px(self.sheet_h))
    }
}

impl RoomTemplateItem {
    // a slice always wins over `src`
    pub fn visual(&self) -> ItemVisual<'_> {
        match &self.slice {
            Some(slice) => ItemVisual::Sheet {
                sheet: &slice.src,
                position: slice.background_position(),
                size: slice.background_size(),
            },
            None => ItemVisual::Image { src: &self.src },
        }
    }

    /// Absolute placement inside the room canvas.
    pub fn placement_style(&self) -> String {
        format!(
            "left: {}; bottom: {}; width: {}; height: {};",
            px(self.left),
            px(self.bottom),
            px(self.width),
            px(self.height),
        )
    }
}

impl WorkRoomConfig {
    pub fn background(&self) -> Option<&str> {
        self.background_image
            .as_deref()
            .filter(|image| !image.trim().is_empty())
    }
}
