pub mod catalog;
pub mod template;
pub mod utils;

pub use catalog::{CatalogError, RoomCatalog};
pub use template::{ItemVisual, RoomTemplate, RoomTemplateItem, SpriteSlice, WorkRoomConfig};
