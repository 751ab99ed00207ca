use askama::Template;

use crate::{
    models::ActivityType,
    rooms::{utils::px, ItemVisual, RoomTemplate, RoomTemplateItem, WorkRoomConfig},
};

/// Page shell: the room canvas starts as a loading placeholder and is
/// replaced once `/game/:room/content` delivers the rendered room.
#[derive(Template)]
#[template(path = "game.html")]
pub struct GameTemplate {
    pub service: String,
    pub room_name: String,
}

#[derive(Template)]
#[template(path = "room_content.html")]
pub struct RoomContentTemplate {
    pub room_name: String,
    pub canvas_style: String,
    pub background: Option<String>,
    pub items: Vec<ItemView>,
    pub activities: Vec<ActivityType>,
}

#[derive(Template)]
#[template(path = "room_error.html")]
pub struct RoomErrorTemplate {
    pub message: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub room_name: String,
}

/// One positioned element of the room canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub id: String,
    pub label: String,
    pub style: String,
    /// Set when the item is drawn as a plain image rather than a sheet crop.
    pub image: Option<String>,
}

impl From<&RoomTemplateItem> for ItemView {
    fn from(item: &RoomTemplateItem) -> Self {
        let mut style = item.placement_style();
        let image = match item.visual() {
            ItemVisual::Sheet { sheet, position, size } => {
                style.push_str(&format!(
                    " background-image: url('{}'); background-position: {}; background-size: {};",
                    sheet, position, size,
                ));
                None
            }
            ItemVisual::Image { src } => Some(src.to_string()),
        };

        Self {
            id: item.id.clone(),
            label: item.label.clone(),
            style,
            image,
        }
    }
}

impl RoomContentTemplate {
    pub fn new(
        room_name: &str,
        template: &RoomTemplate,
        work_room: &WorkRoomConfig,
        activities: Vec<ActivityType>,
    ) -> Self {
        let background = work_room.background().map(str::to_string);

        // the override replaces the composed layout entirely
        let items = match background {
            Some(_) => Vec::new(),
            None => template.items.iter().map(ItemView::from).collect(),
        };

        Self {
            room_name: room_name.to_string(),
            canvas_style: format!(
                "width: {}; height: {};",
                px(template.room_width),
                px(template.room_height)
            ),
            background,
            items,
            activities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> RoomTemplate {
        serde_json::from_value(serde_json::json!({
            "roomWidth": 320,
            "roomHeight": 180,
            "items": [
                { "id": "rug", "src": "/assets/rug.png", "label": "Rug",
                  "left": 10, "bottom": 0, "width": 100, "height": 20 },
                { "id": "lamp", "src": "props:lamp", "label": "Lamp",
                  "left": 200, "bottom": 20, "width": 16, "height": 48,
                  "slice": { "src": "/assets/props.png", "x": 16, "y": 48, "sheetW": 256, "sheetH": 128 } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn items_keep_draw_order() {
        let content = RoomContentTemplate::new("den", &template(), &WorkRoomConfig::default(), vec![]);
        let ids: Vec<_> = content.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["rug", "lamp"]);
        assert_eq!(content.canvas_style, "width: 320px; height: 180px;");
    }

    #[test]
    fn sliced_item_renders_as_sheet_crop() {
        let template = template();
        let lamp = ItemView::from(&template.items[1]);
        assert_eq!(lamp.image, None);
        assert!(lamp.style.contains("background-image: url('/assets/props.png')"));
        assert!(lamp.style.contains("background-position: -16px -48px"));
        assert!(lamp.style.contains("background-size: 256px 128px"));

        let rug = ItemView::from(&template.items[0]);
        assert_eq!(rug.image.as_deref(), Some("/assets/rug.png"));
        assert!(!rug.style.contains("background-image"));
    }

    #[test]
    fn background_override_hides_items() {
        let work_room = WorkRoomConfig {
            background_image: Some("/assets/office.png".to_string()),
        };
        let content = RoomContentTemplate::new("den", &template(), &work_room, vec![]);
        assert!(content.items.is_empty());

        let html = content.render().unwrap();
        assert!(html.contains("office.png"));
        assert!(!html.contains("item-rug"));
    }

    #[test]
    fn renders_items_and_activities() {
        let activities = vec![ActivityType {
            id: 1,
            name: "focus".to_string(),
            description: "Heads-down work".to_string(),
        }];
        let html = RoomContentTemplate::new("den", &template(), &WorkRoomConfig::default(), activities)
            .render()
            .unwrap();

        assert!(html.contains(r#"id="room""#));
        assert!(html.contains("item-rug"));
        assert!(html.contains("item-lamp"));
        assert!(html.contains("focus"));
        assert!(html.find("item-rug").unwrap() < html.find("item-lamp").unwrap());
    }

    #[test]
    fn shell_starts_with_loading_placeholder() {
        let html = GameTemplate {
            service: "workroom".to_string(),
            room_name: "den".to_string(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Loading room"));
        assert!(html.contains("/game/den/content"));
    }
}
