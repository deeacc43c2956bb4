use migration::entities::{page, page_analytics};

use crate::storage::{Page, ViewEvent};

pub fn model_to_page(model: page::Model) -> Page {
    Page {
        id: model.id,
        owner_id: model.user_id,
        views: model.views,
        updated_at: model.updated_at,
    }
}

pub fn model_to_view_event(model: page_analytics::Model) -> ViewEvent {
    ViewEvent {
        id: model.id,
        page_id: model.page_id,
        device_type: model.device_type,
        created_at: model.created_at,
    }
}
