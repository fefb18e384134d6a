//! Navigation Menu Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use cuantovale_app::views::{MENU, MenuItem};

/// One entry of the navigation menu.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemResponse {
    /// Text shown in the menu
    pub label: String,

    /// Destination path
    pub path: String,
}

impl From<&MenuItem> for MenuItemResponse {
    fn from(item: &MenuItem) -> Self {
        Self {
            label: item.label.to_owned(),
            path: item.path.to_owned(),
        }
    }
}

/// Navigation Menu Handler
#[endpoint(tags("navigation"), summary = "Navigation menu")]
pub(crate) async fn handler() -> Json<Vec<MenuItemResponse>> {
    Json(MENU.iter().map(MenuItemResponse::from).collect())
}
