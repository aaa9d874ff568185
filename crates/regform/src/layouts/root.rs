// Root Layout
// The document shell every page is rendered into

use maud::{html, Markup, DOCTYPE};

/// Stylesheet linked from every page
pub const STYLESHEET: &str = "/static/css/style.css";

/// Slots for the root layout
#[derive(Clone)]
pub struct Slots {
    /// Page title (required)
    pub title: String,

    /// Additional <head> content (optional)
    /// For page scripts
    pub head_extra: Option<Markup>,
}

impl Slots {
    /// Create slots with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            head_extra: None,
        }
    }

    /// Builder method to set extra head content
    pub fn head_extra(mut self, extra: Markup) -> Self {
        self.head_extra = Some(extra);
        self
    }
}

/// Root layout function
///
/// Wraps page content in a full HTML document inside `main.container`.
pub fn layout(slots: Slots, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (slots.title) }
                link rel="stylesheet" href=(STYLESHEET);
                @if let Some(extra) = slots.head_extra {
                    (extra)
                }
            }
            body {
                main.container {
                    (content)
                }
            }
        }
    }
}
