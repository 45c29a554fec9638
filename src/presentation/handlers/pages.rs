use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

const MENU_PAGE: &str = include_str!("../../../assets/menu.html");
const CATEGORIZER_PAGE: &str = include_str!("../../../assets/data_categorizer.html");
const FLASH_PLACEHOLDER: &str = "<!-- flash -->";

/// Flash message carried back to the form via redirect query params.
#[derive(Debug, Deserialize)]
pub struct FlashParams {
    pub flash: Option<String>,
    pub level: Option<String>,
}

pub async fn menu_handler() -> Html<&'static str> {
    Html(MENU_PAGE)
}

pub async fn data_categorizer_handler(Query(params): Query<FlashParams>) -> Html<String> {
    let page = match params.flash {
        Some(message) if !message.is_empty() => {
            let level = match params.level.as_deref() {
                Some("warning") => "warning",
                Some("success") => "success",
                _ => "error",
            };
            let banner = format!(
                "<div class=\"flash {level}\">{}</div>",
                escape_html(&message)
            );
            CATEGORIZER_PAGE.replace(FLASH_PLACEHOLDER, &banner)
        }
        _ => CATEGORIZER_PAGE.to_string(),
    };
    Html(page)
}

pub async fn name_assign_handler() -> Html<&'static str> {
    Html("<h1>Name Assignment</h1><p>Coming soon!</p><a href=\"/\">Back to Menu</a>")
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
