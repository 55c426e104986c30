use axum::response::Html;

const HOME_PAGE: &str = include_str!("../../static/home.html");

/// Static informational page
pub async fn index() -> Html<&'static str> {
    Html(HOME_PAGE)
}
