use axum::response::Html;

const WELCOME: &str = "<h1 align='center'>Crop Yield API <br> The prediction server is running. \
Use the /api/v1/system/info endpoint to know more.</h1>";

/// GET / and GET /home -- static welcome page.
pub async fn welcome() -> Html<&'static str> {
    Html(WELCOME)
}
