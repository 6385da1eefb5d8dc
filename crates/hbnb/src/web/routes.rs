//! Route handlers.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Html;

/// Page rendered by `/number_template/{n}`; `{{ n }}` is the placeholder.
const NUMBER_TEMPLATE: &str = include_str!("../../templates/number.html");

/// `GET /`
pub async fn hello() -> &'static str {
    "Hello HBNB!"
}

/// `GET /hbnb`
pub async fn hbnb() -> &'static str {
    "HBNB"
}

/// `GET /c/{text}`
pub async fn c_text(Path(text): Path<String>) -> String {
    format!("C {}", text.replace('_', " "))
}

/// `GET /python/`
pub async fn python_default() -> String {
    "Python is cool".to_string()
}

/// `GET /python/{text}`
pub async fn python_text(Path(text): Path<String>) -> String {
    format!("Python {}", text.replace('_', " "))
}

/// `GET /number/{n}`
pub async fn number(Path(raw): Path<String>) -> Result<String, StatusCode> {
    let n = parse_number(&raw).ok_or(StatusCode::NOT_FOUND)?;
    Ok(format!("{n} is a number"))
}

/// `GET /number_template/{n}`
pub async fn number_template(Path(raw): Path<String>) -> Result<Html<String>, StatusCode> {
    let n = parse_number(&raw).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(render_number(&n)))
}

/// Validate an unsigned decimal path segment and return it in canonical form
/// (leading zeros dropped). Any length is accepted; signs, spaces and
/// non-digits are rejected so the route falls through to 404.
#[must_use]
pub fn parse_number(raw: &str) -> Option<String> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = raw.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
}

/// Render the number page.
#[must_use]
pub fn render_number(n: &str) -> String {
    NUMBER_TEMPLATE.replace("{{ n }}", n)
}
