//! Server-rendered HTML pages.
//!
//! Pages are assembled with `format!`. Every value that came from a client
//! goes through [`escape_html`] except entry text, which is trusted
//! markup by contract: an entry title `<Hello>` renders as `&lt;Hello&gt;`
//! while `<strong>` in the text renders as a real tag.

mod pages;

use axum::http::StatusCode;

pub use pages::{PageContext, index_page, login_page, search_page};

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Minimal page for error responses.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    layout(
        &format!("{} {reason}", status.as_u16()),
        &format!(
            "<h2>{} {reason}</h2>\n<p>{}</p>",
            status.as_u16(),
            escape_html(message)
        ),
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <div class=\"page\">\n\
         <h1>Flaskr</h1>\n\
         {body}\n\
         </div>\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<Hello>"), "&lt;Hello&gt;");
        assert_eq!(escape_html("a & \"b\" 'c'"), "a &amp; &#34;b&#34; &#39;c&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn error_page_mentions_status_and_escapes_message() {
        let page = error_page(StatusCode::UNAUTHORIZED, "<nope>");
        assert!(page.contains("401 Unauthorized"));
        assert!(page.contains("&lt;nope&gt;"));
    }
}
