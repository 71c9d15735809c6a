//! Page bodies for the entry list, search results and login form.

use std::fmt::Write as _;

use super::{escape_html, layout};
use crate::domain::Entry;

/// Placeholder shown when there is nothing to list.
pub const EMPTY_PLACEHOLDER: &str = "No entries yet. Add some!";

// Removes a clicked entry once the server confirms the delete.
const DELETE_SCRIPT: &str = r"<script>
document.querySelectorAll('.entry').forEach(function (entry) {
  entry.addEventListener('click', function () {
    var postId = entry.querySelector('h2').id;
    fetch('/delete/' + postId, { credentials: 'same-origin' })
      .then(function (res) { return res.json(); })
      .then(function (result) { if (result.status === 1) { entry.remove(); } });
  });
});
</script>";

/// Per-request state every page shows: login links and drained flashes.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Whether the viewer is logged in.
    pub logged_in: bool,
    /// Flash messages to display once.
    pub flashes: Vec<String>,
}

impl PageContext {
    fn header(&self) -> String {
        let mut out = String::from("<div class=\"metanav\">\n");
        if self.logged_in {
            out.push_str("<a href=\"/logout\">log out</a>\n");
        } else {
            out.push_str("<a href=\"/login\">log in</a>\n");
        }
        out.push_str("<a href=\"/search/\">search</a>\n</div>\n");
        for message in &self.flashes {
            let _ = writeln!(out, "<div class=\"flash\">{}</div>", escape_html(message));
        }
        out
    }
}

fn entry_list(entries: &[Entry]) -> String {
    let mut out = String::from("<ul class=\"entries\">\n");
    if entries.is_empty() {
        let _ = writeln!(out, "<li><em>{EMPTY_PLACEHOLDER}</em></li>");
    }
    for entry in entries {
        let _ = writeln!(
            out,
            "<li class=\"entry\"><h2 id=\"{id}\">{title}</h2>{text}</li>",
            id = entry.id,
            title = escape_html(&entry.title),
            text = entry.text,
        );
    }
    out.push_str("</ul>\n");
    out
}

/// The home page: add form for logged-in users, then every entry.
#[must_use]
pub fn index_page(ctx: &PageContext, entries: &[Entry]) -> String {
    let mut body = ctx.header();
    if ctx.logged_in {
        body.push_str(
            "<form action=\"/add\" method=\"post\" class=\"add-entry\">\n\
             <dl>\n\
             <dt>Title:</dt>\n\
             <dd><input type=\"text\" size=\"30\" name=\"title\"></dd>\n\
             <dt>Text:</dt>\n\
             <dd><textarea name=\"text\" rows=\"5\" cols=\"40\"></textarea></dd>\n\
             <dd><input type=\"submit\" value=\"Share\"></dd>\n\
             </dl>\n\
             </form>\n",
        );
    }
    body.push_str(&entry_list(entries));
    if ctx.logged_in {
        body.push_str(DELETE_SCRIPT);
    }
    layout("Flaskr", &body)
}

/// The search page: query form, then matching entries.
#[must_use]
pub fn search_page(ctx: &PageContext, entries: &[Entry], query: Option<&str>) -> String {
    let mut body = ctx.header();
    let _ = write!(
        body,
        "<form action=\"/search/\" method=\"get\" class=\"search\">\n\
         <input type=\"text\" name=\"query\" value=\"{}\">\n\
         <input type=\"submit\" value=\"Search\">\n\
         </form>\n",
        escape_html(query.unwrap_or_default())
    );
    body.push_str(&entry_list(entries));
    layout("Flaskr search", &body)
}

/// The login form, with an inline error after a failed attempt.
#[must_use]
pub fn login_page(ctx: &PageContext, error: Option<&str>) -> String {
    let mut body = ctx.header();
    body.push_str("<h2>Login</h2>\n");
    if let Some(error) = error {
        let _ = writeln!(
            body,
            "<p class=\"error\"><strong>Error:</strong> {}</p>",
            escape_html(error)
        );
    }
    body.push_str(
        "<form action=\"/login\" method=\"post\">\n\
         <dl>\n\
         <dt>Username:</dt>\n\
         <dd><input type=\"text\" name=\"username\"></dd>\n\
         <dt>Password:</dt>\n\
         <dd><input type=\"password\" name=\"password\"></dd>\n\
         <dd><input type=\"submit\" value=\"Login\" class=\"btn btn-primary\"></dd>\n\
         </dl>\n\
         </form>\n",
    );
    layout("Flaskr login", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryId;

    fn entry(id: i64, title: &str, text: &str) -> Entry {
        Entry {
            id: EntryId::new(id),
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_index_shows_placeholder() {
        let page = index_page(&PageContext::default(), &[]);
        assert!(page.contains(EMPTY_PLACEHOLDER));
        assert!(!page.contains("class=\"add-entry\""));
    }

    #[test]
    fn title_escaped_text_trusted() {
        let entries = [entry(1, "<Hello>", "<strong>HTML</strong> allowed here")];
        let page = index_page(&PageContext::default(), &entries);
        assert!(page.contains("&lt;Hello&gt;"));
        assert!(page.contains("<strong>HTML</strong> allowed here"));
        assert!(!page.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn logged_in_index_has_form_and_logout() {
        let ctx = PageContext {
            logged_in: true,
            flashes: vec!["You were logged in".to_string()],
        };
        let page = index_page(&ctx, &[]);
        assert!(page.contains("action=\"/add\""));
        assert!(page.contains("href=\"/logout\""));
        assert!(page.contains("<div class=\"flash\">You were logged in</div>"));
    }

    #[test]
    fn login_error_is_inline() {
        let page = login_page(&PageContext::default(), Some("Invalid password"));
        assert!(page.contains("<strong>Error:</strong> Invalid password"));
    }

    #[test]
    fn search_echoes_query_escaped() {
        let page = search_page(&PageContext::default(), &[], Some("\"><script>"));
        assert!(page.contains("value=\"&#34;&gt;&lt;script&gt;\""));
    }
}
