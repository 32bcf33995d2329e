//! HTML rendering of a day's chat log.
//!
//! The raw log is escaped first; links and timestamps are decorated
//! afterwards, so chat text can never introduce markup of its own.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::html_escape;

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[-A-Za-z0-9+&@#/%?=~_|!:,.;]*[-A-Za-z0-9+&@#/%=~_|]").expect("valid regex")
});

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\[\S+\]").expect("valid regex"));

/// Escape a raw log and decorate links and timestamps.
pub fn render_chatlog(raw: &str) -> String {
    let escaped = html_escape(raw);
    let linked = URL.replace_all(&escaped, r#"<a href="$0">$0</a>"#);
    TIMESTAMP
        .replace_all(&linked, r#"<span style="color: #888;">$0</span>"#)
        .into_owned()
}

/// Render the full archive page.
pub fn render_page(title: &str, prev: Option<&str>, next: Option<&str>, chatlog: &str) -> String {
    let title = html_escape(title);
    let nav_link = |target: Option<&str>, label: &str| {
        target
            .map(|t| format!(r#"<a style="color:#FF1A00;" href="/{}">{}</a>"#, html_escape(t), label))
            .unwrap_or_default()
    };

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{title} - chanlog</title>
<style>a {{ color: #111; }}</style>
</head>
<body>
<div style="float:right;">
{prev}
{next}
</div>
<h1 style="color:#111; font-size: 1.2em; margin:0;">chanlog</h1>
<h2 style="margin: .1em 0 .5em; font-size: 1.8em;">
<a style="color:#FF1A00; text-decoration: none;" href="/{title}">{title}</a>
</h2>
<pre style="white-space:pre-wrap;">{chatlog}</pre>
</body>
</html>
"#,
        title = title,
        prev = nav_link(prev, "Previous"),
        next = nav_link(next, "Next"),
        chatlog = chatlog,
    )
}
