//! Wolfram|Alpha search link plugin.

/// Trigger prefix, including the separating space.
pub const PREFIX: &str = "!wolfram ";

const SEARCH_URL: &str = "http://www.wolframalpha.com/input/?i=";

/// Build the search URL for a query, form-encoding it.
pub fn search_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{}{}", SEARCH_URL, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_escapes_query() {
        assert_eq!(
            search_url("integrate x^2 & more"),
            "http://www.wolframalpha.com/input/?i=integrate+x%5E2+%26+more"
        );
        assert_eq!(search_url(""), "http://www.wolframalpha.com/input/?i=");
    }
}
