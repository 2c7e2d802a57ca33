//! Format hint taken from a page URL or query string.

use url::Url;
use url::form_urlencoded;

/// Name of the query parameter that preselects a format.
pub const FORMAT_PARAM: &str = "format";

/// Extract the `format` query parameter.
///
/// Accepts a full URL (`http://host/page?format=LaTeX`), a query string with
/// a leading `?`, or a bare query string. The value is returned decoded but
/// otherwise untouched; matching it against known formats is the caller's job.
pub fn format_hint(input: &str) -> Option<String> {
    let input = input.trim();
    if let Ok(url) = Url::parse(input) {
        return first_format_value(url.query().unwrap_or_default());
    }
    let query = input.split_once('?').map_or(input, |(_, query)| query);
    let query = query.split_once('#').map_or(query, |(query, _)| query);
    first_format_value(query)
}

/// Pick the format hint for a session.
///
/// A `--format` given on the command line wins, then the address passed
/// with `--url`, then a format saved in the config files.
pub fn resolve_format_hint(
    cli_format: Option<&str>,
    url: Option<&str>,
    saved_format: Option<&str>,
) -> Option<String> {
    cli_format
        .map(ToOwned::to_owned)
        .or_else(|| url.and_then(format_hint))
        .or_else(|| saved_format.map(ToOwned::to_owned))
}

fn first_format_value(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == FORMAT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_from_full_url() {
        assert_eq!(
            format_hint("https://example.com/index.html?format=AsciiDoc"),
            Some("AsciiDoc".to_string())
        );
    }

    #[test]
    fn test_hint_from_query_string() {
        assert_eq!(format_hint("?format=LaTeX"), Some("LaTeX".to_string()));
        assert_eq!(
            format_hint("theme=dark&format=Mermaid"),
            Some("Mermaid".to_string())
        );
    }

    #[test]
    fn test_hint_is_percent_decoded() {
        assert_eq!(
            format_hint("?format=Vega%2DLite"),
            Some("Vega-Lite".to_string())
        );
    }

    #[test]
    fn test_first_format_parameter_wins() {
        assert_eq!(
            format_hint("?format=PlantUML&format=Markdown"),
            Some("PlantUML".to_string())
        );
    }

    #[test]
    fn test_missing_or_empty_parameter() {
        assert_eq!(format_hint("https://example.com/"), None);
        assert_eq!(format_hint("?format="), None);
        assert_eq!(format_hint(""), None);
    }

    #[test]
    fn test_fragment_is_not_part_of_value() {
        assert_eq!(
            format_hint("page.html?format=Markdown#top"),
            Some("Markdown".to_string())
        );
    }

    #[test]
    fn test_cli_format_beats_url_and_saved_format() {
        assert_eq!(
            resolve_format_hint(Some("AsciiDoc"), Some("?format=Mermaid"), Some("LaTeX")),
            Some("AsciiDoc".to_string())
        );
    }

    #[test]
    fn test_url_beats_saved_format() {
        assert_eq!(
            resolve_format_hint(
                None,
                Some("https://example.com/?format=Mermaid"),
                Some("LaTeX")
            ),
            Some("Mermaid".to_string())
        );
    }

    #[test]
    fn test_saved_format_used_when_url_has_no_hint() {
        assert_eq!(
            resolve_format_hint(None, Some("https://example.com/"), Some("LaTeX")),
            Some("LaTeX".to_string())
        );
        assert_eq!(resolve_format_hint(None, None, None), None);
    }
}
