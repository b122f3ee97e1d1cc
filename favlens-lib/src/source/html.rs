use scraper::{Html, Selector};

/// `href` of the first `<link>` whose `rel` tokens include `icon`.
///
/// `rel="shortcut icon"` matches; `rel="apple-touch-icon"` does not.
pub fn find_icon_href(html: &str) -> Option<String> {
    let selector = Selector::parse(r#"link[rel~="icon"]"#).ok()?;
    let document = Html::parse_document(html);
    let link = document.select(&selector).next()?;
    link.value().attr("href").map(str::to_string)
}

/// Builds the favicon URL from the page host and the link's `href`.
///
/// Anything starting with `http` is taken as absolute. Everything else is
/// joined to the bare host with a single `/`, without adding a scheme or
/// normalizing the path.
pub fn resolve_icon_href(host: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{host}/{href}")
    }
}
