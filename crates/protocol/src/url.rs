//! URL resolution against the forum origin.
//!
//! Request configs and forum payloads routinely carry scheme-relative or
//! origin-relative URLs; these helpers absolutize them before injection.

use std::collections::BTreeMap;

/// Resolves `url` against the forum base origin.
///
/// - `//host/path` becomes `https://host/path`
/// - `about://path` is rewritten onto the base origin
/// - `/path` is joined to the base origin
/// - anything else passes through unchanged
pub fn resolve_url(base: &str, url: &str) -> String {
	if let Some(rest) = url.strip_prefix("about://") {
		return format!("{base}{rest}");
	}
	if url.starts_with("//") {
		return format!("https:{url}");
	}
	if url.starts_with('/') {
		return format!("{base}{url}");
	}
	url.to_string()
}

/// Parses the query component of `url` into a key/value map.
///
/// When `url` has no `?`, the whole input is treated as a query string.
/// Pairs without a `=` map to an empty value; repeated keys keep the last
/// occurrence.
pub fn url_search_params(url: &str) -> BTreeMap<String, String> {
	let query = match url.split_once('?') {
		Some((_, query)) => query,
		None => url,
	};

	query
		.split('&')
		.filter(|pair| !pair.is_empty())
		.map(|pair| match pair.split_once('=') {
			Some((key, value)) => (key.to_string(), value.to_string()),
			None => (pair.to_string(), String::new()),
		})
		.collect()
}
