//! Route labels for request spans and metrics.

use uuid::Uuid;

/// `path` with every UUID segment replaced by `{id}`, so metric label
/// cardinality stays bounded.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
