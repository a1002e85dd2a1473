//! Local `$ref` resolution
//!
//! Only document-local pointers of the form `#/segment/segment/...` are
//! followed. Segments are matched literally (no `~0`/`~1` unescaping).

use serde_json::Value;

/// Prefix every resolvable reference must carry
pub const LOCAL_PREFIX: &str = "#/";

/// Check whether a reference is a local pointer this crate can follow
pub fn is_local(reference: &str) -> bool {
    reference.starts_with(LOCAL_PREFIX)
}

/// Resolve a `$ref` against the root document.
///
/// Returns `None` for non-local references (URLs, relative files, a bare `#`)
/// and for any pointer whose path does not exist in full.
pub fn resolve_ref<'a>(reference: &str, root: &'a Value) -> Option<&'a Value> {
    if !is_local(reference) {
        return None;
    }
    let path = &reference[LOCAL_PREFIX.len()..];

    path.split('/').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Parse a canonical array index ("0", "12"; not "01", "+1" or "")
fn array_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));

    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}
