//! Active link synchronization

use url::Url;

use crate::browser::Anchor;

/// Path an anchor points to, resolved against the current location
pub fn anchor_path<A: Anchor>(current: &Url, anchor: &A) -> Option<String> {
    let href = anchor.href()?;
    current.join(&href).ok().map(|u| u.path().to_string())
}

/// Mark each anchor active iff its path equals the current path
///
/// Only the path is compared; query, fragment and origin are ignored.
/// Anchors without a resolvable `href` are marked inactive. Returns the
/// number of anchors left active. Calling it again with the same inputs
/// leaves the same state.
pub fn sync_active_links<A: Anchor>(current: &Url, anchors: &[A], active_class: &str) -> usize {
    let current_path = current.path();
    let mut active = 0;

    for anchor in anchors {
        let is_active = anchor_path(current, anchor).as_deref() == Some(current_path);
        anchor.toggle_class(active_class, is_active);
        if is_active {
            active += 1;
        }
    }

    active
}
