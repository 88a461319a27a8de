//! Deterministic ordering of `media_list`.

use crate::types::SharedTitleRecord;
use std::cmp::{Ordering, Reverse};

/// Newest first; titles without a year after all dated ones; then by
/// `title_id` ascending so equal years never depend on fetch order.
pub fn compare_records(a: &SharedTitleRecord, b: &SharedTitleRecord) -> Ordering {
    let year_key = |r: &SharedTitleRecord| (r.year.is_none(), Reverse(r.year));
    year_key(a)
        .cmp(&year_key(b))
        .then_with(|| a.title_id.cmp(&b.title_id))
}

pub fn sort_media_list(records: &mut [SharedTitleRecord]) {
    records.sort_by(compare_records);
}
