//! Search stage
//!
//! Free-text match across an entity's searchable derived fields.

use crate::accessors::FieldAccessor;
use crate::domain::Record;

/// Keep rows where any searchable field contains `search_text`, case-insensitively.
///
/// Blank search text keeps everything. Missing fields match as `"--"`.
pub fn apply<A: FieldAccessor + ?Sized>(
    records: &[Record],
    rows: &mut Vec<usize>,
    search_text: &str,
    accessor: &A,
) {
    let needle = search_text.trim().to_lowercase();
    if needle.is_empty() {
        return;
    }

    let fields = accessor.searchable_fields();
    rows.retain(|&index| {
        let record = &records[index];
        fields.iter().any(|field| {
            accessor
                .derive(record, field)
                .display_or_sentinel()
                .to_lowercase()
                .contains(&needle)
        })
    });
}
