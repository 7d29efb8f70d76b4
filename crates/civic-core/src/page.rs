use civic_types::api::Page;

/// Upper bound on `limit` for any listing.
pub const MAX_PAGE_LIMIT: u32 = 200;

/// Slices one page out of an already ordered collection. `total` is the size
/// before slicing.
pub fn paginate<T>(items: Vec<T>, limit: u32, offset: u32) -> Page<T> {
    let limit = limit.min(MAX_PAGE_LIMIT);
    let total = items.len();
    let items = items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    Page {
        items,
        total,
        limit,
        offset,
    }
}
