//! Pagination over a fully ranked candidate list

/// Slice `ranked` to the window starting at `offset` holding at most `limit` items
///
/// Ranking always covers the whole candidate set first, so a page is a
/// slice of the global order. Offsets past the end give an empty page.
pub fn paginate<T>(ranked: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
    ranked.into_iter().skip(offset).take(limit).collect()
}
