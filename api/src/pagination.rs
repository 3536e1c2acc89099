//! Newest-first paging over chronological sequences.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        PageRequest { page, size }
    }
}

/// Items of `req.page` counted from the end of `items`, newest first.
/// Returns an empty page for page 0, size 0 or a page past the end.
pub fn page<T>(items: &[T], req: PageRequest) -> Vec<&T> {
    if req.page == 0 || req.size == 0 {
        return Vec::new();
    }
    let start = (req.page - 1).saturating_mul(req.size);
    items.iter().rev().skip(start).take(req.size).collect()
}

/// Number of pages needed for `len` items; zero when there is nothing to show.
pub fn page_count(len: usize, size: usize) -> usize {
    if size == 0 { 0 } else { len.div_ceil(size) }
}
