//! Name resolution for things a player refers to by name.
//!
//! Policy: a case-insensitive exact match on id or name wins; otherwise the
//! first case-insensitive substring match on the name. Candidates are
//! scanned in container order, so ties go to the earliest inserted.

/// Something a player can refer to by name.
pub trait Named {
    /// Stable identifier (template id or instance id).
    fn key(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;
}

impl<T: Named + ?Sized> Named for &T {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Returns the index of the candidate `query` refers to.
pub fn resolve<T: Named>(candidates: &[T], query: &str) -> Option<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    candidates
        .iter()
        .position(|c| c.key().to_lowercase() == query || c.name().to_lowercase() == query)
        .or_else(|| {
            candidates
                .iter()
                .position(|c| c.name().to_lowercase().contains(&query))
        })
}
