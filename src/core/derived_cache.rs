use std::cell::OnceCell;

/// Observable state of a [`DerivedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Dirty,
    Clean,
}

/// Lazily computed value tied to the data it was derived from.
///
/// Only `invalidate` moves the cache to `Dirty` and only `get_or_compute`
/// moves it back to `Clean`, so mutation sites cannot forget a transition.
#[derive(Debug, Clone)]
pub struct DerivedCache<T> {
    cell: OnceCell<T>,
}

impl<T> Default for DerivedCache<T> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }
}

impl<T> DerivedCache<T> {
    #[must_use]
    pub fn state(&self) -> CacheState {
        if self.cell.get().is_some() {
            CacheState::Clean
        } else {
            CacheState::Dirty
        }
    }

    pub fn invalidate(&mut self) {
        self.cell.take();
    }

    pub fn get_or_compute(&self, compute: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(compute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_between_dirty_and_clean() {
        let mut cache = DerivedCache::<u32>::default();
        assert_eq!(cache.state(), CacheState::Dirty);

        assert_eq!(*cache.get_or_compute(|| 7), 7);
        assert_eq!(cache.state(), CacheState::Clean);
        assert_eq!(*cache.get_or_compute(|| 9), 7);

        cache.invalidate();
        assert_eq!(cache.state(), CacheState::Dirty);
        assert_eq!(*cache.get_or_compute(|| 9), 9);
    }
}
