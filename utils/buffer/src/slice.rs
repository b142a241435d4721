use alloc::{sync::Arc, vec::Vec};
use core::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Acquire/release counter shared by every handle onto one payload slice.
///
/// The count tracks protocol level ownership, not memory: storage is freed by
/// the backing [`Arc`] once the last handle drops, while this counter is what
/// makes the one-release-per-acquire contract observable and a double release
/// detectable.
#[derive(Clone, Debug)]
pub struct SharedState(Arc<AtomicUsize>);

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    pub fn new() -> Self {
        Self(Arc::new(AtomicUsize::new(1)))
    }

    #[inline(always)]
    pub fn load(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    fn acquire(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    fn release(&self) -> Result<(), ReleaseError> {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(1)
            })
            .map(|_| ())
            .map_err(|_| ReleaseError::AlreadyReleased)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseError {
    AlreadyReleased,
}

impl fmt::Display for ReleaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseError::AlreadyReleased => {
                write!(f, "slice handle released more than once")
            }
        }
    }
}

/// A reference counted view into shared byte storage.
///
/// The decoder emits payloads as slices over the cursor's storage without
/// copying them; applications build outbound payloads with [`From<Vec<u8>>`].
/// Every handle must be released exactly once, either explicitly through
/// [`Slice::release`] or implicitly on drop. [`Slice::retain`] is the only
/// way to create an additional handle.
#[derive(Debug)]
pub struct Slice {
    storage: Arc<Vec<u8>>,
    start: usize,
    end: usize,
    shared_state: SharedState,
    released: bool,
}

impl Slice {
    pub(crate) fn shared(storage: Arc<Vec<u8>>, start: usize, end: usize) -> Self {
        Self {
            storage,
            start,
            end,
            shared_state: SharedState::new(),
            released: false,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current number of unreleased handles onto this slice.
    pub fn ref_count(&self) -> usize {
        self.shared_state.load()
    }

    /// Acquires an additional handle onto the same bytes.
    pub fn retain(&self) -> Self {
        self.shared_state.acquire();
        Self {
            storage: Arc::clone(&self.storage),
            start: self.start,
            end: self.end,
            shared_state: self.shared_state.clone(),
            released: false,
        }
    }

    /// Releases this handle's hold on the bytes.
    ///
    /// A second release of the same handle reports
    /// [`ReleaseError::AlreadyReleased`] instead of corrupting the count.
    pub fn release(&mut self) -> Result<(), ReleaseError> {
        if self.released {
            return Err(ReleaseError::AlreadyReleased);
        }
        self.shared_state.release()?;
        self.released = true;
        Ok(())
    }
}

impl AsRef<[u8]> for Slice {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        &self.storage[self.start..self.end]
    }
}

impl Drop for Slice {
    fn drop(&mut self) {
        if !self.released {
            // The count never underflows here: an unreleased handle always
            // still holds its acquisition.
            let _ = self.shared_state.release();
        }
    }
}

impl From<Vec<u8>> for Slice {
    fn from(v: Vec<u8>) -> Self {
        let end = v.len();
        Self::shared(Arc::new(v), 0, end)
    }
}

/// Content equality; handles over different storage compare equal when the
/// bytes do.
impl PartialEq for Slice {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}

impl Eq for Slice {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_fresh_slice_has_count_one() {
        let slice = Slice::from(vec![1, 2, 3]);
        assert_eq!(slice.ref_count(), 1);
        assert_eq!(slice.as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn test_retain_and_release() {
        let mut first = Slice::from(vec![9; 4]);
        let mut second = first.retain();
        assert_eq!(first.ref_count(), 2);
        assert_eq!(second.as_ref(), first.as_ref());

        assert_eq!(first.release(), Ok(()));
        assert_eq!(second.ref_count(), 1);
        assert_eq!(second.release(), Ok(()));
        assert_eq!(second.ref_count(), 0);
    }

    #[test]
    fn test_double_release_is_an_error() {
        let mut slice = Slice::from(vec![1]);
        assert_eq!(slice.release(), Ok(()));
        assert_eq!(slice.release(), Err(ReleaseError::AlreadyReleased));
    }

    #[test]
    fn test_drop_releases() {
        let first = Slice::from(vec![7]);
        let second = first.retain();
        drop(first);
        assert_eq!(second.ref_count(), 1);
    }

    #[test]
    fn test_empty_slice() {
        let slice = Slice::from(Vec::new());
        assert!(slice.is_empty());
        assert_eq!(slice.len(), 0);
        assert_eq!(slice.ref_count(), 1);
    }
}
