use alloc::{sync::Arc, vec::Vec};

use crate::slice::Slice;

/// Cumulation cursor over one connection's received bytes.
///
/// The transport appends every arriving chunk with [`ByteCursor::feed`]; the
/// decoder consumes through the read methods, none of which block. Reads
/// follow a peek-then-consume discipline: a caller inspects
/// [`ByteCursor::peekable`] (or [`ByteCursor::peek_byte`]) and only advances
/// once it knows a whole field is present, so a decode attempt interrupted by
/// missing input leaves the cursor exactly where the attempt began.
///
/// [`ByteCursor::read_slice`] hands out zero copy [`Slice`] views sharing the
/// cursor's storage. Consumed bytes are reclaimed on the next `feed`; while
/// outstanding slices pin the current storage, `feed` starts a fresh
/// generation instead and carries over only the unread tail.
#[derive(Debug)]
pub struct ByteCursor {
    storage: Arc<Vec<u8>>,
    read: usize,
}

impl Default for ByteCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteCursor {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Vec::new()),
            read: 0,
        }
    }

    /// Appends freshly received bytes behind whatever is still unread.
    pub fn feed(&mut self, bytes: &[u8]) {
        match Arc::get_mut(&mut self.storage) {
            Some(storage) => {
                if self.read > 0 {
                    storage.drain(..self.read);
                    self.read = 0;
                }
                storage.extend_from_slice(bytes);
            }
            None => {
                // Outstanding slices pin this storage; start a new generation
                // with the unread tail.
                let mut next = Vec::with_capacity(self.readable() + bytes.len());
                next.extend_from_slice(&self.storage[self.read..]);
                next.extend_from_slice(bytes);
                self.storage = Arc::new(next);
                self.read = 0;
            }
        }
    }

    /// Number of bytes available to read right now.
    pub fn readable(&self) -> usize {
        self.storage.len() - self.read
    }

    /// The unread bytes, without consuming them.
    pub fn peekable(&self) -> &[u8] {
        &self.storage[self.read..]
    }

    pub fn peek_byte(&self) -> Option<u8> {
        self.peekable().first().copied()
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.read += 1;
        Some(byte)
    }

    /// Consumes `count` bytes previously seen through [`ByteCursor::peekable`].
    pub fn skip(&mut self, count: usize) {
        self.read += count.min(self.readable());
    }

    /// Drops everything currently readable.
    pub fn skip_all(&mut self) {
        self.read = self.storage.len();
    }

    /// Takes the next `len` bytes as a zero copy [`Slice`], or `None` when
    /// fewer are available.
    pub fn read_slice(&mut self, len: usize) -> Option<Slice> {
        if len > self.readable() {
            return None;
        }
        let start = self.read;
        self.read += len;
        Some(Slice::shared(Arc::clone(&self.storage), start, start + len))
    }

    /// An empty slice for the zero length payload path.
    pub fn empty_slice(&self) -> Slice {
        Slice::from(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_and_read() {
        let mut cursor = ByteCursor::new();
        assert_eq!(cursor.readable(), 0);
        assert_eq!(cursor.peek_byte(), None);
        assert_eq!(cursor.read_byte(), None);

        cursor.feed(&[1, 2, 3]);
        assert_eq!(cursor.readable(), 3);
        assert_eq!(cursor.peek_byte(), Some(1));
        assert_eq!(cursor.read_byte(), Some(1));
        assert_eq!(cursor.peekable(), &[2, 3]);
    }

    #[test]
    fn test_skip_bounds() {
        let mut cursor = ByteCursor::new();
        cursor.feed(&[1, 2]);
        cursor.skip(10);
        assert_eq!(cursor.readable(), 0);
    }

    #[test]
    fn test_read_slice_is_zero_copy() {
        let mut cursor = ByteCursor::new();
        cursor.feed(b"abcdef");
        cursor.skip(1);
        let slice = cursor.read_slice(3).unwrap();
        assert_eq!(slice.as_ref(), b"bcd");
        assert_eq!(slice.ref_count(), 1);
        assert_eq!(cursor.peekable(), b"ef");
    }

    #[test]
    fn test_read_slice_insufficient() {
        let mut cursor = ByteCursor::new();
        cursor.feed(&[1, 2]);
        assert!(cursor.read_slice(3).is_none());
        // Nothing consumed by the failed attempt.
        assert_eq!(cursor.readable(), 2);
    }

    #[test]
    fn test_feed_reclaims_consumed_prefix() {
        let mut cursor = ByteCursor::new();
        cursor.feed(&[1, 2, 3]);
        cursor.skip(2);
        cursor.feed(&[4]);
        assert_eq!(cursor.peekable(), &[3, 4]);
    }

    #[test]
    fn test_outstanding_slice_survives_feed() {
        let mut cursor = ByteCursor::new();
        cursor.feed(b"xyzab");
        let slice = cursor.read_slice(3).unwrap();
        cursor.feed(b"cd");
        // The slice still sees its generation; the cursor moved on.
        assert_eq!(slice.as_ref(), b"xyz");
        assert_eq!(cursor.peekable(), b"abcd");
    }

    #[test]
    fn test_empty_slice() {
        let cursor = ByteCursor::new();
        let slice = cursor.empty_slice();
        assert!(slice.is_empty());
    }
}
