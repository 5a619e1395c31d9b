use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_buffer_id() -> u64 {
	NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed)
}

/**
Detached read-only handle to `[start, end)` of a buffer's data.

Unlike a plain `&[u8]` borrowed from the buffer, a `View` does not hold the buffer borrowed,
so it can be stored next to the buffer and resolved later with
[`ByteBuffer::view()`](crate::ByteBuffer::view).
Resolution fails with [`Error::InvalidView`](crate::Error::InvalidView)
once the buffer has moved its bytes around (grown, compacted, or been cleared),
or if the view is presented to a different buffer.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct View {
	pub(crate) owner: u64,
	pub(crate) generation: u64,
	pub(crate) start: usize,
	pub(crate) end: usize,
}

impl View {
	pub fn start(&self) -> usize {
		self.start
	}
	pub fn end(&self) -> usize {
		self.end
	}
	pub fn len(&self) -> usize {
		self.end - self.start
	}
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}
}
