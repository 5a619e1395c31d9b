use crate::Result;

/**
This trait abstracts the byte region behind a [`ByteBuffer`](crate::ByteBuffer)
from where those bytes actually live.

The region is always fully initialized and exactly `capacity()` bytes long;
the buffer keeps track of which part of it is meaningful.

## Example usage

```
use byte_buffer::{ByteBuffer, Error};

# fn main() -> Result<(), Error> {
// owned, growable
let mut owned = ByteBuffer::with_capacity(2);
owned.put_u32(7)?;

// borrowed and writable, but stuck at its size
let mut scratch = [0u8; 2];
let mut fixed = ByteBuffer::wrap_mut(&mut scratch[..]);
fixed.clear();
assert!(fixed.put_u32(7).is_err());

// borrowed and read-only
let bytes = [0, 0, 0, 7];
let mut ro = ByteBuffer::wrap_borrowed(&bytes[..]);
assert_eq!(ro.get_u32()?, 7);
assert_eq!(ro.put_u8(1), Err(Error::ReadOnly));
# Ok(())
# }
```
*/
pub trait Storage {
	/// Whole region, `capacity()` bytes
	fn as_slice(&self) -> &[u8];
	/**
	Whole region for writing.

	Fails with [`Error::ReadOnly`](crate::Error::ReadOnly) if these bytes cannot be modified.
	*/
	fn as_mut_slice(&mut self) -> Result<&mut [u8]>;
	/**
	Reallocate so that region is exactly `capacity` bytes long, keeping its current content.

	Never called with `capacity` less than the current one.
	Storage that cannot move fails with [`Error::CapacityExceeded`](crate::Error::CapacityExceeded).
	*/
	fn grow_to(&mut self, capacity: usize) -> Result<()>;
	fn capacity(&self) -> usize {
		self.as_slice().len()
	}
}

mod vec;
mod slice;
