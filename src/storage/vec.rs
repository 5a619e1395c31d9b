use crate::{Error, Result};
use super::Storage;

/*
Vec's own len is our capacity:
the whole thing is zero-initialized up front,
and the buffer decides which part of it holds data.
Vec's spare capacity is never touched.
*/
impl Storage for Vec<u8> {
	fn as_slice(&self) -> &[u8] {
		&self[..]
	}
	fn as_mut_slice(&mut self) -> Result<&mut [u8]> {
		Ok(&mut self[..])
	}
	fn grow_to(&mut self, capacity: usize) -> Result<()> {
		let current = self.len();
		if capacity <= current {
			return Ok(());
		}
		// report allocation failure instead of aborting
		self.try_reserve_exact(capacity - current)
			.map_err(|_| Error::CapacityExceeded { required: capacity, capacity: current })?;
		self.resize(capacity, 0);
		Ok(())
	}
}
