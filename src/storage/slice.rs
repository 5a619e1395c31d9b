use crate::{Error, Result};
use super::Storage;

/*
Borrowed regions: the lifetime on the slice is what keeps the source alive
for as long as the buffer wrapping it, so neither of these can ever move.
*/

impl<'a> Storage for &'a mut [u8] {
	fn as_slice(&self) -> &[u8] {
		&**self
	}
	fn as_mut_slice(&mut self) -> Result<&mut [u8]> {
		Ok(&mut **self)
	}
	fn grow_to(&mut self, capacity: usize) -> Result<()> {
		Err(Error::CapacityExceeded { required: capacity, capacity: self.len() })
	}
}

impl<'a> Storage for &'a [u8] {
	fn as_slice(&self) -> &[u8] {
		self
	}
	fn as_mut_slice(&mut self) -> Result<&mut [u8]> {
		Err(Error::ReadOnly)
	}
	fn grow_to(&mut self, capacity: usize) -> Result<()> {
		Err(Error::CapacityExceeded { required: capacity, capacity: self.len() })
	}
}
