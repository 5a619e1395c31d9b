use quick_error::quick_error;
use std::str::Utf8Error;

quick_error! {
	/// Everything that can go wrong while touching a [`ByteBuffer`](crate::ByteBuffer).
	///
	/// None of these are fatal: a failed operation leaves the buffer exactly as it was.
	#[derive(Debug, Clone, PartialEq, Eq)]
	pub enum Error {
		/// A read asked for more bytes than there are between the read cursor and the end of data
		BufferUnderflow { requested: usize, remaining: usize } {
			display("buffer underflow: {} bytes requested, {} remaining", requested, remaining)
		}
		/// Growth policy refused to make room (fixed-size storage, overflow, or allocation failure)
		CapacityExceeded { required: usize, capacity: usize } {
			display("capacity exceeded: {} bytes required, capacity is {}", required, capacity)
		}
		/// An absolute access fell outside `[0, limit)`
		IndexOutOfRange { offset: usize, width: usize, limit: usize } {
			display("index out of range: {} bytes at offset {}, limit is {}", width, offset, limit)
		}
		/// Length prefix claims more bytes than the buffer holds
		MalformedLength { declared: u64, remaining: usize } {
			display("malformed length prefix: {} bytes declared, {} remaining", declared, remaining)
		}
		/// View was taken from another buffer, or its buffer has moved its bytes since
		InvalidView {
			display("view is no longer valid for this buffer")
		}
		/// Mutation attempted on borrowed read-only storage
		ReadOnly {
			display("buffer storage is read-only")
		}
		InvalidUtf8(err: Utf8Error) {
			from()
			cause(err)
			display("string is not valid UTF-8: {}", err)
		}
		/// Blob is too long to be described by the configured length prefix
		LengthOverflow { len: usize, max: u64 } {
			display("length {} does not fit the length prefix (max {})", len, max)
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display() {
		let err = Error::BufferUnderflow { requested: 4, remaining: 1 };
		assert_eq!(err.to_string(), "buffer underflow: 4 bytes requested, 1 remaining");

		let err = Error::MalformedLength { declared: 5, remaining: 2 };
		assert!(err.to_string().contains("5 bytes declared"));
	}

	#[test]
	fn utf8_conversion() {
		let bad = [0xffu8, 0xfe];
		let err: Error = std::str::from_utf8(&bad).unwrap_err().into();
		match err {
			Error::InvalidUtf8(_) => {},
			other => panic!("unexpected {:?}", other),
		}
	}
}
