/*!
Growable byte buffer with independent read and write cursors.

Values go in at the write cursor and come out at the read cursor,
encoded in the buffer's current [`ByteOrder`].
Every access is bounds-checked and reports a specific [`Error`] instead of panicking,
and a failed operation leaves the buffer untouched.

```
use byte_buffer::{ByteBuffer, ByteOrder};

# fn main() -> Result<(), byte_buffer::Error> {
let mut buf = ByteBuffer::with_capacity(4);
buf.put_u16(0x1234)?;
buf.put_string("hi")?;
assert_eq!(buf.as_bytes(), &[0x12, 0x34, 0, 0, 0, 2, b'h', b'i']);

assert_eq!(buf.get_u16()?, 0x1234);
assert_eq!(buf.get_string()?, "hi");

buf.set_byte_order(ByteOrder::Little);
buf.put_u32(1)?;
assert_eq!(buf.get_u32_at(8)?, 1);
assert_eq!(buf.readable(), &[1, 0, 0, 0]);
# Ok(())
# }
```

A C interface to the owned variant lives in [`ffi`].
*/

use std::fmt;
use std::io;

use copy_in_place::copy_in_place;
use memchr::memchr;
use tracing::{debug, trace};

mod error;
pub use error::{Error, Result};

mod growth;
pub use growth::{Growth, DEFAULT_GROWTH_FLOOR};

mod order;
pub use order::{ByteOrder, LengthPrefix, Primitive};

mod storage;
pub use storage::Storage;

mod view;
pub use view::View;

mod typed;

pub mod ffi;

/// Capacity of buffers created without an explicit one
pub const DEFAULT_CAPACITY: usize = 8192;
/// Byte order of new buffers, unless configured otherwise
pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::Big;
/// Width of length headers in front of strings and blobs, unless configured otherwise
pub const DEFAULT_LENGTH_PREFIX: LengthPrefix = LengthPrefix::U32;

/**
Byte region with a read cursor, a write cursor, and a notion of how much of it holds data.

```text
|rrrrwwww      |
 |   |   |     |capacity
 |   |   |len
 |   |read_position
 |0
```

At all times `read_position <= len <= capacity` and `write_position <= capacity`.
Writing past `len` moves `len` along; if the write starts past `len`,
bytes in between are zeroed first.

`S` is where the bytes live; see [`Storage`].
*/
pub struct ByteBuffer<S = Vec<u8>> {
	storage: S,
	len: usize,
	read_pos: usize,
	write_pos: usize,
	order: ByteOrder,
	growth: Growth,
	prefix: LengthPrefix,
	id: u64,
	// bumped whenever bytes move; see View
	generation: u64,
}

pub struct ByteBufferBuilder {
	capacity: usize,
	order: ByteOrder,
	growth: Growth,
	prefix: LengthPrefix,
}
impl ByteBufferBuilder {
	pub fn new() -> Self {
		ByteBufferBuilder {
			capacity: DEFAULT_CAPACITY,
			order: DEFAULT_BYTE_ORDER,
			growth: Growth::default(),
			prefix: DEFAULT_LENGTH_PREFIX,
		}
	}

	pub fn capacity(mut self, capacity: usize) -> Self {
		self.capacity = capacity;
		self
	}

	pub fn byte_order(mut self, order: ByteOrder) -> Self {
		self.order = order;
		self
	}

	pub fn growth(mut self, growth: Growth) -> Self {
		self.growth = growth;
		self
	}

	pub fn length_prefix(mut self, prefix: LengthPrefix) -> Self {
		self.prefix = prefix;
		self
	}

	/// Empty owned buffer
	pub fn create(self) -> ByteBuffer {
		let storage = vec![0; self.capacity];
		self.assemble(storage, 0)
	}

	/// Owned buffer holding a copy of `bytes`, write cursor right after them
	pub fn wrap(self, bytes: &[u8]) -> ByteBuffer {
		self.assemble(bytes.to_vec(), bytes.len())
	}

	/// Read-only buffer over `bytes`, without copying
	pub fn wrap_borrowed(self, bytes: &[u8]) -> ByteBuffer<&[u8]> {
		let len = bytes.len();
		self.growth(Growth::Fixed).assemble(bytes, len)
	}

	/// Writable buffer over `bytes`, without copying; it can never outgrow `bytes`
	pub fn wrap_mut(self, bytes: &mut [u8]) -> ByteBuffer<&mut [u8]> {
		let len = bytes.len();
		self.growth(Growth::Fixed).assemble(bytes, len)
	}

	/**
	Buffer over any [`Storage`], whose first `len` bytes are taken as data.

	Fails with [`Error::IndexOutOfRange`] if `len` exceeds the storage's capacity.
	*/
	pub fn with_storage<S: Storage>(self, storage: S, len: usize) -> Result<ByteBuffer<S>> {
		let capacity = storage.capacity();
		if len > capacity {
			return Err(Error::IndexOutOfRange { offset: 0, width: len, limit: capacity });
		}
		Ok(self.assemble(storage, len))
	}

	fn assemble<S: Storage>(self, storage: S, len: usize) -> ByteBuffer<S> {
		ByteBuffer {
			storage,
			len,
			read_pos: 0,
			write_pos: len,
			order: self.order,
			growth: self.growth,
			prefix: self.prefix,
			id: view::next_buffer_id(),
			generation: 0,
		}
	}
}
impl Default for ByteBufferBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ByteBuffer {
	pub fn new() -> Self {
		ByteBufferBuilder::new().create()
	}

	/// Empty buffer with room for `capacity` bytes, both cursors at 0
	pub fn with_capacity(capacity: usize) -> Self {
		ByteBufferBuilder::new()
			.capacity(capacity)
			.create()
	}

	/// Buffer owning a copy of `bytes`; reading starts at 0, writing continues after them
	pub fn wrap(bytes: &[u8]) -> Self {
		ByteBufferBuilder::new().wrap(bytes)
	}

	/// Data part of the buffer, `[0, len)`
	pub fn into_vec(mut self) -> Vec<u8> {
		self.storage.truncate(self.len);
		self.storage
	}
}
impl Default for ByteBuffer {
	fn default() -> Self {
		Self::new()
	}
}

impl<'a> ByteBuffer<&'a [u8]> {
	/// Read-only buffer over `bytes`; puts fail with [`Error::ReadOnly`]
	pub fn wrap_borrowed(bytes: &'a [u8]) -> Self {
		ByteBufferBuilder::new().wrap_borrowed(bytes)
	}
}

impl<'a> ByteBuffer<&'a mut [u8]> {
	/**
	Writable buffer over `bytes`, with all of them taken as data.

	Capacity is fixed at `bytes.len()`; call [`clear()`](#method.clear) to use it as scratch space.
	*/
	pub fn wrap_mut(bytes: &'a mut [u8]) -> Self {
		ByteBufferBuilder::new().wrap_mut(bytes)
	}
}

impl<S: Storage> ByteBuffer<S> {
	pub fn byte_order(&self) -> ByteOrder {
		self.order
	}
	/// Affects everything encoded or decoded from now on; bytes already written stay as they are.
	pub fn set_byte_order(&mut self, order: ByteOrder) {
		self.order = order;
	}
	pub fn growth(&self) -> Growth {
		self.growth
	}
	pub fn set_growth(&mut self, growth: Growth) {
		self.growth = growth;
	}
	pub fn length_prefix(&self) -> LengthPrefix {
		self.prefix
	}
	pub fn set_length_prefix(&mut self, prefix: LengthPrefix) {
		self.prefix = prefix;
	}

	/// Number of bytes holding data
	pub fn len(&self) -> usize {
		self.len
	}
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}
	pub fn capacity(&self) -> usize {
		self.storage.capacity()
	}
	/// Bytes left between the read cursor and the end of data
	pub fn remaining(&self) -> usize {
		self.len - self.read_pos
	}
	pub fn read_position(&self) -> usize {
		self.read_pos
	}
	pub fn write_position(&self) -> usize {
		self.write_pos
	}
	pub fn set_read_position(&mut self, pos: usize) -> Result<()> {
		if pos > self.len {
			return Err(Error::IndexOutOfRange { offset: pos, width: 0, limit: self.len });
		}
		self.read_pos = pos;
		Ok(())
	}
	pub fn set_write_position(&mut self, pos: usize) -> Result<()> {
		let capacity = self.capacity();
		if pos > capacity {
			return Err(Error::IndexOutOfRange { offset: pos, width: 0, limit: capacity });
		}
		self.write_pos = pos;
		Ok(())
	}

	/// All data, `[0, len)`
	pub fn as_bytes(&self) -> &[u8] {
		&self.storage.as_slice()[ .. self.len ]
	}
	/// Data not read yet, `[read_position, len)`
	pub fn readable(&self) -> &[u8] {
		&self.storage.as_slice()[ self.read_pos .. self.len ]
	}

	/**
	Make sure the buffer can hold at least `required` bytes, growing it per its [`Growth`] policy.

	Existing content is preserved; capacity never shrinks.
	Outstanding [`View`]s are invalidated if storage had to be reallocated.
	*/
	pub fn ensure_capacity(&mut self, required: usize) -> Result<()> {
		let capacity = self.capacity();
		if required <= capacity {
			return Ok(());
		}
		let new_capacity = match self.growth.next_capacity(capacity, required) {
			Some(new_capacity) => new_capacity,
			None => {
				debug!(target: "byte_buffer", capacity, required, fixed = self.growth.is_fixed(), "growth refused");
				return Err(Error::CapacityExceeded { required, capacity });
			},
		};
		self.storage.grow_to(new_capacity)?;
		self.generation = self.generation.wrapping_add(1);
		trace!(target: "byte_buffer", from = capacity, to = new_capacity, "grew");
		Ok(())
	}

	/*
	before:
	|xxxxyyy   |
	     |  |len
	     |read_position

	after:
	|yyy       |
	 |  |len
	 |read_position
	*/
	/**
	Drop everything before the read cursor, moving unread bytes to the front.

	No reallocation happens. Both cursors and `len` shift back by the same amount
	(the write cursor stops at 0). Outstanding [`View`]s are invalidated.
	*/
	pub fn compact(&mut self) -> Result<()> {
		let consumed = self.read_pos;
		if consumed == 0 {
			return Ok(());
		}
		let len = self.len;
		copy_in_place(self.storage.as_mut_slice()?, consumed..len, 0);
		self.len -= consumed;
		self.write_pos = self.write_pos.saturating_sub(consumed);
		self.read_pos = 0;
		self.generation = self.generation.wrapping_add(1);
		debug!(target: "byte_buffer", consumed, len = self.len, "compacted");
		Ok(())
	}

	/// Forget all data and rewind both cursors; capacity stays for reuse.
	pub fn clear(&mut self) {
		self.len = 0;
		self.read_pos = 0;
		self.write_pos = 0;
		self.generation = self.generation.wrapping_add(1);
	}

	/// Handle to `[start, end)` of the data; see [`View`].
	pub fn slice(&self, start: usize, end: usize) -> Result<View> {
		if start > end || end > self.len {
			return Err(Error::IndexOutOfRange {
				offset: start,
				width: end.saturating_sub(start),
				limit: self.len,
			});
		}
		Ok(View {
			owner: self.id,
			generation: self.generation,
			start, end,
		})
	}

	/// Bytes behind `view`, if it still refers to this buffer as it is now.
	pub fn view(&self, view: &View) -> Result<&[u8]> {
		if view.owner != self.id || view.generation != self.generation || view.end > self.len {
			return Err(Error::InvalidView);
		}
		Ok(&self.storage.as_slice()[ view.start .. view.end ])
	}

	/// Write `value` at the write cursor and advance it by `T::WIDTH`
	pub fn put<T: Primitive>(&mut self, value: T) -> Result<()> {
		let (start, end) = self.reserve(T::WIDTH)?;
		let order = self.order;
		order::encode(order, value, self.region_mut(start, end)?);
		self.advance_write(start, end);
		Ok(())
	}

	/// Read a `T` at the read cursor and advance it by `T::WIDTH`
	pub fn get<T: Primitive>(&mut self) -> Result<T> {
		let order = self.order;
		self.take(T::WIDTH).map(|src| order::decode(order, src))
	}

	/// Like [`get()`](#method.get), but leaves the read cursor where it is
	pub fn peek<T: Primitive>(&self) -> Result<T> {
		self.peek_bytes(T::WIDTH).map(|src| order::decode(self.order, src))
	}

	/// Write `value` at `offset` without touching cursors; never grows the buffer
	pub fn put_at<T: Primitive>(&mut self, offset: usize, value: T) -> Result<()> {
		let end = self.reserve_at(offset, T::WIDTH)?;
		let order = self.order;
		order::encode(order, value, self.region_mut(offset, end)?);
		self.extend_len(offset, end);
		Ok(())
	}

	/// Read a `T` at `offset` without touching cursors
	pub fn get_at<T: Primitive>(&self, offset: usize) -> Result<T> {
		self.region(offset, T::WIDTH).map(|src| order::decode(self.order, src))
	}

	/// Write all of `values` back to back; either all of them make it, or none
	pub fn put_slice<T: Primitive>(&mut self, values: &[T]) -> Result<()> {
		let width = self.write_span::<T>(values.len())?;
		let (start, end) = self.reserve(width)?;
		let order = self.order;
		order::encode_all(order, values, self.region_mut(start, end)?);
		self.advance_write(start, end);
		Ok(())
	}

	/// Write `value` `count` times
	pub fn put_repeated<T: Primitive>(&mut self, value: T, count: usize) -> Result<()> {
		let width = self.write_span::<T>(count)?;
		let (start, end) = self.reserve(width)?;
		let order = self.order;
		for chunk in self.region_mut(start, end)?.chunks_exact_mut(T::WIDTH) {
			order::encode(order, value, chunk);
		}
		self.advance_write(start, end);
		Ok(())
	}

	/// Fill `out` with values read back to back; nothing is consumed unless all of them are there
	pub fn get_into<T: Primitive>(&mut self, out: &mut [T]) -> Result<()> {
		let remaining = self.remaining();
		let width = T::WIDTH.checked_mul(out.len())
			.ok_or(Error::BufferUnderflow { requested: usize::MAX, remaining })?;
		let order = self.order;
		let src = self.take(width)?;
		order::decode_all(order, src, out);
		Ok(())
	}

	pub fn put_slice_at<T: Primitive>(&mut self, offset: usize, values: &[T]) -> Result<()> {
		let width = T::WIDTH.checked_mul(values.len())
			.ok_or(Error::IndexOutOfRange { offset, width: usize::MAX, limit: self.capacity() })?;
		let end = self.reserve_at(offset, width)?;
		let order = self.order;
		order::encode_all(order, values, self.region_mut(offset, end)?);
		self.extend_len(offset, end);
		Ok(())
	}

	/// Write `value` `count` times starting at `offset`; never grows the buffer
	pub fn put_repeated_at<T: Primitive>(&mut self, offset: usize, value: T, count: usize) -> Result<()> {
		let width = T::WIDTH.checked_mul(count)
			.ok_or(Error::IndexOutOfRange { offset, width: usize::MAX, limit: self.capacity() })?;
		let end = self.reserve_at(offset, width)?;
		let order = self.order;
		for chunk in self.region_mut(offset, end)?.chunks_exact_mut(T::WIDTH) {
			order::encode(order, value, chunk);
		}
		self.extend_len(offset, end);
		Ok(())
	}

	pub fn get_into_at<T: Primitive>(&self, offset: usize, out: &mut [T]) -> Result<()> {
		let width = T::WIDTH.checked_mul(out.len())
			.ok_or(Error::IndexOutOfRange { offset, width: usize::MAX, limit: self.len })?;
		order::decode_all(self.order, self.region(offset, width)?, out);
		Ok(())
	}

	pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		let (start, end) = self.reserve(bytes.len())?;
		self.region_mut(start, end)?.copy_from_slice(bytes);
		self.advance_write(start, end);
		Ok(())
	}

	/// Next `n` bytes at the read cursor, without copying
	pub fn get_bytes(&mut self, n: usize) -> Result<&[u8]> {
		self.take(n)
	}

	pub fn put_bytes_at(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
		let end = self.reserve_at(offset, bytes.len())?;
		self.region_mut(offset, end)?.copy_from_slice(bytes);
		self.extend_len(offset, end);
		Ok(())
	}

	pub fn get_bytes_at(&self, offset: usize, n: usize) -> Result<&[u8]> {
		self.region(offset, n)
	}

	/**
	Write `bytes` preceded by their length, encoded as configured by [`LengthPrefix`].

	Fails with [`Error::LengthOverflow`] if the length does not fit the prefix.
	*/
	pub fn put_blob(&mut self, bytes: &[u8]) -> Result<()> {
		let prefix = self.prefix;
		if bytes.len() as u64 > prefix.max() {
			return Err(Error::LengthOverflow { len: bytes.len(), max: prefix.max() });
		}
		let header = prefix.width();
		let total = header.checked_add(bytes.len())
			.ok_or(Error::CapacityExceeded { required: usize::MAX, capacity: self.capacity() })?;
		let (start, end) = self.reserve(total)?;
		let order = self.order;
		let dst = self.region_mut(start, end)?;
		order::write_ordered(order, bytes.len() as u64, &mut dst[ .. header ]);
		dst[ header .. ].copy_from_slice(bytes);
		self.advance_write(start, end);
		Ok(())
	}

	/**
	Read a length-prefixed run of bytes, as written by [`put_blob()`](#method.put_blob).

	Fails with [`Error::MalformedLength`] if the prefix claims more than what is left.
	*/
	pub fn get_blob(&mut self) -> Result<&[u8]> {
		let (header, body) = self.framed()?;
		self.read_pos += header;
		self.take(body)
	}

	pub fn put_string(&mut self, s: &str) -> Result<()> {
		self.put_blob(s.as_bytes())
	}

	/// Like [`get_blob()`](#method.get_blob); also fails with [`Error::InvalidUtf8`], consuming nothing
	pub fn get_string(&mut self) -> Result<&str> {
		let (header, body) = self.framed()?;
		let start = self.read_pos + header;
		let end = start + body;
		let s = std::str::from_utf8(&self.storage.as_slice()[ start .. end ])?;
		self.read_pos = end;
		Ok(s)
	}

	/// Offset of the next `delim`, relative to the read cursor
	pub fn find(&self, delim: u8) -> Option<usize> {
		memchr(delim, self.readable())
	}

	/**
	Bytes up to the next `delim`, which is consumed too but not returned.

	Returns `None` and consumes nothing if there's no `delim` in the unread data.
	*/
	pub fn get_until(&mut self, delim: u8) -> Option<&[u8]> {
		let n = self.find(delim)?;
		let start = self.read_pos;
		self.read_pos += n + 1;
		Some(&self.storage.as_slice()[ start .. start + n ])
	}

	// header width and body length of the blob at the read cursor, consuming nothing
	fn framed(&self) -> Result<(usize, usize)> {
		let header = self.prefix.width();
		let declared = order::read_ordered(self.order, self.peek_bytes(header)?);
		let remaining = self.remaining() - header;
		if declared > remaining as u64 {
			return Err(Error::MalformedLength { declared, remaining });
		}
		Ok((header, declared as usize))
	}

	fn write_span<T: Primitive>(&self, count: usize) -> Result<usize> {
		T::WIDTH.checked_mul(count)
			.ok_or(Error::CapacityExceeded { required: usize::MAX, capacity: self.capacity() })
	}

	// room for `width` bytes at the write cursor
	fn reserve(&mut self, width: usize) -> Result<(usize, usize)> {
		// read-only storage says so before growth gets a chance to complain
		self.storage.as_mut_slice()?;
		let start = self.write_pos;
		let end = start.checked_add(width)
			.ok_or(Error::CapacityExceeded { required: usize::MAX, capacity: self.capacity() })?;
		self.ensure_capacity(end)?;
		Ok((start, end))
	}

	fn reserve_at(&mut self, offset: usize, width: usize) -> Result<usize> {
		self.storage.as_mut_slice()?;
		let capacity = self.capacity();
		offset.checked_add(width)
			.filter(|&end| end <= capacity)
			.ok_or(Error::IndexOutOfRange { offset, width, limit: capacity })
	}

	// writable `[start, end)`, zeroing whatever lies between data and `start`;
	// an empty write leaves the gap alone
	fn region_mut(&mut self, start: usize, end: usize) -> Result<&mut [u8]> {
		let len = self.len;
		let bytes = self.storage.as_mut_slice()?;
		if start > len && end > start {
			for b in &mut bytes[ len .. start ] {
				*b = 0;
			}
		}
		Ok(&mut bytes[ start .. end ])
	}

	fn advance_write(&mut self, start: usize, end: usize) {
		self.write_pos = end;
		self.extend_len(start, end);
	}

	// only bytes actually written count as data
	fn extend_len(&mut self, start: usize, end: usize) {
		if end > start && end > self.len {
			self.len = end;
		}
	}

	fn peek_bytes(&self, width: usize) -> Result<&[u8]> {
		let remaining = self.remaining();
		if width > remaining {
			return Err(Error::BufferUnderflow { requested: width, remaining });
		}
		Ok(&self.storage.as_slice()[ self.read_pos .. self.read_pos + width ])
	}

	fn take(&mut self, width: usize) -> Result<&[u8]> {
		let remaining = self.remaining();
		if width > remaining {
			return Err(Error::BufferUnderflow { requested: width, remaining });
		}
		let start = self.read_pos;
		self.read_pos += width;
		Ok(&self.storage.as_slice()[ start .. start + width ])
	}

	fn region(&self, offset: usize, width: usize) -> Result<&[u8]> {
		let len = self.len;
		let end = offset.checked_add(width)
			.filter(|&end| end <= len)
			.ok_or(Error::IndexOutOfRange { offset, width, limit: len })?;
		Ok(&self.storage.as_slice()[ offset .. end ])
	}
}

impl<S: Storage + Clone> Clone for ByteBuffer<S> {
	// a clone is a different buffer as far as views are concerned
	fn clone(&self) -> Self {
		ByteBuffer {
			storage: self.storage.clone(),
			len: self.len,
			read_pos: self.read_pos,
			write_pos: self.write_pos,
			order: self.order,
			growth: self.growth,
			prefix: self.prefix,
			id: view::next_buffer_id(),
			generation: 0,
		}
	}
}

impl<S: Storage> fmt::Debug for ByteBuffer<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ByteBuffer")
			.field("len", &self.len)
			.field("capacity", &self.capacity())
			.field("read_position", &self.read_pos)
			.field("write_position", &self.write_pos)
			.field("byte_order", &self.order)
			.field("growth", &self.growth)
			.field("length_prefix", &self.prefix)
			.finish()
	}
}

/// Reads drain unread data, at most `buf.len()` bytes at a time
impl<S: Storage> io::Read for ByteBuffer<S> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let n = std::cmp::min(buf.len(), self.remaining());
		buf[ .. n ].copy_from_slice(self.take(n).map_err(into_io)?);
		Ok(n)
	}
}

/// Writes are all-or-nothing [`put_bytes()`](struct.ByteBuffer.html#method.put_bytes)
impl<S: Storage> io::Write for ByteBuffer<S> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.put_bytes(buf).map_err(into_io)?;
		Ok(buf.len())
	}
	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

fn into_io(err: Error) -> io::Error {
	let kind = match err {
		Error::BufferUnderflow { .. } => io::ErrorKind::UnexpectedEof,
		Error::CapacityExceeded { .. } => io::ErrorKind::WriteZero,
		Error::ReadOnly => io::ErrorKind::PermissionDenied,
		_ => io::ErrorKind::InvalidData,
	};
	io::Error::new(kind, err)
}
