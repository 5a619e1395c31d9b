/*!
C interface to owned buffers.

Buffers cross the boundary as opaque `*mut ByteBuffer` handles:
[`byte_buffer_new`] or [`byte_buffer_wrap`] hand one out,
and whoever holds it must give it back exactly once through [`byte_buffer_free`].

Nothing here panics or unwinds. Every fallible call returns a [`Status`];
values come back through out-pointers, and byte spans travel as pointer + length.
On any status other than [`Status::Ok`] the buffer is left as it was.

```c
ByteBuffer *buf = byte_buffer_new(64);
byte_buffer_put_u32(buf, 42);
uint32_t v;
if (byte_buffer_get_u32(buf, &v) != BYTE_BUFFER_OK) { ... }
byte_buffer_free(buf);
```
*/

use std::ffi::c_void;
use std::os::raw::c_char;
use std::{ptr, slice};

use crate::{ByteBuffer, ByteBufferBuilder, ByteOrder, Error, LengthPrefix, Primitive, Result, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub enum Status {
	Ok = 0,
	BufferUnderflow = 1,
	CapacityExceeded = 2,
	IndexOutOfRange = 3,
	MalformedLength = 4,
	InvalidView = 5,
	ReadOnly = 6,
	InvalidUtf8 = 7,
	LengthOverflow = 8,
	/// A required pointer argument was null
	NullPointer = 9,
	/// An enum-like argument (byte order, datatype, prefix width) had an unknown value
	InvalidArgument = 10,
}

impl Status {
	pub fn from_raw(raw: u32) -> Option<Self> {
		let status = match raw {
			0 => Status::Ok,
			1 => Status::BufferUnderflow,
			2 => Status::CapacityExceeded,
			3 => Status::IndexOutOfRange,
			4 => Status::MalformedLength,
			5 => Status::InvalidView,
			6 => Status::ReadOnly,
			7 => Status::InvalidUtf8,
			8 => Status::LengthOverflow,
			9 => Status::NullPointer,
			10 => Status::InvalidArgument,
			_ => return None,
		};
		Some(status)
	}

	fn message(self) -> &'static [u8] {
		match self {
			Status::Ok => b"ok\0",
			Status::BufferUnderflow => b"buffer underflow\0",
			Status::CapacityExceeded => b"capacity exceeded\0",
			Status::IndexOutOfRange => b"index out of range\0",
			Status::MalformedLength => b"malformed length prefix\0",
			Status::InvalidView => b"invalid view\0",
			Status::ReadOnly => b"buffer is read-only\0",
			Status::InvalidUtf8 => b"invalid UTF-8\0",
			Status::LengthOverflow => b"length does not fit the prefix\0",
			Status::NullPointer => b"null pointer\0",
			Status::InvalidArgument => b"invalid argument\0",
		}
	}
}

impl<'a> From<&'a Error> for Status {
	fn from(err: &'a Error) -> Self {
		match err {
			Error::BufferUnderflow { .. } => Status::BufferUnderflow,
			Error::CapacityExceeded { .. } => Status::CapacityExceeded,
			Error::IndexOutOfRange { .. } => Status::IndexOutOfRange,
			Error::MalformedLength { .. } => Status::MalformedLength,
			Error::InvalidView => Status::InvalidView,
			Error::ReadOnly => Status::ReadOnly,
			Error::InvalidUtf8(_) => Status::InvalidUtf8,
			Error::LengthOverflow { .. } => Status::LengthOverflow,
		}
	}
}

fn status(result: Result<()>) -> Status {
	match result {
		Ok(()) => Status::Ok,
		Err(err) => Status::from(&err),
	}
}

/**
Element types understood by the array functions; values are the tags used on the C side.

Functions taking two datatypes convert each element the way a C cast would:
integers narrow by truncation and widen by sign extension,
floats become integers rounding toward zero (saturating at the edges instead of being undefined),
integers become floats rounding to nearest.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Datatype {
	/// `int8_t`
	Byte = 0,
	/// `int16_t`
	Short = 1,
	/// `int32_t`
	Int = 2,
	/// `int64_t`
	Long = 3,
	Float = 4,
	Double = 5,
}

impl Datatype {
	pub fn from_raw(raw: u32) -> Option<Self> {
		match raw {
			0 => Some(Datatype::Byte),
			1 => Some(Datatype::Short),
			2 => Some(Datatype::Int),
			3 => Some(Datatype::Long),
			4 => Some(Datatype::Float),
			5 => Some(Datatype::Double),
			_ => None,
		}
	}

	pub fn width(self) -> usize {
		match self {
			Datatype::Byte => 1,
			Datatype::Short => 2,
			Datatype::Int | Datatype::Float => 4,
			Datatype::Long | Datatype::Double => 8,
		}
	}
}

// storage is allocated fallibly so that a silly capacity yields null instead of an abort
fn owned(bytes: &[u8], capacity: usize) -> *mut ByteBuffer {
	let mut storage = Vec::new();
	if Storage::grow_to(&mut storage, capacity).is_err() {
		return ptr::null_mut();
	}
	storage[ .. bytes.len() ].copy_from_slice(bytes);
	match ByteBufferBuilder::new().with_storage(storage, bytes.len()) {
		Ok(buf) => Box::into_raw(Box::new(buf)),
		Err(_) => ptr::null_mut(),
	}
}

/// Empty buffer with room for `capacity` bytes, or null if that much cannot be allocated.
#[no_mangle]
pub extern "C" fn byte_buffer_new(capacity: usize) -> *mut ByteBuffer {
	owned(&[], capacity)
}

/**
Buffer holding a copy of `len` bytes at `data`, or null on allocation failure.

# Safety

`data` must point to `len` readable bytes; it may be null only if `len` is 0.
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_wrap(data: *const u8, len: usize) -> *mut ByteBuffer {
	match input(data, len) {
		Some(bytes) => owned(bytes, len),
		None => ptr::null_mut(),
	}
}

/**
Release a buffer. Null is ignored.

# Safety

`buf` must come from [`byte_buffer_new`] or [`byte_buffer_wrap`] and not have been freed yet.
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_free(buf: *mut ByteBuffer) {
	if !buf.is_null() {
		drop(Box::from_raw(buf));
	}
}

/// Static, NUL-terminated description of a status code.
#[no_mangle]
pub extern "C" fn byte_buffer_status_message(status: u32) -> *const c_char {
	let message: &[u8] = match Status::from_raw(status) {
		Some(status) => status.message(),
		None => b"unknown status\0",
	};
	message.as_ptr() as *const c_char
}

// empty spans are allowed to come with a null (or dangling) pointer
unsafe fn input<'a>(data: *const u8, len: usize) -> Option<&'a [u8]> {
	if len == 0 {
		Some(&[])
	} else if data.is_null() {
		None
	} else {
		Some(slice::from_raw_parts(data, len))
	}
}

unsafe fn output<'a>(data: *mut u8, len: usize) -> Option<&'a mut [u8]> {
	if len == 0 {
		Some(&mut [])
	} else if data.is_null() {
		None
	} else {
		Some(slice::from_raw_parts_mut(data, len))
	}
}

macro_rules! with_buffer {
	($buf:ident, $body:expr) => {
		match $buf.as_mut() {
			Some($buf) => $body,
			None => return Status::NullPointer,
		}
	}
}

macro_rules! query {
	($($name:ident => $method:ident;)*) => {$(
		/// # Safety
		///
		/// `buf` must be a live handle or null; null yields 0.
		#[no_mangle]
		pub unsafe extern "C" fn $name(buf: *const ByteBuffer) -> usize {
			buf.as_ref().map_or(0, |buf| buf.$method())
		}
	)*}
}

query! {
	byte_buffer_len => len;
	byte_buffer_capacity => capacity;
	byte_buffer_remaining => remaining;
	byte_buffer_read_position => read_position;
	byte_buffer_write_position => write_position;
}

/// # Safety
///
/// `buf` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_set_read_position(buf: *mut ByteBuffer, pos: usize) -> Status {
	with_buffer!(buf, status(buf.set_read_position(pos)))
}

/// # Safety
///
/// `buf` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_set_write_position(buf: *mut ByteBuffer, pos: usize) -> Status {
	with_buffer!(buf, status(buf.set_write_position(pos)))
}

/// Set byte order: 1 for little-endian, 2 for big-endian.
///
/// # Safety
///
/// `buf` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_set_byte_order(buf: *mut ByteBuffer, order: u32) -> Status {
	with_buffer!(buf, match ByteOrder::from_raw(order) {
		Some(order) => {
			buf.set_byte_order(order);
			Status::Ok
		},
		None => Status::InvalidArgument,
	})
}

/// Current byte order tag, or 0 for a null handle.
///
/// # Safety
///
/// `buf` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_byte_order(buf: *const ByteBuffer) -> u32 {
	buf.as_ref().map_or(0, |buf| buf.byte_order() as u32)
}

/// Set width in bytes of string/blob length prefixes: 1, 2, 4 or 8.
///
/// # Safety
///
/// `buf` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_set_length_prefix(buf: *mut ByteBuffer, width: u32) -> Status {
	let prefix = match width {
		1 => LengthPrefix::U8,
		2 => LengthPrefix::U16,
		4 => LengthPrefix::U32,
		8 => LengthPrefix::U64,
		_ => return Status::InvalidArgument,
	};
	with_buffer!(buf, {
		buf.set_length_prefix(prefix);
		Status::Ok
	})
}

/// # Safety
///
/// `buf` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_ensure_capacity(buf: *mut ByteBuffer, capacity: usize) -> Status {
	with_buffer!(buf, status(buf.ensure_capacity(capacity)))
}

/// # Safety
///
/// `buf` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_compact(buf: *mut ByteBuffer) -> Status {
	with_buffer!(buf, status(buf.compact()))
}

/// # Safety
///
/// `buf` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_clear(buf: *mut ByteBuffer) -> Status {
	with_buffer!(buf, {
		buf.clear();
		Status::Ok
	})
}

macro_rules! scalars {
	($($t:ty: $put:ident $get:ident $put_at:ident $get_at:ident;)*) => {$(
		/// # Safety
		///
		/// `buf` must be a live handle or null.
		#[no_mangle]
		pub unsafe extern "C" fn $put(buf: *mut ByteBuffer, value: $t) -> Status {
			with_buffer!(buf, status(buf.put::<$t>(value)))
		}

		/// # Safety
		///
		/// `buf` must be a live handle or null; `out` must be writable or null.
		#[no_mangle]
		pub unsafe extern "C" fn $get(buf: *mut ByteBuffer, out: *mut $t) -> Status {
			let out = match out.as_mut() {
				Some(out) => out,
				None => return Status::NullPointer,
			};
			with_buffer!(buf, match buf.get::<$t>() {
				Ok(value) => {
					*out = value;
					Status::Ok
				},
				Err(err) => Status::from(&err),
			})
		}

		/// # Safety
		///
		/// `buf` must be a live handle or null.
		#[no_mangle]
		pub unsafe extern "C" fn $put_at(buf: *mut ByteBuffer, offset: usize, value: $t) -> Status {
			with_buffer!(buf, status(buf.put_at::<$t>(offset, value)))
		}

		/// # Safety
		///
		/// `buf` must be a live handle or null; `out` must be writable or null.
		#[no_mangle]
		pub unsafe extern "C" fn $get_at(buf: *mut ByteBuffer, offset: usize, out: *mut $t) -> Status {
			let out = match out.as_mut() {
				Some(out) => out,
				None => return Status::NullPointer,
			};
			with_buffer!(buf, match buf.get_at::<$t>(offset) {
				Ok(value) => {
					*out = value;
					Status::Ok
				},
				Err(err) => Status::from(&err),
			})
		}
	)*}
}

scalars! {
	u8:  byte_buffer_put_u8  byte_buffer_get_u8  byte_buffer_put_u8_at  byte_buffer_get_u8_at;
	u16: byte_buffer_put_u16 byte_buffer_get_u16 byte_buffer_put_u16_at byte_buffer_get_u16_at;
	u32: byte_buffer_put_u32 byte_buffer_get_u32 byte_buffer_put_u32_at byte_buffer_get_u32_at;
	u64: byte_buffer_put_u64 byte_buffer_get_u64 byte_buffer_put_u64_at byte_buffer_get_u64_at;
	i8:  byte_buffer_put_i8  byte_buffer_get_i8  byte_buffer_put_i8_at  byte_buffer_get_i8_at;
	i16: byte_buffer_put_i16 byte_buffer_get_i16 byte_buffer_put_i16_at byte_buffer_get_i16_at;
	i32: byte_buffer_put_i32 byte_buffer_get_i32 byte_buffer_put_i32_at byte_buffer_get_i32_at;
	i64: byte_buffer_put_i64 byte_buffer_get_i64 byte_buffer_put_i64_at byte_buffer_get_i64_at;
	f32: byte_buffer_put_f32 byte_buffer_get_f32 byte_buffer_put_f32_at byte_buffer_get_f32_at;
	f64: byte_buffer_put_f64 byte_buffer_get_f64 byte_buffer_put_f64_at byte_buffer_get_f64_at;
}

/// # Safety
///
/// `buf` must be a live handle or null; `data` must point to `len` readable bytes (null if `len` is 0).
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_put_bytes(buf: *mut ByteBuffer, data: *const u8, len: usize) -> Status {
	let bytes = match input(data, len) {
		Some(bytes) => bytes,
		None => return Status::NullPointer,
	};
	with_buffer!(buf, status(buf.put_bytes(bytes)))
}

/// Copy the next `len` bytes at the read cursor into `out`.
///
/// # Safety
///
/// `buf` must be a live handle or null; `out` must point to `len` writable bytes (null if `len` is 0).
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_get_bytes(buf: *mut ByteBuffer, out: *mut u8, len: usize) -> Status {
	let out = match output(out, len) {
		Some(out) => out,
		None => return Status::NullPointer,
	};
	with_buffer!(buf, match buf.get_bytes(len) {
		Ok(bytes) => {
			out.copy_from_slice(bytes);
			Status::Ok
		},
		Err(err) => Status::from(&err),
	})
}

/// # Safety
///
/// Same as [`byte_buffer_put_bytes`].
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_put_bytes_at(buf: *mut ByteBuffer, offset: usize, data: *const u8, len: usize) -> Status {
	let bytes = match input(data, len) {
		Some(bytes) => bytes,
		None => return Status::NullPointer,
	};
	with_buffer!(buf, status(buf.put_bytes_at(offset, bytes)))
}

/// # Safety
///
/// Same as [`byte_buffer_get_bytes`].
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_get_bytes_at(buf: *mut ByteBuffer, offset: usize, out: *mut u8, len: usize) -> Status {
	let out = match output(out, len) {
		Some(out) => out,
		None => return Status::NullPointer,
	};
	with_buffer!(buf, match buf.get_bytes_at(offset, len) {
		Ok(bytes) => {
			out.copy_from_slice(bytes);
			Status::Ok
		},
		Err(err) => Status::from(&err),
	})
}

/// Write `len` bytes of UTF-8 at `data` as a length-prefixed string.
///
/// # Safety
///
/// Same as [`byte_buffer_put_bytes`].
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_put_string(buf: *mut ByteBuffer, data: *const u8, len: usize) -> Status {
	let bytes = match input(data, len) {
		Some(bytes) => bytes,
		None => return Status::NullPointer,
	};
	let s = match std::str::from_utf8(bytes) {
		Ok(s) => s,
		Err(err) => return Status::from(&Error::from(err)),
	};
	with_buffer!(buf, status(buf.put_string(s)))
}

/**
Read a length-prefixed string into `out`, storing its length (without any terminator) in `out_len`.

If the string is longer than `out_capacity`, nothing is consumed,
`out_len` still receives the required size, and the status is `CapacityExceeded`.
Passing a null `out` with zero `out_capacity` is a way to ask for the size.

# Safety

`buf` must be a live handle or null; `out` must point to `out_capacity` writable bytes
(null if `out_capacity` is 0); `out_len` must be writable.
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_get_string(
	buf: *mut ByteBuffer,
	out: *mut u8,
	out_capacity: usize,
	out_len: *mut usize,
) -> Status {
	let out = match output(out, out_capacity) {
		Some(out) => out,
		None => return Status::NullPointer,
	};
	let out_len = match out_len.as_mut() {
		Some(out_len) => out_len,
		None => return Status::NullPointer,
	};
	with_buffer!(buf, {
		let start = buf.read_position();
		let len = match buf.get_string() {
			Ok(s) => {
				if s.len() <= out_capacity {
					out[ .. s.len() ].copy_from_slice(s.as_bytes());
				}
				s.len()
			},
			Err(err) => return Status::from(&err),
		};
		*out_len = len;
		if len > out_capacity {
			return match buf.set_read_position(start) {
				Ok(()) => Status::CapacityExceeded,
				Err(err) => Status::from(&err),
			};
		}
		Status::Ok
	})
}

macro_rules! with_datatype {
	($datatype:expr, $t:ident => $body:expr) => {
		match $datatype {
			Datatype::Byte => { type $t = i8; $body },
			Datatype::Short => { type $t = i16; $body },
			Datatype::Int => { type $t = i32; $body },
			Datatype::Long => { type $t = i64; $body },
			Datatype::Float => { type $t = f32; $body },
			Datatype::Double => { type $t = f64; $body },
		}
	}
}

macro_rules! datatype {
	($raw:expr) => {
		match Datatype::from_raw($raw) {
			Some(datatype) => datatype,
			None => return Status::InvalidArgument,
		}
	}
}

// every element passes through one of these on its way between datatypes;
// i64 and f64 hold any source value exactly
#[derive(Debug, Clone, Copy)]
enum Scalar {
	Int(i64),
	Float(f64),
}

trait Element: Primitive + Default {
	fn widen(self) -> Scalar;
	fn narrow(value: Scalar) -> Self;
}

macro_rules! element {
	($($t:ty => $variant:ident),*) => {$(
		impl Element for $t {
			fn widen(self) -> Scalar { Scalar::$variant(self as _) }
			fn narrow(value: Scalar) -> Self {
				match value {
					Scalar::Int(v) => v as $t,
					Scalar::Float(v) => v as $t,
				}
			}
		}
	)*}
}

element!(i8 => Int, i16 => Int, i32 => Int, i64 => Int, f32 => Float, f64 => Float);

fn convert<S: Element, D: Element>(value: S) -> D {
	D::narrow(value.widen())
}

// `n` elements of `datatype` at `offset` must end by `limit`;
// checked up front so that a bogus count is refused before anything gets converted
fn check_span(datatype: Datatype, offset: usize, n: usize, limit: usize) -> Result<()> {
	let width = datatype.width().checked_mul(n);
	match width.and_then(|width| offset.checked_add(width)) {
		Some(end) if end <= limit => Ok(()),
		_ => Err(Error::IndexOutOfRange { offset, width: width.unwrap_or(usize::MAX), limit }),
	}
}

unsafe fn elements<'a, T>(data: *const c_void, offset: usize, n: usize) -> Option<&'a [T]> {
	if n == 0 {
		Some(&[])
	} else if data.is_null() {
		None
	} else {
		Some(slice::from_raw_parts((data as *const T).add(offset), n))
	}
}

unsafe fn elements_mut<'a, T>(data: *mut c_void, offset: usize, n: usize) -> Option<&'a mut [T]> {
	if n == 0 {
		Some(&mut [])
	} else if data.is_null() {
		None
	} else {
		Some(slice::from_raw_parts_mut((data as *mut T).add(offset), n))
	}
}

unsafe fn put_array<T: Primitive>(buf: &mut ByteBuffer, src: *const c_void, n: usize) -> Status {
	match elements::<T>(src, 0, n) {
		Some(src) => status(buf.put_slice(src)),
		None => Status::NullPointer,
	}
}

unsafe fn get_array<T: Primitive>(buf: &mut ByteBuffer, dst: *mut c_void, n: usize) -> Status {
	match elements_mut::<T>(dst, 0, n) {
		Some(dst) => status(buf.get_into(dst)),
		None => Status::NullPointer,
	}
}

fn put_converted<S: Element, D: Element>(buf: &mut ByteBuffer, offset: usize, src: &[S]) -> Status {
	let values: Vec<D> = src.iter().map(|&value| convert(value)).collect();
	status(buf.put_slice_at(offset, &values))
}

fn get_converted<S: Element, D: Element>(buf: &ByteBuffer, offset: usize, dst: &mut [D]) -> Status {
	let mut values = vec![S::default(); dst.len()];
	if let Err(err) = buf.get_into_at(offset, &mut values) {
		return Status::from(&err);
	}
	for (slot, &value) in dst.iter_mut().zip(&values) {
		*slot = convert(value);
	}
	Status::Ok
}

// `at` of None fills at the write cursor
unsafe fn fill<V: Element, D: Element>(buf: &mut ByteBuffer, at: Option<usize>, value: *const c_void, n: usize) -> Status {
	let value: D = match (value as *const V).as_ref() {
		Some(&value) => convert(value),
		None => return Status::NullPointer,
	};
	status(match at {
		Some(offset) => buf.put_repeated_at(offset, value, n),
		None => buf.put_repeated(value, n),
	})
}

unsafe fn get_value<S: Element, D: Element>(buf: &ByteBuffer, offset: usize, out: *mut c_void) -> Status {
	let out = match (out as *mut D).as_mut() {
		Some(out) => out,
		None => return Status::NullPointer,
	};
	match buf.get_at::<S>(offset) {
		Ok(value) => {
			*out = convert(value);
			Status::Ok
		},
		Err(err) => Status::from(&err),
	}
}

/**
Write `n` elements of type `datatype` (see [`Datatype`]) from `src`, in the buffer's byte order.

# Safety

`buf` must be a live handle or null; `src` must point to `n` properly aligned elements of that type.
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_put_array(buf: *mut ByteBuffer, datatype: u32, src: *const c_void, n: usize) -> Status {
	let datatype = datatype!(datatype);
	with_buffer!(buf, with_datatype!(datatype, T => put_array::<T>(buf, src, n)))
}

/**
Read `n` elements of type `datatype` into `dst`; nothing is consumed unless all of them are there.

# Safety

`buf` must be a live handle or null; `dst` must point to room for `n` properly aligned elements of that type.
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_get_array(buf: *mut ByteBuffer, datatype: u32, dst: *mut c_void, n: usize) -> Status {
	let datatype = datatype!(datatype);
	with_buffer!(buf, with_datatype!(datatype, T => get_array::<T>(buf, dst, n)))
}

/**
Convert elements `src[src_offset .. src_offset + n]` of type `src_type`
to `dst_type` and store them back to back starting at byte `offset`.

Cursors don't move and the buffer never grows; the whole run must fit below capacity.
Elements are converted as described for [`Datatype`].

# Safety

`buf` must be a live handle or null; `src` must point to at least `src_offset + n`
properly aligned elements of type `src_type` (null if `n` is 0).
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_put_array_at(
	buf: *mut ByteBuffer,
	offset: usize,
	dst_type: u32,
	src_type: u32,
	src: *const c_void,
	src_offset: usize,
	n: usize,
) -> Status {
	let dst_type = datatype!(dst_type);
	let src_type = datatype!(src_type);
	with_buffer!(buf, {
		if let Err(err) = check_span(dst_type, offset, n, buf.capacity()) {
			return Status::from(&err);
		}
		with_datatype!(src_type, S => match elements::<S>(src, src_offset, n) {
			Some(src) => with_datatype!(dst_type, D => put_converted::<S, D>(buf, offset, src)),
			None => Status::NullPointer,
		})
	})
}

/**
Decode `n` elements of type `src_type` stored back to back from byte `offset`,
convert them to `dst_type` and store them in `dst[dst_offset .. dst_offset + n]`.

Cursors don't move; the whole run must lie within the data.

# Safety

`buf` must be a live handle or null; `dst` must point to room for at least
`dst_offset + n` properly aligned elements of type `dst_type` (null if `n` is 0).
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_get_array_at(
	buf: *mut ByteBuffer,
	offset: usize,
	src_type: u32,
	dst_type: u32,
	dst: *mut c_void,
	dst_offset: usize,
	n: usize,
) -> Status {
	let src_type = datatype!(src_type);
	let dst_type = datatype!(dst_type);
	with_buffer!(buf, {
		if let Err(err) = check_span(src_type, offset, n, buf.len()) {
			return Status::from(&err);
		}
		with_datatype!(dst_type, D => match elements_mut::<D>(dst, dst_offset, n) {
			Some(dst) => with_datatype!(src_type, S => get_converted::<S, D>(buf, offset, dst)),
			None => Status::NullPointer,
		})
	})
}

/**
Write the value at `value` (of type `value_type`), converted to `dst_type`, `n` times at the write cursor.

# Safety

`buf` must be a live handle or null; `value` must point to one properly aligned element of type `value_type`.
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_fill(
	buf: *mut ByteBuffer,
	dst_type: u32,
	value_type: u32,
	value: *const c_void,
	n: usize,
) -> Status {
	let dst_type = datatype!(dst_type);
	let value_type = datatype!(value_type);
	with_buffer!(buf, with_datatype!(value_type, V => with_datatype!(dst_type, D => fill::<V, D>(buf, None, value, n))))
}

/**
Like [`byte_buffer_fill`], but starting at byte `offset` without moving cursors; never grows the buffer.

# Safety

Same as [`byte_buffer_fill`].
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_fill_at(
	buf: *mut ByteBuffer,
	offset: usize,
	dst_type: u32,
	value_type: u32,
	value: *const c_void,
	n: usize,
) -> Status {
	let dst_type = datatype!(dst_type);
	let value_type = datatype!(value_type);
	with_buffer!(buf, with_datatype!(value_type, V => with_datatype!(dst_type, D => fill::<V, D>(buf, Some(offset), value, n))))
}

/**
Decode one element of type `src_type` at byte `offset` and store it in `out`, converted to `out_type`.

# Safety

`buf` must be a live handle or null; `out` must point to room for one properly aligned element of type `out_type`.
*/
#[no_mangle]
pub unsafe extern "C" fn byte_buffer_get_value(
	buf: *mut ByteBuffer,
	offset: usize,
	src_type: u32,
	out_type: u32,
	out: *mut c_void,
) -> Status {
	let src_type = datatype!(src_type);
	let out_type = datatype!(out_type);
	with_buffer!(buf, with_datatype!(src_type, S => with_datatype!(out_type, D => get_value::<S, D>(buf, offset, out))))
}
