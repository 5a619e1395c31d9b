/// Byte order used for every multi-byte value going in or out of a buffer.
///
/// Discriminants are the ones exposed through the C interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ByteOrder {
	Little = 1,
	Big = 2,
}

impl ByteOrder {
	/// Byte order of the host.
	pub fn native() -> Self {
		if cfg!(target_endian = "big") {
			ByteOrder::Big
		} else {
			ByteOrder::Little
		}
	}

	pub fn from_raw(raw: u32) -> Option<Self> {
		match raw {
			1 => Some(ByteOrder::Little),
			2 => Some(ByteOrder::Big),
			_ => None,
		}
	}
}

impl Default for ByteOrder {
	fn default() -> Self {
		crate::DEFAULT_BYTE_ORDER
	}
}

/// Width of the length header in front of strings and blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthPrefix {
	U8,
	U16,
	U32,
	U64,
}

impl LengthPrefix {
	pub fn width(self) -> usize {
		match self {
			LengthPrefix::U8 => 1,
			LengthPrefix::U16 => 2,
			LengthPrefix::U32 => 4,
			LengthPrefix::U64 => 8,
		}
	}

	/// Largest length the header can describe.
	pub fn max(self) -> u64 {
		match self {
			LengthPrefix::U8 => u8::MAX as u64,
			LengthPrefix::U16 => u16::MAX as u64,
			LengthPrefix::U32 => u32::MAX as u64,
			LengthPrefix::U64 => u64::MAX,
		}
	}
}

impl Default for LengthPrefix {
	fn default() -> Self {
		crate::DEFAULT_LENGTH_PREFIX
	}
}

/*
The only two places that know about byte order.
Everything else (scalars, bulk copies, length prefixes) goes through these,
with `bits` carrying the value zero-extended to 64 bits.

	bits = 0x..._1234, width 2
	Big:    [0x12, 0x34]
	Little: [0x34, 0x12]
*/
pub(crate) fn write_ordered(order: ByteOrder, bits: u64, dst: &mut [u8]) {
	let width = dst.len();
	debug_assert!(width <= 8);
	for (i, byte) in dst.iter_mut().enumerate() {
		let shift = match order {
			ByteOrder::Big => 8 * (width - 1 - i),
			ByteOrder::Little => 8 * i,
		};
		*byte = (bits >> shift) as u8;
	}
}

pub(crate) fn read_ordered(order: ByteOrder, src: &[u8]) -> u64 {
	let width = src.len();
	debug_assert!(width <= 8);
	src.iter().enumerate().fold(0u64, |acc, (i, &byte)| {
		let shift = match order {
			ByteOrder::Big => 8 * (width - 1 - i),
			ByteOrder::Little => 8 * i,
		};
		acc | (byte as u64) << shift
	})
}

mod private {
	pub trait Sealed {}
}

/// Fixed-width value that can be put into and got out of a buffer.
///
/// Implemented for all integer types up to 64 bits, `f32` and `f64`.
/// Sealed: the set of wire widths is closed.
pub trait Primitive: Copy + private::Sealed {
	/// Encoded size in bytes
	const WIDTH: usize;
	#[doc(hidden)]
	fn into_bits(self) -> u64;
	#[doc(hidden)]
	fn from_bits(bits: u64) -> Self;
}

macro_rules! primitive_int {
	($($t:ty => $u:ty),* $(,)?) => {$(
		impl private::Sealed for $t {}
		impl Primitive for $t {
			const WIDTH: usize = std::mem::size_of::<$t>();
			#[inline]
			fn into_bits(self) -> u64 { self as $u as u64 }
			#[inline]
			fn from_bits(bits: u64) -> Self { bits as $u as $t }
		}
	)*}
}

primitive_int! {
	u8 => u8, u16 => u16, u32 => u32, u64 => u64,
	i8 => u8, i16 => u16, i32 => u32, i64 => u64,
}

impl private::Sealed for f32 {}
impl Primitive for f32 {
	const WIDTH: usize = 4;
	#[inline]
	fn into_bits(self) -> u64 { self.to_bits() as u64 }
	#[inline]
	fn from_bits(bits: u64) -> Self { f32::from_bits(bits as u32) }
}

impl private::Sealed for f64 {}
impl Primitive for f64 {
	const WIDTH: usize = 8;
	#[inline]
	fn into_bits(self) -> u64 { self.to_bits() }
	#[inline]
	fn from_bits(bits: u64) -> Self { f64::from_bits(bits) }
}

pub(crate) fn encode<T: Primitive>(order: ByteOrder, value: T, dst: &mut [u8]) {
	write_ordered(order, value.into_bits(), &mut dst[..T::WIDTH])
}

pub(crate) fn decode<T: Primitive>(order: ByteOrder, src: &[u8]) -> T {
	T::from_bits(read_ordered(order, &src[..T::WIDTH]))
}

pub(crate) fn encode_all<T: Primitive>(order: ByteOrder, values: &[T], dst: &mut [u8]) {
	for (value, chunk) in values.iter().zip(dst.chunks_exact_mut(T::WIDTH)) {
		encode(order, *value, chunk);
	}
}

pub(crate) fn decode_all<T: Primitive>(order: ByteOrder, src: &[u8], out: &mut [T]) {
	for (slot, chunk) in out.iter_mut().zip(src.chunks_exact(T::WIDTH)) {
		*slot = decode(order, chunk);
	}
}
