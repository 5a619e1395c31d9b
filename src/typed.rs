use crate::{ByteBuffer, Result, Storage};

// named shorthands for put()/get()/put_at()/get_at()
macro_rules! typed_ops {
	($($t:ident: $put:ident $get:ident $put_at:ident $get_at:ident;)*) => {
		impl<S: Storage> ByteBuffer<S> {$(
			#[doc = concat!("Write a `", stringify!($t), "` at the write cursor")]
			#[inline]
			pub fn $put(&mut self, value: $t) -> Result<()> {
				self.put::<$t>(value)
			}
			#[doc = concat!("Read a `", stringify!($t), "` at the read cursor")]
			#[inline]
			pub fn $get(&mut self) -> Result<$t> {
				self.get::<$t>()
			}
			#[inline]
			pub fn $put_at(&mut self, offset: usize, value: $t) -> Result<()> {
				self.put_at::<$t>(offset, value)
			}
			#[inline]
			pub fn $get_at(&self, offset: usize) -> Result<$t> {
				self.get_at::<$t>(offset)
			}
		)*}
	}
}

typed_ops! {
	u8:  put_u8  get_u8  put_u8_at  get_u8_at;
	u16: put_u16 get_u16 put_u16_at get_u16_at;
	u32: put_u32 get_u32 put_u32_at get_u32_at;
	u64: put_u64 get_u64 put_u64_at get_u64_at;
	i8:  put_i8  get_i8  put_i8_at  get_i8_at;
	i16: put_i16 get_i16 put_i16_at get_i16_at;
	i32: put_i32 get_i32 put_i32_at get_i32_at;
	i64: put_i64 get_i64 put_i64_at get_i64_at;
	f32: put_f32 get_f32 put_f32_at get_f32_at;
	f64: put_f64 get_f64 put_f64_at get_f64_at;
}

#[cfg(test)]
mod tests {
	use crate::{ByteBuffer, ByteBufferBuilder, ByteOrder};

	fn each_type(order: ByteOrder) {
		let mut buf = ByteBufferBuilder::new()
			.capacity(1)
			.byte_order(order)
			.create();
		buf.put_u8(0xfe).unwrap();
		buf.put_u16(0xbeef).unwrap();
		buf.put_u32(0xdead_beef).unwrap();
		buf.put_u64(u64::MAX - 1).unwrap();
		buf.put_i8(-3).unwrap();
		buf.put_i16(i16::MIN).unwrap();
		buf.put_i32(-123_456).unwrap();
		buf.put_i64(i64::MIN + 7).unwrap();
		buf.put_f32(3.5).unwrap();
		buf.put_f64(-1e300).unwrap();
		assert_eq!(buf.len(), 1 + 2 + 4 + 8 + 1 + 2 + 4 + 8 + 4 + 8);

		assert_eq!(buf.get_u8().unwrap(), 0xfe);
		assert_eq!(buf.get_u16().unwrap(), 0xbeef);
		assert_eq!(buf.get_u32().unwrap(), 0xdead_beef);
		assert_eq!(buf.get_u64().unwrap(), u64::MAX - 1);
		assert_eq!(buf.get_i8().unwrap(), -3);
		assert_eq!(buf.get_i16().unwrap(), i16::MIN);
		assert_eq!(buf.get_i32().unwrap(), -123_456);
		assert_eq!(buf.get_i64().unwrap(), i64::MIN + 7);
		assert_eq!(buf.get_f32().unwrap(), 3.5);
		assert_eq!(buf.get_f64().unwrap(), -1e300);
		assert_eq!(buf.remaining(), 0);
	}

	#[test]
	fn each_type_big() {
		each_type(ByteOrder::Big)
	}

	#[test]
	fn each_type_little() {
		each_type(ByteOrder::Little)
	}

	#[test]
	fn positional() {
		let mut buf = ByteBuffer::with_capacity(16);
		buf.put_f64_at(8, 2.25).unwrap();
		buf.put_i32_at(0, -1).unwrap();
		assert_eq!(buf.len(), 16);
		assert_eq!(buf.get_f64_at(8).unwrap(), 2.25);
		assert_eq!(buf.get_u32_at(0).unwrap(), u32::MAX);
		assert_eq!(buf.get_u16_at(4).unwrap(), 0);
		assert_eq!(buf.read_position(), 0);
		assert_eq!(buf.write_position(), 0);
	}
}
