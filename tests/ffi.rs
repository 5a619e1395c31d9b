use std::ffi::CStr;
use std::ptr;

use byte_buffer::ffi::*;

#[test]
fn scalars_through_handle() {
	unsafe {
		let buf = byte_buffer_new(4);
		assert!(!buf.is_null());
		assert_eq!(byte_buffer_capacity(buf), 4);

		assert_eq!(byte_buffer_put_u16(buf, 0x1234), Status::Ok);
		assert_eq!(byte_buffer_put_u16(buf, 0x5678), Status::Ok);
		assert_eq!(byte_buffer_put_u16(buf, 0x9abc), Status::Ok);
		assert!(byte_buffer_capacity(buf) >= 6);
		assert_eq!(byte_buffer_len(buf), 6);

		let mut v = 0u16;
		assert_eq!(byte_buffer_get_u16(buf, &mut v), Status::Ok);
		assert_eq!(v, 0x1234);
		assert_eq!(byte_buffer_read_position(buf), 2);

		let mut big = 0u64;
		assert_eq!(byte_buffer_get_u64(buf, &mut big), Status::BufferUnderflow);
		assert_eq!(big, 0);
		assert_eq!(byte_buffer_read_position(buf), 2);

		assert_eq!(byte_buffer_put_u32_at(buf, 0, 7), Status::Ok);
		let mut at = 0u32;
		assert_eq!(byte_buffer_get_u32_at(buf, 0, &mut at), Status::Ok);
		assert_eq!(at, 7);
		assert_eq!(byte_buffer_get_u32_at(buf, 4, &mut at), Status::IndexOutOfRange);

		byte_buffer_free(buf);
	}
}

#[test]
fn byte_order_tags() {
	unsafe {
		let buf = byte_buffer_new(8);
		assert_eq!(byte_buffer_byte_order(buf), 2);
		assert_eq!(byte_buffer_set_byte_order(buf, 1), Status::Ok);
		assert_eq!(byte_buffer_byte_order(buf), 1);
		assert_eq!(byte_buffer_set_byte_order(buf, 3), Status::InvalidArgument);
		assert_eq!(byte_buffer_put_u16(buf, 0x0102), Status::Ok);

		let mut out = [0u8; 2];
		assert_eq!(byte_buffer_get_bytes(buf, out.as_mut_ptr(), 2), Status::Ok);
		assert_eq!(out, [2, 1]);
		byte_buffer_free(buf);
	}
}

#[test]
fn wrap_copies() {
	let source = vec![0u8, 0, 0, 5, b'h', b'i'];
	unsafe {
		let buf = byte_buffer_wrap(source.as_ptr(), source.len());
		drop(source);
		assert_eq!(byte_buffer_len(buf), 6);
		assert_eq!(byte_buffer_write_position(buf), 6);

		let mut out = [0u8; 8];
		let mut len = 0usize;
		assert_eq!(
			byte_buffer_get_string(buf, out.as_mut_ptr(), out.len(), &mut len),
			Status::MalformedLength,
		);
		assert_eq!(byte_buffer_read_position(buf), 0);
		byte_buffer_free(buf);
	}
}

#[test]
fn strings() {
	unsafe {
		let buf = byte_buffer_new(0);
		let s = "héllo";
		assert_eq!(byte_buffer_put_string(buf, s.as_ptr(), s.len()), Status::Ok);

		// ask for the size first
		let mut len = 0usize;
		assert_eq!(
			byte_buffer_get_string(buf, ptr::null_mut(), 0, &mut len),
			Status::CapacityExceeded,
		);
		assert_eq!(len, s.len());
		assert_eq!(byte_buffer_read_position(buf), 0);

		let mut out = vec![0u8; len];
		assert_eq!(byte_buffer_get_string(buf, out.as_mut_ptr(), out.len(), &mut len), Status::Ok);
		assert_eq!(&out[..len], s.as_bytes());
		assert_eq!(byte_buffer_remaining(buf), 0);

		let bad = [0xffu8];
		assert_eq!(byte_buffer_put_string(buf, bad.as_ptr(), bad.len()), Status::InvalidUtf8);
		byte_buffer_free(buf);
	}
}

#[test]
fn prefix_width() {
	unsafe {
		let buf = byte_buffer_new(8);
		assert_eq!(byte_buffer_set_length_prefix(buf, 3), Status::InvalidArgument);
		assert_eq!(byte_buffer_set_length_prefix(buf, 1), Status::Ok);
		assert_eq!(byte_buffer_put_string(buf, b"ab".as_ptr(), 2), Status::Ok);
		assert_eq!(byte_buffer_len(buf), 3);
		let mut first = 0u8;
		assert_eq!(byte_buffer_get_u8_at(buf, 0, &mut first), Status::Ok);
		assert_eq!(first, 2);
		byte_buffer_free(buf);
	}
}

#[test]
fn arrays() {
	unsafe {
		let buf = byte_buffer_new(0);
		let shorts = [1i16, -2, 3];
		assert_eq!(byte_buffer_put_array(buf, 1, shorts.as_ptr() as *const _, shorts.len()), Status::Ok);
		let doubles = [0.5f64, -8.0];
		assert_eq!(byte_buffer_put_array(buf, 5, doubles.as_ptr() as *const _, doubles.len()), Status::Ok);
		assert_eq!(byte_buffer_len(buf), 3 * 2 + 2 * 8);

		let mut shorts_back = [0i16; 3];
		assert_eq!(byte_buffer_get_array(buf, 1, shorts_back.as_mut_ptr() as *mut _, 3), Status::Ok);
		assert_eq!(shorts_back, shorts);

		// one element too many: nothing consumed
		let mut doubles_back = [0f64; 3];
		assert_eq!(byte_buffer_get_array(buf, 5, doubles_back.as_mut_ptr() as *mut _, 3), Status::BufferUnderflow);
		assert_eq!(byte_buffer_remaining(buf), 16);
		assert_eq!(byte_buffer_get_array(buf, 5, doubles_back.as_mut_ptr() as *mut _, 2), Status::Ok);
		assert_eq!(&doubles_back[..2], &doubles);

		assert_eq!(byte_buffer_get_array(buf, 9, ptr::null_mut(), 0), Status::InvalidArgument);
		assert_eq!(byte_buffer_put_array(buf, 2, ptr::null(), 1), Status::NullPointer);
		byte_buffer_free(buf);
	}
}

#[test]
fn capacity_management() {
	unsafe {
		let buf = byte_buffer_new(4);
		assert_eq!(byte_buffer_put_bytes(buf, b"ABCD".as_ptr(), 4), Status::Ok);
		let mut two = [0u8; 2];
		assert_eq!(byte_buffer_get_bytes(buf, two.as_mut_ptr(), 2), Status::Ok);
		assert_eq!(byte_buffer_compact(buf), Status::Ok);
		assert_eq!(byte_buffer_len(buf), 2);
		assert_eq!(byte_buffer_read_position(buf), 0);
		assert_eq!(byte_buffer_get_bytes_at(buf, 0, two.as_mut_ptr(), 2), Status::Ok);
		assert_eq!(&two, b"CD");

		assert_eq!(byte_buffer_ensure_capacity(buf, 100), Status::Ok);
		assert!(byte_buffer_capacity(buf) >= 100);
		assert_eq!(byte_buffer_clear(buf), Status::Ok);
		assert_eq!(byte_buffer_len(buf), 0);
		assert_eq!(byte_buffer_set_write_position(buf, 1000), Status::IndexOutOfRange);
		assert_eq!(byte_buffer_set_read_position(buf, 1), Status::IndexOutOfRange);
		byte_buffer_free(buf);
	}
}

#[test]
fn null_handles() {
	unsafe {
		let mut v = 0u8;
		assert_eq!(byte_buffer_put_u8(ptr::null_mut(), 1), Status::NullPointer);
		assert_eq!(byte_buffer_get_u8(ptr::null_mut(), &mut v), Status::NullPointer);
		assert_eq!(byte_buffer_clear(ptr::null_mut()), Status::NullPointer);
		assert_eq!(byte_buffer_len(ptr::null()), 0);
		byte_buffer_free(ptr::null_mut());

		let buf = byte_buffer_new(1);
		assert_eq!(byte_buffer_get_u8(buf, ptr::null_mut()), Status::NullPointer);
		assert_eq!(byte_buffer_put_bytes(buf, ptr::null(), 0), Status::Ok);
		assert_eq!(byte_buffer_put_bytes(buf, ptr::null(), 1), Status::NullPointer);
		byte_buffer_free(buf);

		assert!(byte_buffer_new(usize::MAX).is_null());
	}
}

#[test]
fn status_messages() {
	let msg = unsafe { CStr::from_ptr(byte_buffer_status_message(Status::BufferUnderflow as u32)) };
	assert_eq!(msg.to_str().unwrap(), "buffer underflow");
	let msg = unsafe { CStr::from_ptr(byte_buffer_status_message(99)) };
	assert_eq!(msg.to_str().unwrap(), "unknown status");
}

#[test]
fn converting_arrays_at_offsets() {
	unsafe {
		let buf = byte_buffer_new(32);
		// ints from the caller, doubles in the buffer
		let ints = [9i32, 1, -2, 3];
		assert_eq!(byte_buffer_put_array_at(buf, 8, 5, 2, ints.as_ptr() as *const _, 1, 3), Status::Ok);
		assert_eq!(byte_buffer_len(buf), 32);
		assert_eq!(byte_buffer_write_position(buf), 0);
		let mut d = 0f64;
		assert_eq!(byte_buffer_get_f64_at(buf, 16, &mut d), Status::Ok);
		assert_eq!(d, -2.0);

		let mut shorts = [0i16; 4];
		assert_eq!(byte_buffer_get_array_at(buf, 8, 5, 1, shorts.as_mut_ptr() as *mut _, 1, 3), Status::Ok);
		assert_eq!(shorts, [0, 1, -2, 3]);
		assert_eq!(byte_buffer_read_position(buf), 0);

		// runs past the end are refused whole
		assert_eq!(byte_buffer_put_array_at(buf, 24, 5, 2, ints.as_ptr() as *const _, 0, 2), Status::IndexOutOfRange);
		assert_eq!(byte_buffer_get_f64_at(buf, 24, &mut d), Status::Ok);
		assert_eq!(d, 3.0);
		assert_eq!(byte_buffer_get_array_at(buf, 16, 5, 1, shorts.as_mut_ptr() as *mut _, 0, 3), Status::IndexOutOfRange);

		assert_eq!(byte_buffer_put_array_at(buf, 0, 6, 2, ints.as_ptr() as *const _, 0, 1), Status::InvalidArgument);
		assert_eq!(byte_buffer_get_array_at(buf, 0, 5, 1, ptr::null_mut(), 0, 1), Status::NullPointer);
		byte_buffer_free(buf);
	}
}

#[test]
fn fills_and_single_values() {
	unsafe {
		let buf = byte_buffer_new(0);
		let value = 2.75f64;
		assert_eq!(byte_buffer_fill(buf, 2, 5, &value as *const f64 as *const _, 3), Status::Ok);
		assert_eq!(byte_buffer_len(buf), 12);
		assert_eq!(byte_buffer_write_position(buf), 12);

		let seven = 7i8;
		assert_eq!(byte_buffer_fill_at(buf, 4, 1, 0, &seven as *const i8 as *const _, 2), Status::Ok);
		let mut word = 0i32;
		assert_eq!(byte_buffer_get_i32_at(buf, 4, &mut word), Status::Ok);
		assert_eq!(word, 0x0007_0007);

		let mut d = 0f64;
		assert_eq!(byte_buffer_get_value(buf, 8, 2, 5, &mut d as *mut f64 as *mut _), Status::Ok);
		assert_eq!(d, 2.0);
		let mut b = 0i8;
		assert_eq!(byte_buffer_get_value(buf, 6, 1, 0, &mut b as *mut i8 as *mut _), Status::Ok);
		assert_eq!(b, 7);
		assert_eq!(byte_buffer_get_value(buf, 10, 2, 5, &mut d as *mut f64 as *mut _), Status::IndexOutOfRange);
		assert_eq!(byte_buffer_get_value(buf, 0, 2, 5, ptr::null_mut()), Status::NullPointer);

		let cap = byte_buffer_capacity(buf);
		assert_eq!(byte_buffer_fill_at(buf, cap - 1, 1, 0, &seven as *const i8 as *const _, 1), Status::IndexOutOfRange);
		assert_eq!(byte_buffer_len(buf), 12);
		assert_eq!(byte_buffer_fill(buf, 2, 5, ptr::null(), 1), Status::NullPointer);
		assert_eq!(byte_buffer_fill(buf, 2, 9, &value as *const f64 as *const _, 1), Status::InvalidArgument);
		assert_eq!(byte_buffer_write_position(buf), 12);
		byte_buffer_free(buf);
	}
}
