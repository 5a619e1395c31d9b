/// How a buffer makes room when a write does not fit.
///
/// Every variant answers the same question through [`next_capacity`](#method.next_capacity):
/// given the current capacity and the size we need, what should the new capacity be?
/// `None` means no.
#[derive(Debug, Clone, Copy)]
pub enum Growth {
	/// Never grow; writes past capacity fail.
	Fixed,
	/// Double current capacity, but never below `min`, and always at least what is required.
	Doubling { min: usize },
	/// Grow in whole multiples of `increment`. Zero increment never grows.
	Linear { increment: usize },
	/// Caller-provided strategy: `(current, required) -> new capacity`.
	Custom(fn(usize, usize) -> Option<usize>),
}

pub const DEFAULT_GROWTH_FLOOR: usize = 64;

impl Default for Growth {
	fn default() -> Self {
		Growth::Doubling { min: DEFAULT_GROWTH_FLOOR }
	}
}

// function addresses are not stable across codegen units, so no two `Custom`s compare equal
impl PartialEq for Growth {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Growth::Fixed, Growth::Fixed) => true,
			(Growth::Doubling { min: a }, Growth::Doubling { min: b }) => a == b,
			(Growth::Linear { increment: a }, Growth::Linear { increment: b }) => a == b,
			_ => false,
		}
	}
}

impl Growth {
	/// New capacity able to hold `required` bytes, or `None` if this policy refuses.
	///
	/// The answer is never below `required`; strategies that suggest less are treated as refusing.
	pub fn next_capacity(&self, current: usize, required: usize) -> Option<usize> {
		if required <= current {
			return Some(current);
		}
		let proposed = match *self {
			Growth::Fixed => None,
			Growth::Doubling { min } => {
				let doubled = current.checked_mul(2).unwrap_or(usize::MAX);
				Some(required.max(doubled).max(min))
			},
			Growth::Linear { increment: 0 } => None,
			Growth::Linear { increment } => {
				let missing = required - current;
				let steps = missing / increment + (missing % increment != 0) as usize;
				steps.checked_mul(increment)
					.and_then(|extra| current.checked_add(extra))
			},
			Growth::Custom(f) => f(current, required),
		};
		proposed.filter(|&cap| cap >= required)
	}

	/// Whether this policy refuses every growth request
	pub fn is_fixed(&self) -> bool {
		match self {
			Growth::Fixed | Growth::Linear { increment: 0 } => true,
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fixed() {
		assert_eq!(Growth::Fixed.next_capacity(4, 4), Some(4));
		assert_eq!(Growth::Fixed.next_capacity(4, 5), None);
		assert!(Growth::Fixed.is_fixed());
		assert!(Growth::Linear { increment: 0 }.is_fixed());
		assert!(!Growth::default().is_fixed());
	}

	#[test]
	fn doubling() {
		let g = Growth::Doubling { min: 0 };
		assert_eq!(g.next_capacity(4, 6), Some(8));
		assert_eq!(g.next_capacity(4, 100), Some(100));
		assert_eq!(g.next_capacity(0, 1), Some(1));

		let g = Growth::Doubling { min: 64 };
		assert_eq!(g.next_capacity(4, 6), Some(64));
	}

	#[test]
	fn doubling_saturates() {
		let g = Growth::Doubling { min: 0 };
		assert_eq!(g.next_capacity(usize::MAX / 2 + 1, usize::MAX), Some(usize::MAX));
	}

	#[test]
	fn linear() {
		let g = Growth::Linear { increment: 4 };
		assert_eq!(g.next_capacity(4, 5), Some(8));
		assert_eq!(g.next_capacity(4, 8), Some(8));
		assert_eq!(g.next_capacity(4, 13), Some(16));
		assert_eq!(Growth::Linear { increment: 0 }.next_capacity(4, 5), None);
		assert_eq!(g.next_capacity(usize::MAX - 1, usize::MAX), None);
	}

	#[test]
	fn custom() {
		fn exact(_: usize, required: usize) -> Option<usize> { Some(required) }
		fn stingy(current: usize, _: usize) -> Option<usize> { Some(current + 1) }
		assert_eq!(Growth::Custom(exact).next_capacity(4, 9), Some(9));
		// suggesting too little counts as refusal
		assert_eq!(Growth::Custom(stingy).next_capacity(4, 9), None);
	}

	#[test]
	fn equality() {
		fn exact(_: usize, required: usize) -> Option<usize> { Some(required) }
		assert_eq!(Growth::Doubling { min: 8 }, Growth::Doubling { min: 8 });
		assert_ne!(Growth::Doubling { min: 8 }, Growth::Doubling { min: 16 });
		assert_ne!(Growth::Fixed, Growth::Linear { increment: 0 });
		assert_ne!(Growth::Custom(exact), Growth::Custom(exact));
	}
}
