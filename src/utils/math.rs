//! Modulo helpers that always land in `[0, m)`.
//!
//! Rust's `%` keeps the sign of the dividend, so `-1 % 4 == -1`. Chunk
//! addressing needs the mathematical result (`3`), including for floats.
//!
//! Behaviour for `m <= 0` is unspecified. Integer `m == 0` panics exactly like
//! `%` does.

/// Modulo returning a value in `[0, m)` for `m > 0`.
pub trait PositiveMod: Sized {
  fn positive_mod(self, m: Self) -> Self;
}

macro_rules! impl_positive_mod_signed {
  ($($t:ty),*) => {
    $(
      impl PositiveMod for $t {
        #[inline]
        fn positive_mod(self, m: Self) -> Self {
          let rem = self % m;
          if rem < 0 { rem + m } else { rem }
        }
      }
    )*
  };
}

macro_rules! impl_positive_mod_unsigned {
  ($($t:ty),*) => {
    $(
      impl PositiveMod for $t {
        #[inline]
        fn positive_mod(self, m: Self) -> Self {
          self % m
        }
      }
    )*
  };
}

macro_rules! impl_positive_mod_float {
  ($($t:ty),*) => {
    $(
      impl PositiveMod for $t {
        #[inline]
        fn positive_mod(self, m: Self) -> Self {
          let rem = self % m;
          if rem >= 0.0 {
            return rem;
          }
          let wrapped = rem + m;
          // -1e-20 % 1.0 + 1.0 rounds to exactly 1.0
          if wrapped >= m { 0.0 } else { wrapped }
        }
      }
    )*
  };
}

impl_positive_mod_signed!(i8, i16, i32, i64, i128, isize);
impl_positive_mod_unsigned!(u8, u16, u32, u64, u128, usize);
impl_positive_mod_float!(f32, f64);

/// Free-function form of [`PositiveMod::positive_mod`].
#[inline]
pub fn positive_mod<T: PositiveMod>(value: T, m: T) -> T {
  value.positive_mod(m)
}

/// Positive modulo of a signed value by an unsigned modulus.
///
/// `m` must fit in `i32`; larger values wrap the same way an `as` cast does.
#[inline]
pub fn positive_mod_unsigned(value: i32, m: u32) -> u32 {
  value.positive_mod(m as i32) as u32
}
