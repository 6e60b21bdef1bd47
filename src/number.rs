//! Wire encoding of `DCONST` operands
//!
//! Constants travel as the eight bytes of their IEEE-754 bit pattern, most
//! significant byte first, whatever the byte order of the host.

use byteorder::{BigEndian, ByteOrder};

/// Width in bytes of an encoded constant
pub const WIDTH: usize = 8;

/// Decode eight wire-order bytes into a double
pub fn decode(bytes: [u8; WIDTH]) -> f64 {
  BigEndian::read_f64(&bytes)
}

/// Encode a double into wire order, bit for bit
pub fn encode(value: f64) -> [u8; WIDTH] {
  let mut bytes = [0; WIDTH];
  BigEndian::write_f64(&mut bytes, value);
  bytes
}

/// Render a value with six fractional digits, the way C's `%f` does
pub fn format_fixed(value: f64) -> String {
  if value.is_nan() {
    // rust spells it `NaN`, and never signs it
    if value.is_sign_negative() {
      "-nan".to_owned()
    } else {
      "nan".to_owned()
    }
  } else {
    format!("{value:.6}")
  }
}
