//! Formatter - renders bytes and floats as text without allocating.

use core::fmt;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Two lowercase hex digits for `v`, zero padded, no prefix.
#[inline]
pub const fn hex(v: u8) -> [u8; 2] {
    [HEX_DIGITS[(v >> 4) as usize], HEX_DIGITS[(v & 0x0f) as usize]]
}

/// Hex digits of `v` followed by a single space, the unit of a dump.
#[inline]
pub const fn dump_cell(v: u8) -> [u8; 3] {
    let [hi, lo] = hex(v);
    [hi, lo, b' ']
}

/// Write `bytes` as a hex dump: every byte as two digits and a space.
///
/// Output length is always `3 * bytes.len()`.
pub fn dump<W: fmt::Write>(out: &mut W, bytes: &[u8]) -> fmt::Result {
    for &b in bytes {
        let cell = dump_cell(b);
        // The cell is plain ASCII
        out.write_str(core::str::from_utf8(&cell).map_err(|_| fmt::Error)?)?;
    }
    Ok(())
}

/// `Display` adapter for a single hex byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexByte(pub u8);

impl fmt::Display for HexByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = hex(self.0);
        f.write_str(core::str::from_utf8(&digits).map_err(|_| fmt::Error)?)
    }
}

/// Split `f` into sign, integer part and two decimal places.
///
/// Both parts truncate toward zero: `100.999` gives `(false, 100, 99)`.
/// Magnitudes outside the `i32` range saturate and NaN splits as zero.
pub fn split_float(f: f32) -> (bool, i32, i32) {
    let neg = f < 0.0;
    let abs = if neg { -f } else { f };
    let int = abs as i32;
    let frac = ((100.0 * abs) as i32) % 100;
    (neg, int, frac)
}

/// `Display` adapter printing a float as `[-]INT.FF`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fixed2(pub f32);

impl fmt::Display for Fixed2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (neg, int, frac) = split_float(self.0);
        write!(f, "{}{}.{:02}", if neg { "-" } else { "" }, int, frac)
    }
}
