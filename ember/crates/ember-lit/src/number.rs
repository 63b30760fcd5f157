//! Canonical number to string conversion.
//!
//! The literal store compares number literals against strings by their
//! canonical textual form, so the conversion has to be deterministic. It is
//! pluggable through [`NumberFormat`]; [`EcmaNumberFormat`] follows the
//! script language's `Number.prototype.toString()` rules.

use std::io::Write;

/// Upper bound on the bytes a [`NumberFormat`] may produce
pub const MAX_NUMBER_STRING_SIZE: usize = 64;

/// Canonical textual form of engine numbers
pub trait NumberFormat {
    /// Write the canonical form of `num` into `buf`, returning its length
    fn format(&self, num: f64, buf: &mut [u8; MAX_NUMBER_STRING_SIZE]) -> usize;

    /// Canonical form as an owned byte string
    fn to_bytes(&self, num: f64) -> Vec<u8> {
        let mut buf = [0u8; MAX_NUMBER_STRING_SIZE];
        let len = self.format(num, &mut buf);
        buf[..len].to_vec()
    }
}

/// `Number.prototype.toString()` with radix 10
///
/// ```
/// use ember_lit::number::{EcmaNumberFormat, NumberFormat};
///
/// assert_eq!(EcmaNumberFormat.to_bytes(3.0), b"3");
/// assert_eq!(EcmaNumberFormat.to_bytes(1e21), b"1e+21");
/// assert_eq!(EcmaNumberFormat.to_bytes(-0.0), b"0");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EcmaNumberFormat;

impl NumberFormat for EcmaNumberFormat {
    fn format(&self, num: f64, buf: &mut [u8; MAX_NUMBER_STRING_SIZE]) -> usize {
        let mut out = OutBuf { buf, len: 0 };

        if num.is_nan() {
            out.extend(b"NaN");
        } else if num == 0.0 {
            out.extend(b"0");
        } else if num.is_infinite() {
            if num < 0.0 {
                out.push(b'-');
            }
            out.extend(b"Infinity");
        } else {
            if num < 0.0 {
                out.push(b'-');
            }
            write_finite(&mut out, &Digits::shortest(num.abs()));
        }

        out.len
    }
}

struct OutBuf<'a> {
    buf: &'a mut [u8; MAX_NUMBER_STRING_SIZE],
    len: usize,
}

impl OutBuf<'_> {
    #[inline]
    fn push(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.len += 1;
    }

    fn extend(&mut self, bytes: &[u8]) {
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    fn zeros(&mut self, count: usize) {
        for _ in 0..count {
            self.push(b'0');
        }
    }

    fn exponent(&mut self, exp: i32) {
        self.push(b'e');
        self.push(if exp < 0 { b'-' } else { b'+' });
        let mut digits = [0u8; 4];
        let mut cursor = std::io::Cursor::new(&mut digits[..]);
        let _ = write!(cursor, "{}", exp.unsigned_abs());
        let len = cursor.position() as usize;
        self.extend(&digits[..len]);
    }
}

/// Shortest decimal digits `d1 d2 .. dk` with the value `0.d1..dk * 10^point`
struct Digits {
    digits: [u8; 20],
    len: usize,
    point: i32,
}

impl Digits {
    /// `value` must be finite and positive
    fn shortest(value: f64) -> Self {
        // `{:e}` emits the shortest digits that round-trip, e.g. "1.23456e2"
        let mut sci = [0u8; 32];
        let mut cursor = std::io::Cursor::new(&mut sci[..]);
        let _ = write!(cursor, "{:e}", value);
        let written = cursor.position() as usize;
        let sci = &sci[..written];

        let e_pos = sci.iter().position(|&b| b == b'e').unwrap_or(written);
        let mut digits = [0u8; 20];
        let mut len = 0;
        for &b in sci[..e_pos].iter().filter(|b| b.is_ascii_digit()) {
            if len < digits.len() {
                digits[len] = b;
                len += 1;
            }
        }
        let exp = sci
            .get(e_pos + 1..)
            .and_then(|tail| std::str::from_utf8(tail).ok())
            .and_then(|tail| tail.parse::<i32>().ok())
            .unwrap_or(0);

        Self {
            digits,
            len,
            point: exp + 1,
        }
    }

    fn as_slice(&self) -> &[u8] {
        &self.digits[..self.len]
    }
}

fn write_finite(out: &mut OutBuf<'_>, d: &Digits) {
    let k = d.len as i32;
    let n = d.point;
    let digits = d.as_slice();

    if k <= n && n <= 21 {
        // Integer: digits then trailing zeros
        out.extend(digits);
        out.zeros((n - k) as usize);
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        out.extend(int);
        out.push(b'.');
        out.extend(frac);
    } else if -6 < n && n <= 0 {
        out.extend(b"0.");
        out.zeros((-n) as usize);
        out.extend(digits);
    } else {
        out.push(digits[0]);
        if k > 1 {
            out.push(b'.');
            out.extend(&digits[1..]);
        }
        out.exponent(n - 1);
    }
}
