/// Longest decimal rendering: `-9223372036854775808` and `18446744073709551615` are both 20 bytes.
const DECIMAL_MAX_LEN: usize = 20;

/// Decimal rendering held on the stack.
///
/// Digits are produced least-significant first by repeated division and
/// stored from the end of the buffer backwards, so no separate reverse pass
/// is needed.
#[derive(Clone, Copy)]
pub struct Decimal {
    buf: [u8; DECIMAL_MAX_LEN],
    start: usize,
}

impl Decimal {
    pub fn from_u64(value: u64) -> Self {
        let mut out = Self {
            buf: [0; DECIMAL_MAX_LEN],
            start: DECIMAL_MAX_LEN,
        };
        out.push_magnitude(value);
        out
    }

    pub fn from_i64(value: i64) -> Self {
        let mut out = Self::from_u64(value.unsigned_abs());
        if value < 0 {
            out.start -= 1;
            out.buf[out.start] = b'-';
        }
        out
    }

    fn push_magnitude(&mut self, value: u64) {
        if value == 0 {
            self.start -= 1;
            self.buf[self.start] = b'0';
            return;
        }
        let mut v = value;
        while v > 0 {
            self.start -= 1;
            self.buf[self.start] = b'0' + (v % 10) as u8;
            v /= 10;
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }
}

impl core::fmt::Display for Decimal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Only ASCII digits and '-' are ever stored.
        f.write_str(core::str::from_utf8(self.as_bytes()).map_err(|_| core::fmt::Error)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_a_single_digit() {
        assert_eq!(Decimal::from_i64(0).as_bytes(), b"0");
        assert_eq!(Decimal::from_u64(0).as_bytes(), b"0");
    }

    #[test]
    fn negative_values_get_a_minus() {
        assert_eq!(Decimal::from_i64(-42).as_bytes(), b"-42");
        assert_eq!(Decimal::from_i64(-1).as_bytes(), b"-1");
    }

    #[test]
    fn positive_values_have_no_leading_zeros() {
        assert_eq!(Decimal::from_i64(255).as_bytes(), b"255");
        assert_eq!(Decimal::from_u64(1000).as_bytes(), b"1000");
    }

    #[test]
    fn extremes_fit() {
        assert_eq!(Decimal::from_i64(i64::MIN).as_bytes(), b"-9223372036854775808");
        assert_eq!(Decimal::from_i64(i64::MAX).as_bytes(), b"9223372036854775807");
        assert_eq!(Decimal::from_u64(u64::MAX).as_bytes(), b"18446744073709551615");
    }

    #[test]
    fn display_matches_bytes() {
        assert_eq!(format!("{}", Decimal::from_i64(-7)), "-7");
    }
}
