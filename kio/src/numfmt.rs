//! Integer to ASCII conversion
//!
//! Canonical digits only: no padding, no grouping, lowercase hex. Digits are
//! produced right to left into a caller-supplied buffer and the populated
//! tail is returned.

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Room for `-2147483648`
pub type DecBuf = [u8; 11];

/// Room for `ffffffff`
pub type HexBuf = [u8; 8];

/// Formats an unsigned 32-bit value as decimal
pub fn format_u32(mut value: u32, buf: &mut DecBuf) -> &[u8] {
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    &buf[i..]
}

/// Formats a signed 32-bit value as decimal
pub fn format_i32(value: i32, buf: &mut DecBuf) -> &[u8] {
    let len = format_u32(value.unsigned_abs(), buf).len();
    let mut start = buf.len() - len;
    if value < 0 {
        start -= 1;
        buf[start] = b'-';
    }
    &buf[start..]
}

/// Formats a 32-bit value as lowercase hexadecimal
pub fn format_hex(mut value: u32, buf: &mut HexBuf) -> &[u8] {
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = HEX_DIGITS[(value & 0xF) as usize];
        value >>= 4;
        if value == 0 {
            break;
        }
    }
    &buf[i..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal() {
        let mut buf = DecBuf::default();
        assert_eq!(format_u32(0, &mut buf), b"0");
        assert_eq!(format_u32(42, &mut buf), b"42");
        assert_eq!(format_u32(u32::MAX, &mut buf), b"4294967295");
    }

    #[test]
    fn test_signed_decimal() {
        let mut buf = DecBuf::default();
        assert_eq!(format_i32(-42, &mut buf), b"-42");
        assert_eq!(format_i32(0, &mut buf), b"0");
        assert_eq!(format_i32(i32::MAX, &mut buf), b"2147483647");
        assert_eq!(format_i32(i32::MIN, &mut buf), b"-2147483648");
    }

    #[test]
    fn test_hex() {
        let mut buf = HexBuf::default();
        assert_eq!(format_hex(0, &mut buf), b"0");
        assert_eq!(format_hex(255, &mut buf), b"ff");
        assert_eq!(format_hex(0xDEAD_BEEF, &mut buf), b"deadbeef");
    }
}
