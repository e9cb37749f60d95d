//! Unicode digit classification.
//!
//! `char::to_digit` only knows ASCII and `char::is_numeric` also accepts
//! fractions and roman numerals, so decimal digits (general category `Nd`)
//! and other digit characters (superscripts, circled digits) are looked up here.
//!
//! Tables follow Unicode 14.0.

/// First codepoint (the zero) of each run of ten `Nd` digits.
const DECIMAL_ZEROS: [u32; 66] = [
    0x30, 0x660, 0x6f0, 0x7c0, 0x966, 0x9e6, 0xa66, 0xae6, 0xb66, 0xbe6, 0xc66, 0xce6, 0xd66,
    0xde6, 0xe50, 0xed0, 0xf20, 0x1040, 0x1090, 0x17e0, 0x1810, 0x1946, 0x19d0, 0x1a80, 0x1a90,
    0x1b50, 0x1bb0, 0x1c40, 0x1c50, 0xa620, 0xa8d0, 0xa900, 0xa9d0, 0xa9f0, 0xaa50, 0xabf0,
    0xff10, 0x104a0, 0x10d30, 0x11066, 0x110f0, 0x11136, 0x111d0, 0x112f0, 0x11450, 0x114d0,
    0x11650, 0x116c0, 0x11730, 0x118e0, 0x11950, 0x11c50, 0x11d50, 0x11da0, 0x16a60, 0x16ac0,
    0x16b50, 0x1d7ce, 0x1d7d8, 0x1d7e2, 0x1d7ec, 0x1d7f6, 0x1e140, 0x1e2f0, 0x1e950, 0x1fbf0,
];

/// Inclusive ranges of digit characters that are not decimal digits.
const OTHER_DIGITS: [(u32, u32); 20] = [
    (0xb2, 0xb3),
    (0xb9, 0xb9),
    (0x1369, 0x1371),
    (0x19da, 0x19da),
    (0x2070, 0x2070),
    (0x2074, 0x2079),
    (0x2080, 0x2089),
    (0x2460, 0x2468),
    (0x2474, 0x247c),
    (0x2488, 0x2490),
    (0x24ea, 0x24ea),
    (0x24f5, 0x24fd),
    (0x24ff, 0x24ff),
    (0x2776, 0x277e),
    (0x2780, 0x2788),
    (0x278a, 0x2792),
    (0x10a40, 0x10a43),
    (0x10e60, 0x10e68),
    (0x11052, 0x1105a),
    (0x1f100, 0x1f10a),
];

/// Value of `c` if it is a decimal digit of any script.
pub fn decimal_value(c: char) -> Option<u32> {
    if c.is_ascii() {
        return c.to_digit(10);
    }
    let cp = c as u32;
    let idx = match DECIMAL_ZEROS.binary_search(&cp) {
        Ok(i) => i,
        Err(0) => return None,
        Err(i) => i - 1,
    };
    let offset = cp - DECIMAL_ZEROS[idx];
    if offset < 10 {
        Some(offset)
    } else {
        None
    }
}

/// `true` for decimal digits and other digit characters such as `²` or `①`.
pub fn is_digit(c: char) -> bool {
    if decimal_value(c).is_some() {
        return true;
    }
    let cp = c as u32;
    OTHER_DIGITS
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!(decimal_value('0'), Some(0));
        assert_eq!(decimal_value('9'), Some(9));
        assert_eq!(decimal_value('a'), None);
        assert_eq!(decimal_value(':'), None);
    }

    #[test]
    fn other_scripts() {
        // arabic-indic, extended arabic-indic, devanagari, fullwidth
        assert_eq!(decimal_value('١'), Some(1));
        assert_eq!(decimal_value('۹'), Some(9));
        assert_eq!(decimal_value('४'), Some(4));
        assert_eq!(decimal_value('７'), Some(7));
        // gaps between runs
        assert_eq!(decimal_value('\u{66a}'), None);
        assert_eq!(decimal_value('é'), None);
    }

    #[test]
    fn digits_but_not_decimal() {
        assert!(is_digit('²'));
        assert!(is_digit('①'));
        assert!(decimal_value('²').is_none());
        assert!(is_digit('٣'));
        // numeric, not digits
        assert!(!is_digit('½'));
        assert!(!is_digit('Ⅻ'));
    }
}
