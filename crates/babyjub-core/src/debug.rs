//! Debug utilities for tracing constant generation and decompression
//!
//! Enable with `--features debug`

use crate::curve::Point;
use crate::field::Fr;

/// Format Fr as a 0x-prefixed big-endian hex string
pub fn fr_to_hex(fr: &Fr) -> String {
    format!("0x{:x}", fr)
}

/// Format an affine point as hex
pub fn point_to_hex(p: &Point) -> String {
    format!("({}, {})", fr_to_hex(&p.x), fr_to_hex(&p.y))
}

/// Debug print for Fr value (only when debug feature enabled)
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! dbg_fr {
    ($name:expr, $fr:expr) => {
        eprintln!("{} = {}", $name, $crate::debug::fr_to_hex($fr));
    };
}

/// Debug print for Fr value (noop when debug feature disabled)
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! dbg_fr {
    ($name:expr, $fr:expr) => {};
}

/// Debug print for a point
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! dbg_point {
    ($name:expr, $p:expr) => {
        eprintln!("{} = {}", $name, $crate::debug::point_to_hex($p));
    };
}

/// Debug print for a point (noop when disabled)
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! dbg_point {
    ($name:expr, $p:expr) => {};
}

/// Debug trace macro
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

/// Debug trace macro (noop when debug feature disabled)
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fr_to_hex() {
        assert_eq!(
            fr_to_hex(&Fr::from(1)),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_point_to_hex() {
        let s = point_to_hex(&Point::neutral());
        assert!(s.starts_with("(0x00"));
        assert!(s.ends_with("01)"));
    }
}
