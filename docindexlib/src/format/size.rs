//! Human-readable byte counts in decimal (power of 1000) units.

use crate::error::DocindexError;
use crate::Result;

/// Unit suffixes, each 1000 times the previous one.
pub const UNITS: [&str; 9] = ["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count as `<value><unit>`.
///
/// The unit is picked from the number of decimal digits in `bytes`: every
/// three digits move one unit up. The value is then rounded half away from
/// zero to `decimals` places. Arithmetic is done on integers, so the output is
/// exact for every input.
///
/// ```
/// use docindexlib::format_size;
///
/// assert_eq!(format_size(0, 0).unwrap(), "0B");
/// assert_eq!(format_size(1000, 0).unwrap(), "1kB");
/// assert_eq!(format_size(1_536, 2).unwrap(), "1.54kB");
/// ```
///
/// Counts too large for the yottabyte unit fail with
/// [`DocindexError::SizeOutOfRange`].
pub fn format_size(bytes: u128, decimals: usize) -> Result<String> {
    let factor = (digit_count(bytes) - 1) / 3;
    let unit = UNITS
        .get(factor)
        .ok_or(DocindexError::SizeOutOfRange(bytes))?;

    // Number of digits that move behind the decimal point.
    let shift = 3 * factor;
    let divisor = 10u128.pow(shift as u32);
    let mut whole = bytes / divisor;
    let rem = bytes % divisor;

    let fraction = if decimals >= shift {
        let mut digits = if shift == 0 {
            String::new()
        } else {
            format!("{:0width$}", rem, width = shift)
        };
        digits.push_str(&"0".repeat(decimals - shift));
        digits
    } else {
        let dropped = 10u128.pow((shift - decimals) as u32);
        let mut kept = rem / dropped;
        if (rem % dropped) * 2 >= dropped {
            kept += 1;
        }
        if kept == 10u128.pow(decimals as u32) {
            whole += 1;
            kept = 0;
        }
        if decimals == 0 {
            String::new()
        } else {
            format!("{:0width$}", kept, width = decimals)
        }
    };

    if fraction.is_empty() {
        Ok(format!("{whole}{unit}"))
    } else {
        Ok(format!("{whole}.{fraction}{unit}"))
    }
}

fn digit_count(mut n: u128) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
