//! External key/value property sources
//!
//! The provider samples its position from a property store it does not own.
//! Reads never fail: an absent or empty value falls back to the caller's
//! default, and a value that does not parse as a number reads as `0.0`.

pub mod memory;
pub mod file;

pub use memory::InMemoryPropertySource;
pub use file::FilePropertySource;

/// Read access to a store of named scalar values
pub trait PropertySource: Send + Sync {
    /// Return the value stored under `name` if present and non-empty,
    /// otherwise `default`
    fn read_scalar(&self, name: &str, default: &str) -> String;

    /// Read `name` and parse it as a decimal number
    fn read_f64(&self, name: &str, default: &str) -> f64 {
        parse_scalar(&self.read_scalar(name, default))
    }
}

/// Parse a property value as `f64`.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12abc"` reads as `12.0` and `"1.5e"` as `1.5`. Hexadecimal (`0x1A`),
/// `inf` and `nan` forms are accepted. A value with no numeric prefix reads
/// as `0.0`.
pub fn parse_scalar(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let (negative, body) = match bytes.first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = parse_special(body)
        .or_else(|| parse_hex(body))
        .or_else(|| parse_decimal(body))
        .unwrap_or(0.0);

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn parse_special(body: &str) -> Option<f64> {
    let lower = body.get(..3)?.to_ascii_lowercase();
    match lower.as_str() {
        "inf" => Some(f64::INFINITY),
        "nan" => Some(f64::NAN),
        _ => None,
    }
}

fn count_digits(bytes: &[u8], radix: u32) -> usize {
    bytes
        .iter()
        .take_while(|b| char::from(**b).is_digit(radix))
        .count()
}

fn parse_decimal(body: &str) -> Option<f64> {
    let bytes = body.as_bytes();
    let int_digits = count_digits(bytes, 10);
    let mut end = int_digits;
    let mut frac_digits = 0;

    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..], 10);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    // The exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_digits = count_digits(bytes.get(exp_start..).unwrap_or_default(), 10);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }

    body[..end].parse::<f64>().ok()
}

fn parse_hex(body: &str) -> Option<f64> {
    let digits = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))?
        .as_bytes();

    let int_digits = count_digits(digits, 16);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if digits.get(end) == Some(&b'.') {
        frac_digits = count_digits(&digits[end + 1..], 16);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    let mut value = 0.0_f64;
    for b in &digits[..int_digits] {
        value = value * 16.0 + f64::from(char::from(*b).to_digit(16)?);
    }
    let mut scale = 1.0 / 16.0;
    for b in digits.iter().skip(int_digits + 1).take(frac_digits) {
        value += f64::from(char::from(*b).to_digit(16)?) * scale;
        scale /= 16.0;
    }

    // Binary exponent, again only with at least one digit
    if matches!(digits.get(end), Some(b'p' | b'P')) {
        let mut exp_start = end + 1;
        let negative = digits.get(exp_start) == Some(&b'-');
        if matches!(digits.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_bytes = digits.get(exp_start..).unwrap_or_default();
        let exp_digits = count_digits(exp_bytes, 10);
        if exp_digits > 0 {
            let exponent = std::str::from_utf8(&exp_bytes[..exp_digits])
                .ok()?
                .parse::<i32>()
                .unwrap_or(i32::MAX);
            let exponent = if negative { -exponent } else { exponent };
            value *= 2.0_f64.powi(exponent);
        }
    }

    Some(value)
}
