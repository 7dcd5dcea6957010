// Converts a scanned number token into a Value: resolves the radix/type
// prefix and suffix codes, validates the body, and range-checks against the
// session word size. The float path accumulates an exact integer mantissa and
// applies a single correctly-rounded scaling, so formatted values read back
// bit-for-bit.

use crate::{
    lex::{is_radix_digit, Cursor},
    opts::ParserOpts,
    value::{self, Radix, TypeCode, Value, WordSize, FLOAT_PREC},
};
use rug::{ops::Pow, Complex, Float, Integer, Rational};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NumberError {
    OutOfRange,
    Invalid,
}

pub(crate) fn decode(
    lexeme: &str,
    negative: bool,
    opts: &ParserOpts,
) -> Result<Value, NumberError> {
    let mut body = Cursor::new(lexeme);
    let mut type_code = opts.default_type;
    let mut radix = opts.default_radix;

    // prefix resolution mirrors the scanner exactly
    if body.len() > 2 && body.peek() == Some(b'0') {
        let prefix_code = body.peek_at(1).unwrap_or(0).to_ascii_lowercase();
        let prefix_len = if body.len() > 3
            && body
                .peek_at(2)
                .is_some_and(|b| !is_radix_digit(b, radix) && b.to_ascii_lowercase() == b'x')
            && (prefix_code == b'b' || prefix_code == b'd')
        {
            3
        } else if !is_radix_digit(prefix_code, radix) {
            2
        } else {
            0
        };

        if prefix_len > 0 {
            let prefix_radix = match prefix_code {
                b'b' => Some(Radix::Bin),
                b'o' => Some(Radix::Oct),
                b'd' => Some(Radix::Dec),
                b'x' => Some(Radix::Hex),
                _ => None,
            };
            if let Some(r) = prefix_radix {
                radix = r;
                type_code = TypeCode::Int;
                body.advance(prefix_len);
                // optional type letter right after the prefix
                match body.peek().map(|b| b.to_ascii_lowercase()) {
                    Some(b's') => {
                        type_code = TypeCode::Int;
                        body.advance(1);
                    }
                    Some(b'u') => {
                        type_code = TypeCode::Uint;
                        body.advance(1);
                    }
                    Some(b'n') => {
                        type_code = TypeCode::Cplx;
                        body.advance(1);
                    }
                    _ => {}
                }
            }
        }
    }

    let exponent_code = match radix {
        Radix::Dec => b'e',
        _ => b'p',
    };

    // a decimal point or exponent forces the complex type
    let mut is_simple = true;
    for b in body.view().bytes() {
        if b == b'.' || b.to_ascii_lowercase() == exponent_code {
            type_code = TypeCode::Cplx;
            is_simple = false;
            break;
        }
    }

    // trailing type letter overrides
    if let Some(last) = body.back() {
        match last.to_ascii_lowercase() {
            b'u' => {
                if !is_simple {
                    return Err(NumberError::Invalid);
                }
                type_code = TypeCode::Uint;
                body.remove_suffix(1);
            }
            b's' => {
                if !is_simple {
                    return Err(NumberError::Invalid);
                }
                type_code = TypeCode::Int;
                body.remove_suffix(1);
            }
            b'n' => {
                type_code = TypeCode::Cplx;
                body.remove_suffix(1);
            }
            _ => {}
        }
    }

    if body.at_end() {
        return Err(NumberError::Invalid);
    }

    match type_code {
        TypeCode::Cplx => {
            let mut f = float_from_chars(body.view(), radix)?;
            if negative {
                f = -f;
            }
            Ok(Value::Cplx(Complex::with_val(FLOAT_PREC, f)))
        }
        TypeCode::Uint | TypeCode::Int => {
            let magnitude = uint_from_chars(body.view(), radix)?;
            integer_value(magnitude, negative, type_code, radix, opts.word_size)
        }
    }
}

fn uint_from_chars(body: &str, radix: Radix) -> Result<u128, NumberError> {
    let mut acc: u128 = 0;
    for b in body.bytes() {
        let d = (b as char)
            .to_digit(radix.value())
            .ok_or(NumberError::Invalid)?;
        acc = acc
            .checked_mul(radix.value() as u128)
            .and_then(|a| a.checked_add(d as u128))
            .ok_or(NumberError::OutOfRange)?;
    }
    Ok(acc)
}

fn integer_value(
    magnitude: u128,
    negative: bool,
    type_code: TypeCode,
    radix: Radix,
    ws: WordSize,
) -> Result<Value, NumberError> {
    let bits = ws.bits();
    if type_code == TypeCode::Uint {
        if magnitude > value::trim_uint(u128::MAX, ws) {
            return Err(NumberError::OutOfRange);
        }
        let v = if negative {
            value::trim_uint(magnitude.wrapping_neg(), ws)
        } else {
            magnitude
        };
        return Ok(Value::Uint(v));
    }

    if radix == Radix::Dec {
        // ordinary range checking; the negative bound admits the most
        // negative value of the word
        if negative {
            if magnitude > 1u128 << (bits - 1) {
                return Err(NumberError::OutOfRange);
            }
            Ok(Value::Int(value::trim_int(
                (magnitude as i128).wrapping_neg(),
                ws,
            )))
        } else {
            if magnitude > (1u128 << (bits - 1)) - 1 {
                return Err(NumberError::OutOfRange);
            }
            Ok(Value::Int(magnitude as i128))
        }
    } else {
        // any bit pattern that fits the word is admitted, so e.g. 0xffff is
        // -1 at 16 bits
        if bits < 128 && magnitude >> bits != 0 {
            return Err(NumberError::OutOfRange);
        }
        let mut v = value::trim_int(magnitude as i128, ws);
        if negative {
            v = value::trim_int(v.wrapping_neg(), ws);
        }
        Ok(Value::Int(v))
    }
}

// Parses whole[.fraction][E(+|-)exponent] where E is e/E at radix 10 and p/P
// otherwise. The exponent is a decimal integer denoting a power of the radix
// for decimal and a power of two for everything else.
pub(crate) fn float_from_chars(body: &str, radix: Radix) -> Result<Float, NumberError> {
    #[derive(PartialEq)]
    enum Scanning {
        Whole,
        Fraction,
        Exponent,
    }

    let exponent_intro = match radix {
        Radix::Dec => b'e',
        _ => b'p',
    };
    let mut state = Scanning::Whole;
    let mut scan_radix = radix;
    let mut mantissa = Integer::new();
    let mut frac_digits: i64 = 0;
    let mut exponent: i64 = 0;
    let mut negative_exponent = false;
    let mut digits = false;
    let mut exponent_digits = false;

    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(d) = (b as char).to_digit(scan_radix.value()) {
            if state == Scanning::Exponent {
                exponent = exponent.saturating_mul(10).saturating_add(d as i64);
                exponent_digits = true;
            } else {
                mantissa *= radix.value();
                mantissa += d;
                if state == Scanning::Fraction {
                    frac_digits += 1;
                }
            }
            digits = true;
        } else if b == b'.' && state == Scanning::Whole {
            state = Scanning::Fraction;
        } else if b.to_ascii_lowercase() == exponent_intro && state != Scanning::Exponent && digits
        {
            state = Scanning::Exponent;
            scan_radix = Radix::Dec;
            match bytes.get(i + 1).copied() {
                Some(b'+') => i += 1,
                Some(b'-') => {
                    i += 1;
                    negative_exponent = true;
                }
                _ => {}
            }
        } else {
            return Err(NumberError::Invalid);
        }
        i += 1;
    }

    if !digits || (state == Scanning::Exponent && !exponent_digits) {
        return Err(NumberError::Invalid);
    }
    if negative_exponent {
        exponent = -exponent;
    }

    Ok(match radix {
        Radix::Dec => scale(mantissa, 10, exponent - frac_digits),
        _ => scale(mantissa, 2, exponent - frac_digits * radix.digit_bits() as i64),
    })
}

// mantissa * base^k with one rounding. Moderate magnitudes go through exact
// integer/rational scaling; extreme ones fall back to a pow that saturates to
// inf/zero inside MPFR's exponent range.
fn scale(mantissa: Integer, base: u32, k: i64) -> Float {
    const EXACT_LIMIT: i64 = 1 << 20;
    if mantissa == 0 {
        Float::with_val(FLOAT_PREC, 0)
    } else if k == 0 {
        Float::with_val(FLOAT_PREC, mantissa)
    } else if k.unsigned_abs() <= EXACT_LIMIT as u64 {
        let factor = Integer::from(base).pow(k.unsigned_abs() as u32);
        if k > 0 {
            Float::with_val(FLOAT_PREC, mantissa * factor)
        } else {
            Float::with_val(FLOAT_PREC, Rational::from((mantissa, factor)))
        }
    } else {
        let clamped = k.clamp(i32::MIN as i64 / 2, i32::MAX as i64 / 2) as i32;
        Float::with_val(FLOAT_PREC, mantissa) * Float::with_val(FLOAT_PREC, base).pow(clamped)
    }
}
