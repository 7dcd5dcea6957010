// Renders values in any of the four output radices. Decimal uses
// significant-digit formatting; the power-of-two radices decompose the float
// into an exact binary significand and exponent and emit scientific "p"
// notation, normalized or digit-aligned.

use crate::{
    opts::OutputOpts,
    value::{self, Radix, Value, WordSize},
};
use rug::{Complex, Float, Integer};
use std::fmt::{self, Display, Formatter, Write};

const DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

pub(crate) struct Printer<'a> {
    val: &'a Value,
    opts: OutputOpts,
    word_size: WordSize,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(val: &'a Value, opts: OutputOpts, word_size: WordSize) -> Self {
        Self {
            val,
            opts,
            word_size,
        }
    }

    fn write_value(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.opts.radix {
            Radix::Dec => match self.val {
                Value::Int(v) => write!(f, "{v}"),
                Value::Uint(v) => write!(f, "{v}"),
                Value::Cplx(z) => {
                    write_complex(f, z, &|f, x| write_real_dec(f, x, self.opts.precision))
                }
            },
            radix => match self.val {
                // signed values show their two's-complement pattern at the
                // session word width
                Value::Int(v) => {
                    write_uint_radix(f, value::trim_uint(*v as u128, self.word_size), radix)
                }
                Value::Uint(v) => write_uint_radix(f, *v, radix),
                Value::Cplx(z) => write_complex(f, z, &|f, x| {
                    write_real_radix(f, x, radix, self.opts.precision, self.opts.normalized)
                }),
            },
        }
    }
}

impl Display for Printer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_value(f)?;
        let tag = match self.val {
            Value::Cplx(_) => "cplx",
            Value::Uint(_) => "uint",
            Value::Int(_) => "int",
        };
        write!(f, " ({tag} base{})", self.opts.radix)
    }
}

type ScalarWriter<'s> = dyn Fn(&mut Formatter<'_>, &Float) -> fmt::Result + 's;

fn write_complex(f: &mut Formatter<'_>, z: &Complex, scalar: &ScalarWriter<'_>) -> fmt::Result {
    let (re, im) = (z.real(), z.imag());
    if *re != 0 || *im == 0 {
        scalar(f, re)?;
    }
    if *im != 0 {
        if *re != 0 && !im.is_sign_negative() {
            f.write_char('+')?;
        }
        if *im == -1 {
            f.write_char('-')?;
        } else if *im != 1 {
            scalar(f, im)?;
        }
        f.write_char('i')?;
    }
    Ok(())
}

fn write_real_dec(f: &mut Formatter<'_>, x: &Float, precision: u32) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_sign_negative() {
        f.write_char('-')?;
    }
    if x.is_infinite() {
        return f.write_str("inf");
    }
    if x.is_zero() {
        return f.write_char('0');
    }

    let wanted = (precision > 0).then_some(precision as usize);
    let (_, digits, exp) = x.to_sign_string_exp(10, wanted);
    let digits = digits.trim_end_matches('0');
    let e10 = i64::from(exp.unwrap_or(0)); // 0.digits * 10^e10

    let threshold = if precision == 0 {
        digits.len() as i64
    } else {
        i64::from(precision)
    };
    if e10 - 1 < -4 || e10 - 1 >= threshold {
        let mut cs = digits.chars();
        if let Some(first) = cs.next() {
            f.write_char(first)?;
        }
        let rest = cs.as_str();
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        write!(f, "e{:+}", e10 - 1)
    } else if e10 <= 0 {
        f.write_str("0.")?;
        for _ in 0..-e10 {
            f.write_char('0')?;
        }
        f.write_str(digits)
    } else if e10 as usize >= digits.len() {
        f.write_str(digits)?;
        for _ in 0..(e10 as usize - digits.len()) {
            f.write_char('0')?;
        }
        Ok(())
    } else {
        let (whole, frac) = digits.split_at(e10 as usize);
        write!(f, "{whole}.{frac}")
    }
}

fn write_real_radix(
    f: &mut Formatter<'_>,
    x: &Float,
    radix: Radix,
    precision: u32,
    normalized: bool,
) -> fmt::Result {
    if x.is_sign_negative() {
        f.write_char('-')?;
    }
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str("inf");
    }
    if x.is_zero() {
        return f.write_char('0');
    }

    let b = radix.digit_bits();
    let (_, bin_digits, exp) = x.to_sign_string_exp(2, None);
    let mut mant = Integer::new();
    for c in bin_digits.bytes() {
        mant <<= 1;
        if c == b'1' {
            mant += 1u32;
        }
    }
    let mut nbits = bin_digits.len() as u32;
    // unbiased exponent: the value is 1.fraction * 2^x_exp
    let mut x_exp = i64::from(exp.unwrap_or(0)) - 1;

    // round to the requested number of significant radix digits by adding
    // half a digit below the kept span and truncating
    if precision > 0 {
        let keep = u64::from(precision) * u64::from(b);
        if u64::from(nbits) > keep {
            let shift = nbits - keep as u32;
            mant += Integer::from(1) << (shift - 1);
            mant >>= shift;
            let new_bits = mant.significant_bits();
            x_exp += i64::from(new_bits + shift) - i64::from(nbits);
            nbits = new_bits;
        }
    }

    if normalized {
        f.write_char('1')?;
        let fbits = nbits - 1;
        if fbits > 0 {
            let digit_count = (fbits + b - 1) / b;
            let frac = mant.clone().keep_bits(fbits) << (digit_count * b - fbits);
            let mut digs = Vec::with_capacity(digit_count as usize);
            for i in (0..digit_count).rev() {
                digs.push(Integer::from(&frac >> (i * b)).keep_bits(b).to_u8_wrapping());
            }
            while digs.last() == Some(&0) {
                digs.pop();
            }
            if !digs.is_empty() {
                f.write_char('.')?;
                for d in digs {
                    f.write_char(DIGITS[d as usize])?;
                }
            }
        }
        write!(f, "p{:+}", x_exp)
    } else {
        // align the displayed exponent down to a whole digit so the digit
        // string is the value's natural digit sequence
        let lsb_exp = x_exp - (i64::from(nbits) - 1);
        let aligned = lsb_exp.div_euclid(i64::from(b)) * i64::from(b);
        let grown = mant << ((lsb_exp - aligned) as u32);
        let digit_count = (grown.significant_bits() + b - 1) / b;
        for i in (0..digit_count).rev() {
            f.write_char(DIGITS[Integer::from(&grown >> (i * b)).keep_bits(b).to_u8_wrapping() as usize])?;
        }
        write!(f, "p{:+}", aligned)
    }
}

fn write_uint_radix(f: &mut Formatter<'_>, mut v: u128, radix: Radix) -> fmt::Result {
    let b = radix.digit_bits();
    let mask = (1u128 << b) - 1;
    let delimit = if radix == Radix::Oct { 3 } else { 4 };
    let mut digs = Vec::new();
    loop {
        digs.push((v & mask) as usize);
        v >>= b;
        if v == 0 {
            break;
        }
    }
    for i in (0..digs.len()).rev() {
        if i + 1 < digs.len() && (i + 1) % delimit == 0 {
            f.write_char(' ')?;
        }
        f.write_char(DIGITS[digs[i]])?;
    }
    Ok(())
}
