// Complex-number functionality beyond what the underlying library provides:
// Lanczos gamma/log-gamma, the double-factorial extension, log2, cbrt, and a
// pow that special-cases whole exponents and the e base for accuracy.

use crate::value::FLOAT_PREC;
use once_cell::sync::Lazy;
use rug::{float::Constant, ops::Pow, Complex, Float};

pub(crate) static PI: Lazy<Float> = Lazy::new(|| Float::with_val(FLOAT_PREC, Constant::Pi));

pub(crate) static E: Lazy<Float> = Lazy::new(|| Float::with_val(FLOAT_PREC, 1).exp());

static LN_2: Lazy<Complex> =
    Lazy::new(|| Complex::with_val(FLOAT_PREC, Float::with_val(FLOAT_PREC, Constant::Log2)));

static C_PI: Lazy<Complex> = Lazy::new(|| Complex::with_val(FLOAT_PREC, &*PI));

static SQRT_2PI: Lazy<Complex> = Lazy::new(|| {
    Complex::with_val(FLOAT_PREC, (Float::with_val(FLOAT_PREC, Constant::Pi) * 2u32).sqrt())
});

static LN_SQRT_2PI: Lazy<Complex> =
    Lazy::new(|| Complex::with_val(FLOAT_PREC, SQRT_2PI.real().clone().ln()));

// Lanczos g=7 coefficients, from the tabulation at
// https://mrob.com/pub/ries/lanczos-gamma.html
static LANCZOS_C: Lazy<[Complex; 9]> = Lazy::new(|| {
    [
        "0.99999999999980993227684700473478",
        "676.520368121885098567009190444019",
        "-1259.13921672240287047156078755283",
        "771.3234287776530788486528258894",
        "-176.61502916214059906584551354",
        "12.507343278686904814458936853",
        "-0.13857109526572011689554707",
        "9.984369578019570859563e-6",
        "1.50563273514931155834e-7",
    ]
    .map(|s| Complex::with_val(FLOAT_PREC, Float::with_val(FLOAT_PREC, Float::parse(s).unwrap())))
});

const LANCZOS_G: f64 = 7.0;

fn real(v: f64) -> Complex {
    Complex::with_val(FLOAT_PREC, v)
}

pub(crate) fn imaginary_unit() -> Complex {
    Complex::with_val(FLOAT_PREC, (0, 1))
}

pub(crate) fn nan() -> Complex {
    Complex::with_val(FLOAT_PREC, (f64::NAN, f64::NAN))
}

fn complex_infinity() -> Complex {
    Complex::with_val(FLOAT_PREC, f64::INFINITY)
}

fn is_negative_whole_real(z: &Complex) -> bool {
    *z.real() <= 0 && *z.imag() == 0 && z.real().is_integer()
}

pub(crate) fn log2(z: Complex) -> Complex {
    z.ln() / LN_2.clone()
}

pub(crate) fn cbrt(z: Complex) -> Complex {
    let third = Complex::with_val(FLOAT_PREC, Float::with_val(FLOAT_PREC, 1) / 3u32);
    pow(z, third)
}

pub(crate) fn arg(z: Complex) -> Complex {
    Complex::with_val(FLOAT_PREC, z.imag().clone().atan2(z.real()))
}

pub(crate) fn norm(z: Complex) -> Complex {
    Complex::with_val(FLOAT_PREC, z.real().clone().square() + z.imag().clone().square())
}

pub(crate) fn proj(z: Complex) -> Complex {
    if z.real().is_infinite() || z.imag().is_infinite() {
        let imag = if z.imag().is_sign_negative() { -0.0 } else { 0.0 };
        return Complex::with_val(FLOAT_PREC, (f64::INFINITY, imag));
    }
    z
}

// Division with well-defined zero-divisor behavior: a finite nonzero value
// over zero is componentwise infinity with exact-zero components preserved,
// so 1.0/0 renders as a bare "inf".
pub(crate) fn div(num: Complex, den: Complex) -> Complex {
    if !den.real().is_zero() || !den.imag().is_zero() {
        return num / den;
    }
    if num.real().is_zero() && num.imag().is_zero() {
        return nan();
    }
    let blow_up = |x: &Float| {
        if x.is_zero() {
            Float::with_val(FLOAT_PREC, 0)
        } else if x.is_nan() {
            Float::with_val(FLOAT_PREC, f64::NAN)
        } else if x.is_sign_negative() {
            Float::with_val(FLOAT_PREC, f64::NEG_INFINITY)
        } else {
            Float::with_val(FLOAT_PREC, f64::INFINITY)
        }
    };
    Complex::with_val(FLOAT_PREC, (blow_up(num.real()), blow_up(num.imag())))
}

// Whole exponents use exponentiation by squaring and the e base collapses to
// exp(); both give noticeably better accuracy than the general power.
pub(crate) fn pow(base: Complex, expo: Complex) -> Complex {
    if *base.real() == *E && *base.imag() == 0 {
        return expo.exp();
    }
    if *expo.imag() == 0 && expo.real().is_integer() {
        if let Some(n) = expo.real().to_integer().and_then(|i| i.to_i128()) {
            return pow_whole(base, n);
        }
    }
    base.pow(expo)
}

fn pow_whole(z: Complex, e: i128) -> Complex {
    if e < 0 {
        // -(e + 1) instead of -e keeps the negation in range for the most
        // negative exponent
        real(1.0) / pow_whole(z.clone(), -(e + 1)) / z
    } else {
        pow_squaring(z, e as u128)
    }
}

fn pow_squaring(mut z: Complex, mut e: u128) -> Complex {
    let mut acc = if e & 1 == 1 { z.clone() } else { real(1.0) };
    e >>= 1;
    while e != 0 {
        z = z.square();
        if e & 1 == 1 {
            acc *= &z;
        }
        e >>= 1;
    }
    acc
}

pub(crate) fn tgamma(z: Complex) -> Complex {
    if *z.real() < 0.5 {
        // Euler's reflection formula; non-positive whole reals are poles
        if is_negative_whole_real(&z) {
            return complex_infinity();
        }
        let sin_pi_z = (C_PI.clone() * z.clone()).sin();
        return C_PI.clone() / (sin_pi_z * tgamma(real(1.0) - z));
    }
    if *z.imag() == 0 {
        // library gamma for reals produces better results, in particular
        // whole numbers for factorial
        return Complex::with_val(FLOAT_PREC, z.real().clone().gamma());
    }

    let z = z - real(1.0);
    let mut sum = real(0.0);
    for i in (1..LANCZOS_C.len()).rev() {
        sum += LANCZOS_C[i].clone() / (z.clone() + real(i as f64));
    }
    sum += &LANCZOS_C[0];

    let base = z.clone() + real(LANCZOS_G + 0.5);
    SQRT_2PI.clone() * sum * base.clone().pow(z + real(0.5)) / base.exp()
}

pub(crate) fn lgamma(z: Complex) -> Complex {
    if *z.real() < 0.5 {
        if is_negative_whole_real(&z) {
            return complex_infinity(); // log of complex infinity
        }
        let sin_pi_z = (C_PI.clone() * z.clone()).sin();
        return (C_PI.clone() / sin_pi_z).ln() - lgamma(real(1.0) - z);
    }
    if *z.imag() == 0 {
        return Complex::with_val(FLOAT_PREC, z.real().clone().ln_gamma());
    }

    let z = z - real(1.0);
    let mut sum = real(0.0);
    for i in (1..LANCZOS_C.len()).rev() {
        sum += LANCZOS_C[i].clone() / (z.clone() + real(i as f64));
    }
    sum += &LANCZOS_C[0];

    let base = z.clone() + real(LANCZOS_G + 0.5);
    ((LN_SQRT_2PI.clone() + sum.ln()) - base.clone()) + base.ln() * (z + real(0.5))
}

// The double factorial extended to complex arguments, per
// https://mathworld.wolfram.com/DoubleFactorial.html
pub(crate) fn dfac(z: Complex) -> Complex {
    let cos_pi_z = (C_PI.clone() * z.clone()).cos();
    let two_exp = (real(1.0) + real(2.0) * z.clone() - cos_pi_z.clone()) / real(4.0);
    let pi_exp = (cos_pi_z - real(1.0)) / real(4.0);
    pow(real(2.0), two_exp) * pow(C_PI.clone(), pi_exp) * tgamma(real(1.0) + z / real(2.0))
}
