// Interprets command-line (-x) and in-expression (@x) option strings.

use crate::value::{Radix, TypeCode, WordSize};

pub const DEFAULT_PRECISION: u32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOpts {
    pub default_type: TypeCode,
    pub default_radix: Radix,
    pub word_size: WordSize,
}

impl Default for ParserOpts {
    fn default() -> Self {
        Self {
            default_type: TypeCode::Cplx,
            default_radix: Radix::Dec,
            word_size: WordSize::W128,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputOpts {
    pub radix: Radix,
    pub precision: u32,
    pub normalized: bool,
}

impl Default for OutputOpts {
    fn default() -> Self {
        Self {
            radix: Radix::Dec,
            precision: DEFAULT_PRECISION,
            normalized: true,
        }
    }
}

// Tally of interpreted options; callers enforce at most one per class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    pub n_help: u32,
    pub n_default: u32,
    pub n_output: u32,
    pub n_word_size: u32,
    pub n_precision: u32,
    pub n_normalized: u32,
    pub n_other: u32,
    pub other_arg: String,

    pub default_type: TypeCode,
    pub default_radix: Radix,
    pub output_radix: Radix,
    pub word_size: WordSize,
    pub precision: u32,
    pub normalized: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            n_help: 0,
            n_default: 0,
            n_output: 0,
            n_word_size: 0,
            n_precision: 0,
            n_normalized: 0,
            n_other: 0,
            other_arg: String::new(),
            default_type: TypeCode::Cplx,
            default_radix: Radix::Dec,
            output_radix: Radix::Dec,
            word_size: WordSize::W128,
            precision: DEFAULT_PRECISION,
            normalized: true,
        }
    }
}

pub fn interpret_arg(arg: &str, option_code: char, args: &mut Args) {
    if let Some(rest) = arg.strip_prefix(option_code) {
        if single_flag_option(rest, args) {
            return;
        }
        if let Some(rest) = rest.strip_prefix(option_code) {
            if double_flag_option(rest, args) {
                return;
            }
        }
    }
    args.other_arg = arg.to_owned();
    args.n_other += 1;
}

fn single_flag_option(arg: &str, args: &mut Args) -> bool {
    match arg {
        "h" | "help" => {
            args.n_help += 1;
            return true;
        }
        "w8" | "w16" | "w32" | "w64" | "w128" => {
            args.word_size = match arg {
                "w8" => WordSize::W8,
                "w16" => WordSize::W16,
                "w32" => WordSize::W32,
                "w64" => WordSize::W64,
                _ => WordSize::W128,
            };
            args.n_word_size += 1;
            return true;
        }
        "pn" | "pu" => {
            args.normalized = arg == "pn";
            args.n_normalized += 1;
            return true;
        }
        _ => {}
    }

    if let Some(digits) = arg.strip_prefix("pr") {
        if let Ok(precision) = digits.parse() {
            args.precision = precision;
            args.n_precision += 1;
            return true;
        }
    }

    // ( '0' | 'o' | 'm' ) <radix letter> [ <type letter> ]
    // '0' updates the input defaults, 'o' the output base, 'm' both
    let bytes = arg.as_bytes();
    let option = match bytes.first().map(u8::to_ascii_lowercase) {
        Some(c @ (b'0' | b'o' | b'm')) => c,
        _ => return false,
    };
    let radix = match bytes.get(1).map(u8::to_ascii_lowercase) {
        Some(b'b') => Radix::Bin,
        Some(b'o') => Radix::Oct,
        Some(b'd') => Radix::Dec,
        Some(b'x') => Radix::Hex,
        _ => return false,
    };

    let mut len = 2;
    let mut updated = false;
    if option == b'0' || option == b'm' {
        let type_code = match bytes.get(2).map(u8::to_ascii_lowercase) {
            Some(b'u') => {
                len = 3;
                TypeCode::Uint
            }
            Some(b'n') => {
                len = 3;
                TypeCode::Cplx
            }
            Some(b's') => {
                len = 3;
                TypeCode::Int
            }
            _ => TypeCode::Int,
        };
        if bytes.len() == len {
            args.default_radix = radix;
            args.default_type = type_code;
            args.n_default += 1;
            updated = true;
        }
    }
    if (option == b'o' || option == b'm') && bytes.len() == len {
        args.output_radix = radix;
        args.n_output += 1;
        updated = true;
    }
    updated
}

fn double_flag_option(arg: &str, args: &mut Args) -> bool {
    if arg == "help" {
        args.n_help += 1;
        return true;
    }
    false
}
