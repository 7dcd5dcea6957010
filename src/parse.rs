// Recursive-descent parser that evaluates as it goes; no syntax tree. Each
// grammar production is a method and operator dispatch is a match over the
// value variant pair. Parser options, the variable table, and the last result
// persist across lines within one evaluator.

use crate::{
    error::{Error, ErrorKind},
    lex::{Lexer, Token, TokenKind},
    number::{self, NumberError},
    opts::{self, Args, OutputOpts, ParserOpts},
    value::{self, cplx, Value, FLOAT_PREC},
};
use rug::Complex;
use std::collections::HashMap;

type UnaryFn = fn(Complex) -> Complex;

// Builtin unary functions; resolvable as identifiers, shadowable by user
// variables.
const UNARY_FNS: &[(&str, UnaryFn)] = &[
    ("exp", Complex::exp),
    ("ln", Complex::ln),
    ("log10", Complex::log10),
    ("log2", cplx::log2),
    ("sqrt", Complex::sqrt),
    ("cbrt", cplx::cbrt),
    ("sin", Complex::sin),
    ("cos", Complex::cos),
    ("tan", Complex::tan),
    ("asin", Complex::asin),
    ("acos", Complex::acos),
    ("atan", Complex::atan),
    ("sinh", Complex::sinh),
    ("cosh", Complex::cosh),
    ("tanh", Complex::tanh),
    ("asinh", Complex::asinh),
    ("acosh", Complex::acosh),
    ("atanh", Complex::atanh),
    ("gamma", cplx::tgamma),
    ("lgamma", cplx::lgamma),
    ("arg", cplx::arg),
    ("norm", cplx::norm),
    ("conj", Complex::conj),
    ("proj", cplx::proj),
];

const INTERNAL_CONSTS: &[&str] = &["pi", "e", "i", "last"];

fn unary_fn(name: &str) -> Option<UnaryFn> {
    UNARY_FNS
        .iter()
        .find_map(|&(id, f)| (id == name).then_some(f))
}

fn is_internal(name: &str) -> bool {
    unary_fn(name).is_some() || INTERNAL_CONSTS.contains(&name)
}

#[derive(Debug)]
pub struct Evaluation {
    pub help_requested: bool,
    pub value: Option<Value>,
}

type EvalResult = Result<Value, Error>;

pub(crate) struct Evaluator {
    opts: ParserOpts,
    vars: HashMap<Box<str>, Value>,
    last: Value,
}

impl Evaluator {
    pub(crate) fn new(opts: ParserOpts) -> Self {
        Self {
            opts,
            vars: HashMap::new(),
            // NaN propagates visibly if a fresh `last` is used in arithmetic
            last: Value::Cplx(cplx::nan()),
        }
    }

    pub(crate) fn word_size(&self) -> value::WordSize {
        self.opts.word_size
    }

    pub(crate) fn evaluate(
        &mut self,
        input: &str,
        out: &mut OutputOpts,
    ) -> Result<Evaluation, Error> {
        let mut lexer = Lexer::new(input, self.opts.default_radix);

        // <input> ::= "help"
        //           | [ <option> ]... [ "delete" <identifier> | <math_expr> ]
        if lexer.peek().kind == TokenKind::Help && lexer.peek2().kind == TokenKind::End {
            return Ok(Evaluation {
                help_requested: true,
                value: None,
            });
        }

        let mut help_requested = false;
        if lexer.peek().kind == TokenKind::Option {
            let mut args = Args::default();
            while lexer.peek().kind == TokenKind::Option {
                let token = lexer.get();
                opts::interpret_arg(token.lexeme, '@', &mut args);
                if args.n_other > 0 {
                    return Err(Error::new(ErrorKind::InvalidOption, &token));
                }
                if args.n_default > 1
                    || args.n_output > 1
                    || args.n_word_size > 1
                    || args.n_precision > 1
                    || args.n_normalized > 1
                {
                    return Err(Error::new(ErrorKind::TooManyOptions, &token));
                }
            }
            help_requested = args.n_help > 0;
            if args.n_default > 0 {
                self.opts.default_type = args.default_type;
                self.opts.default_radix = args.default_radix;
                lexer.set_default_radix(args.default_radix);
            }
            if args.n_output > 0 {
                out.radix = args.output_radix;
            }
            if args.n_word_size > 0 {
                self.opts.word_size = args.word_size;
            }
            if args.n_precision > 0 {
                out.precision = args.precision;
            }
            if args.n_normalized > 0 {
                out.normalized = args.normalized;
            }
        }

        if lexer.peek().kind == TokenKind::End {
            return Ok(Evaluation {
                help_requested,
                value: None,
            });
        }

        if lexer.peek().kind == TokenKind::Delete {
            lexer.get();
            self.delete(&mut lexer)?;
            return Ok(Evaluation {
                help_requested,
                value: None,
            });
        }

        let val = self.math_expr(&mut lexer)?;

        if lexer.peek().kind == TokenKind::Option {
            let token = lexer.peek();
            return Err(Error::new(ErrorKind::OptionMustPrefaceMathExpr, &token));
        }
        let token = lexer.get();
        if token.kind != TokenKind::End {
            return Err(Error::new(ErrorKind::SyntaxError, &token));
        }

        self.last = val.clone();
        Ok(Evaluation {
            help_requested,
            value: Some(val),
        })
    }

    fn delete(&mut self, lexer: &mut Lexer<'_>) -> Result<(), Error> {
        let token = lexer.get();
        if token.kind != TokenKind::Identifier {
            return Err(Error::new(ErrorKind::VariableIdentifierExpected, &token));
        }
        if self.vars.remove(token.lexeme).is_none() {
            return Err(if is_internal(token.lexeme) {
                Error::new(ErrorKind::CantDeleteInternal, &token)
            } else {
                Error::new(ErrorKind::UndefinedIdentifier, &token)
            });
        }
        let token = lexer.get();
        if token.kind != TokenKind::End {
            return Err(Error::new(ErrorKind::SyntaxError, &token));
        }
        Ok(())
    }

    // <math_expr> ::= <bxor_expr> [ "|" <bxor_expr> ]...
    fn math_expr(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        let mut lval = self.bxor_expr(lexer)?;
        while lexer.peek().kind == TokenKind::BOr {
            let op = lexer.get();
            let rval = self.bxor_expr(lexer)?;
            lval = self.bitwise(lval, rval, &op, |a, b| a | b)?;
        }
        Ok(lval)
    }

    // <bxor_expr> ::= <band_expr> [ "^|" <band_expr> ]...
    fn bxor_expr(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        let mut lval = self.band_expr(lexer)?;
        while lexer.peek().kind == TokenKind::BXor {
            let op = lexer.get();
            let rval = self.band_expr(lexer)?;
            lval = self.bitwise(lval, rval, &op, |a, b| a ^ b)?;
        }
        Ok(lval)
    }

    // <band_expr> ::= <shift_expr> [ "&" <shift_expr> ]...
    fn band_expr(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        let mut lval = self.shift_expr(lexer)?;
        while lexer.peek().kind == TokenKind::BAnd {
            let op = lexer.get();
            let rval = self.shift_expr(lexer)?;
            lval = self.bitwise(lval, rval, &op, |a, b| a & b)?;
        }
        Ok(lval)
    }

    // <shift_expr> ::= <additive_expr> [ ( "<<" | ">>" ) <additive_expr> ]...
    fn shift_expr(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        let mut lval = self.additive_expr(lexer)?;
        loop {
            let kind = lexer.peek().kind;
            if kind != TokenKind::Shl && kind != TokenKind::Shr {
                break;
            }
            let op = lexer.get();
            let rval = self.additive_expr(lexer)?;
            lval = self.shift(lval, rval, &op, kind == TokenKind::Shl)?;
        }
        Ok(lval)
    }

    // <additive_expr> ::= <term> [ ( "+" | "-" ) <term> ]...
    fn additive_expr(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        let mut lval = self.term(lexer)?;
        loop {
            match lexer.peek().kind {
                TokenKind::Add => {
                    lexer.get();
                    let rval = self.term(lexer)?;
                    lval = self.arith(lval, rval, |a, b| a + b, u128::wrapping_add, i128::wrapping_add);
                }
                TokenKind::Sub => {
                    lexer.get();
                    let rval = self.term(lexer)?;
                    lval = self.arith(lval, rval, |a, b| a - b, u128::wrapping_sub, i128::wrapping_sub);
                }
                _ => break,
            }
        }
        Ok(lval)
    }

    // <term> ::= <factor> [ ( "*" | "/" | "%" ) <factor> | <juxtaposed> ]...
    // juxtaposition is implicit multiplication at the same precedence
    fn term(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        let mut lval = self.factor(lexer)?;
        loop {
            match lexer.peek().kind {
                TokenKind::Mul => {
                    lexer.get();
                    let rval = self.factor(lexer)?;
                    lval = self.mul(lval, rval);
                }
                TokenKind::Div => {
                    let op = lexer.get();
                    let rval = self.factor(lexer)?;
                    lval = self.div(lval, rval, &op)?;
                }
                TokenKind::Mod => {
                    let op = lexer.get();
                    let rval = self.factor(lexer)?;
                    lval = self.modulo(lval, rval, &op)?;
                }
                TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::LParen
                | TokenKind::BNot
                | TokenKind::Help => {
                    let rval = self.factor(lexer)?;
                    lval = self.mul(lval, rval);
                }
                _ => break,
            }
        }
        Ok(lval)
    }

    // <factor> ::= "-" <number>  (unless a postfix or power op follows)
    //            | ( "-" | "+" | "~" ) <factor>
    //            | <base> [ "!" | "!!" | <mfac> ]... [ "**" <factor> ]
    fn factor(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        match lexer.peek().kind {
            TokenKind::Sub => {
                lexer.get();
                // fold the sign into the literal so the most negative word
                // value is representable
                if lexer.peek().kind == TokenKind::Number
                    && !matches!(
                        lexer.peek2().kind,
                        TokenKind::Fac | TokenKind::Dfac | TokenKind::Mfac | TokenKind::Pow
                    )
                {
                    return self.number(lexer, true);
                }
                let val = self.factor(lexer)?;
                return Ok(self.neg(val));
            }
            TokenKind::Add => {
                lexer.get();
                return self.factor(lexer);
            }
            TokenKind::BNot => {
                let op = lexer.get();
                let val = self.factor(lexer)?;
                return self.bnot(val, &op);
            }
            _ => {}
        }

        let mut lval = self.base(lexer)?;

        loop {
            match lexer.peek().kind {
                TokenKind::Fac => {
                    lexer.get();
                    lval = Value::Cplx(cplx::tgamma(
                        lval.to_cplx() + Complex::with_val(FLOAT_PREC, 1),
                    ));
                }
                TokenKind::Dfac => {
                    lexer.get();
                    lval = Value::Cplx(cplx::dfac(lval.to_cplx()));
                }
                TokenKind::Mfac => {
                    let op = lexer.get();
                    return Err(Error::new(ErrorKind::MfacUnsupported, &op));
                }
                _ => break,
            }
        }

        // exponentiation is right-associative: recurse instead of looping
        if lexer.peek().kind == TokenKind::Pow {
            lexer.get();
            let rval = self.factor(lexer)?;
            lval = self.pow(lval, rval);
        }

        Ok(lval)
    }

    // <base> ::= <number> | <identifier_expr> | "(" <math_expr> ")"
    fn base(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        let token = lexer.peek();
        match token.kind {
            TokenKind::Number => self.number(lexer, false),
            TokenKind::Identifier => self.identifier_expr(lexer),
            TokenKind::LParen => self.group(lexer),
            TokenKind::Help => Err(Error::new(ErrorKind::HelpInvalidHere, &token)),
            TokenKind::End => Err(Error::new(ErrorKind::UnexpectedEndOfInput, &token)),
            _ => Err(Error::new(ErrorKind::SyntaxError, &token)),
        }
    }

    // <identifier_expr> ::= <identifier> "=" <math_expr>
    //                     | <identifier>
    //                     | <unary_fn_identifier> <group>
    fn identifier_expr(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        let token = lexer.get();
        let name = token.lexeme;

        let val = if lexer.peek().kind == TokenKind::Eq {
            lexer.get();
            // the binding commits only if the right side succeeds; user
            // bindings shadow builtins by lookup order
            let val = self.math_expr(lexer)?;
            self.vars.insert(name.into(), val.clone());
            val
        } else if let Some(val) = self.vars.get(name) {
            val.clone()
        } else if let Some(f) = unary_fn(name) {
            if lexer.peek().kind != TokenKind::LParen {
                return Err(Error::new(ErrorKind::FunctionArgExpected, &token));
            }
            let arg = self.group(lexer)?;
            Value::Cplx(f(arg.to_cplx()))
        } else {
            match name {
                "pi" => Value::Cplx(Complex::with_val(FLOAT_PREC, &*cplx::PI)),
                "e" => Value::Cplx(Complex::with_val(FLOAT_PREC, &*cplx::E)),
                "i" => Value::Cplx(cplx::imaginary_unit()),
                "last" => self.last.clone(),
                _ => return Err(Error::new(ErrorKind::UndefinedIdentifier, &token)),
            }
        };

        // re-trim in case the word size changed since the value was stored
        Ok(val.trim(self.opts.word_size))
    }

    // <group> ::= "(" <math_expr> ")"
    fn group(&mut self, lexer: &mut Lexer<'_>) -> EvalResult {
        lexer.get(); // caller assures the left parenthesis
        let val = self.math_expr(lexer)?;
        let token = lexer.get();
        if token.kind != TokenKind::RParen {
            return Err(Error::expected(TokenKind::RParen, &token));
        }
        Ok(val)
    }

    fn number(&mut self, lexer: &mut Lexer<'_>, negative: bool) -> EvalResult {
        let token = lexer.get();
        number::decode(token.lexeme, negative, &self.opts).map_err(|e| {
            Error::new(
                match e {
                    NumberError::OutOfRange => ErrorKind::OutOfRange,
                    NumberError::Invalid => ErrorKind::InvalidNumber,
                },
                &token,
            )
        })
    }

    // ---- operator dispatch over the variant pair ----

    fn arith(
        &self,
        a: Value,
        b: Value,
        fc: impl Fn(Complex, Complex) -> Complex,
        fu: impl Fn(u128, u128) -> u128,
        fi: impl Fn(i128, i128) -> i128,
    ) -> Value {
        let ws = self.opts.word_size;
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => Value::Int(value::trim_int(fi(x, y), ws)),
            (a, b) if a.is_integer() && b.is_integer() => {
                // mixed signedness resolves unsigned over the full container
                Value::Uint(value::trim_uint(fu(a.bits128(), b.bits128()), ws))
            }
            (a, b) => Value::Cplx(fc(a.to_cplx(), b.to_cplx())),
        }
    }

    fn mul(&self, a: Value, b: Value) -> Value {
        self.arith(a, b, |x, y| x * y, u128::wrapping_mul, i128::wrapping_mul)
    }

    fn div(&self, a: Value, b: Value, op: &Token<'_>) -> EvalResult {
        if a.is_integer() && b.is_integer() {
            if b.bits128() == 0 {
                return Err(Error::new(ErrorKind::IntegerDivisionBy0, op));
            }
            let ws = self.opts.word_size;
            return Ok(match (a, b) {
                // -MIN / -1 overflows the word, hence the trim
                (Value::Int(x), Value::Int(y)) => {
                    Value::Int(value::trim_int(x.wrapping_div(y), ws))
                }
                (a, b) => Value::Uint(value::trim_uint(a.bits128() / b.bits128(), ws)),
            });
        }
        Ok(Value::Cplx(cplx::div(a.to_cplx(), b.to_cplx())))
    }

    fn modulo(&self, a: Value, b: Value, op: &Token<'_>) -> EvalResult {
        let ws = self.opts.word_size;
        let a = a
            .coerce_int(ws)
            .ok_or_else(|| Error::new(ErrorKind::InvalidLeftOperand, op))?;
        let b = b
            .coerce_int(ws)
            .ok_or_else(|| Error::new(ErrorKind::InvalidRightOperand, op))?;
        if b.bits128() == 0 {
            return Err(Error::new(ErrorKind::IntegerDivisionBy0, op));
        }
        Ok(match (a, b) {
            (Value::Int(x), Value::Int(y)) => Value::Int(value::trim_int(x.wrapping_rem(y), ws)),
            (a, b) => Value::Uint(value::trim_uint(a.bits128() % b.bits128(), ws)),
        })
    }

    // |, ^| and & work on bit patterns and produce the unsigned variant
    fn bitwise(
        &self,
        a: Value,
        b: Value,
        op: &Token<'_>,
        f: impl Fn(u128, u128) -> u128,
    ) -> EvalResult {
        let ws = self.opts.word_size;
        let a = a
            .coerce_int(ws)
            .ok_or_else(|| Error::new(ErrorKind::InvalidLeftOperand, op))?;
        let b = b
            .coerce_int(ws)
            .ok_or_else(|| Error::new(ErrorKind::InvalidRightOperand, op))?;
        Ok(Value::Uint(value::trim_uint(
            f(a.bits128(), b.bits128()),
            ws,
        )))
    }

    fn shift(&self, a: Value, b: Value, op: &Token<'_>, left: bool) -> EvalResult {
        let ws = self.opts.word_size;
        let a = a
            .coerce_int(ws)
            .ok_or_else(|| Error::new(ErrorKind::InvalidLeftOperand, op))?;
        let b = b
            .coerce_int(ws)
            .ok_or_else(|| Error::new(ErrorKind::InvalidRightOperand, op))?;
        let n = match b {
            Value::Int(v) => {
                if v < 0 {
                    return Err(Error::new(ErrorKind::NegativeShiftInvalid, op));
                }
                v as u128
            }
            Value::Uint(v) => v,
            Value::Cplx(_) => unreachable!("coerced operand"),
        };
        // shifting past the word width saturates instead of wrapping the
        // shift count
        let in_range = n < u128::from(ws.bits());
        Ok(match a {
            Value::Int(x) => Value::Int(if left {
                if in_range {
                    value::trim_int(x << n, ws)
                } else {
                    0
                }
            } else if in_range {
                x >> n // arithmetic shift
            } else if x < 0 {
                -1
            } else {
                0
            }),
            Value::Uint(x) => Value::Uint(if !in_range {
                0
            } else if left {
                value::trim_uint(x << n, ws)
            } else {
                x >> n
            }),
            Value::Cplx(_) => unreachable!("coerced operand"),
        })
    }

    fn pow(&self, a: Value, b: Value) -> Value {
        let ws = self.opts.word_size;
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => Value::Int(if y < 0 {
                0
            } else {
                value::trim_int(value::pow_wrapping(x as u128, y as u128) as i128, ws)
            }),
            (Value::Int(x), Value::Uint(y)) => {
                Value::Int(value::trim_int(value::pow_wrapping(x as u128, y) as i128, ws))
            }
            (Value::Uint(x), Value::Int(y)) => Value::Uint(if y < 0 {
                0
            } else {
                value::trim_uint(value::pow_wrapping(x, y as u128), ws)
            }),
            (Value::Uint(x), Value::Uint(y)) => {
                Value::Uint(value::trim_uint(value::pow_wrapping(x, y), ws))
            }
            (a, b) => Value::Cplx(cplx::pow(a.to_cplx(), b.to_cplx())),
        }
    }

    fn neg(&self, v: Value) -> Value {
        let ws = self.opts.word_size;
        match v {
            Value::Cplx(z) => Value::Cplx(-z),
            Value::Uint(x) => Value::Uint(value::trim_uint(x.wrapping_neg(), ws)),
            Value::Int(x) => Value::Int(value::trim_int(x.wrapping_neg(), ws)),
        }
    }

    fn bnot(&self, v: Value, op: &Token<'_>) -> EvalResult {
        let ws = self.opts.word_size;
        let v = v
            .coerce_int(ws)
            .ok_or_else(|| Error::new(ErrorKind::InvalidOperand, op))?;
        Ok(match v {
            Value::Uint(x) => Value::Uint(value::trim_uint(!x, ws)),
            Value::Int(x) => Value::Int(value::trim_int(!x, ws)),
            Value::Cplx(_) => unreachable!("coerced operand"),
        })
    }
}
