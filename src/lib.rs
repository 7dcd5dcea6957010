mod error;
mod lex;
mod number;
mod opts;
mod output;
mod parse;
mod value;

pub use self::{
    error::{Error, ErrorKind, Report},
    lex::TokenKind,
    opts::{interpret_arg, Args, OutputOpts, ParserOpts, DEFAULT_PRECISION},
    parse::Evaluation,
    value::{Radix, TypeCode, Value, WordSize},
};
use self::{output::Printer, parse::Evaluator};

// One interactive calculator session: parser options, output options, the
// variable table and the last result persist across evaluated lines.
pub struct Calculator {
    eval: Evaluator,
    out: OutputOpts,
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_opts(ParserOpts::default(), OutputOpts::default())
    }

    pub fn with_opts(parser: ParserOpts, out: OutputOpts) -> Self {
        Self {
            eval: Evaluator::new(parser),
            out,
        }
    }

    pub fn with_args(args: &Args) -> Self {
        Self::with_opts(
            ParserOpts {
                default_type: args.default_type,
                default_radix: args.default_radix,
                word_size: args.word_size,
            },
            OutputOpts {
                radix: args.output_radix,
                precision: args.precision,
                normalized: args.normalized,
            },
        )
    }

    // Evaluates one line of input. In-expression options may mutate the
    // session; a returned error leaves all prior state intact.
    pub fn evaluate(&mut self, input: &str) -> Result<Evaluation, Error> {
        self.eval.evaluate(input, &mut self.out)
    }

    // Renders a value under the current output options, including the
    // type-and-base trailer.
    pub fn render(&self, val: &Value) -> String {
        Printer::new(val, self.out, self.eval.word_size()).to_string()
    }

    pub fn output_opts(&self) -> OutputOpts {
        self.out
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
