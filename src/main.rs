mod help;
mod repl;

use self::repl::Repl;
use pcalc::{interpret_arg, Args, Calculator};
use std::{env, process::ExitCode};

fn main() -> ExitCode {
    let mut args = Args::default();
    for arg in env::args().skip(1) {
        // NOTE: version takes precedence over everything else
        if arg == "-V" || arg == "--version" {
            version();
            return ExitCode::SUCCESS;
        }
        interpret_arg(&arg, '-', &mut args);
    }

    let usable = args.n_help == 0
        && args.n_default < 2
        && args.n_output < 2
        && args.n_word_size < 2
        && args.n_precision < 2
        && args.n_normalized < 2
        && args.n_other < 2;
    if !usable {
        let misused = args.n_default
            + args.n_output
            + args.n_word_size
            + args.n_precision
            + args.n_normalized
            + args.n_other
            > 0;
        if misused {
            println!("Too many or invalid arguments.");
        }
        help::print();
        return if args.n_help > 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let mut calc = Calculator::with_args(&args);
    if args.other_arg.is_empty() {
        match Repl::new(calc) {
            Ok(mut repl) => match repl.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("{err}");
                    ExitCode::FAILURE
                }
            },
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        }
    } else {
        // expression provided as argument
        evaluate_line(&mut calc, &args.other_arg);
        ExitCode::SUCCESS
    }
}

fn evaluate_line(calc: &mut Calculator, line: &str) {
    match calc.evaluate(line) {
        Ok(eval) => {
            if eval.help_requested {
                help::print();
            }
            if let Some(val) = eval.value {
                println!("{}", calc.render(&val));
            }
        }
        Err(err) => print!("{}", err.report(line)),
    }
}

fn version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}
