use crate::help;
use pcalc::Calculator;
use rustyline::{error::ReadlineError, DefaultEditor, Result};

const INPUT: &str = "> ";

pub(crate) struct Repl {
    calc: Calculator,
    editor: DefaultEditor,
}

impl Repl {
    pub(crate) fn new(calc: Calculator) -> Result<Self> {
        Ok(Self {
            calc,
            editor: DefaultEditor::new()?,
        })
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        loop {
            match self.editor.readline(INPUT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        break; // blank line ends the session
                    }
                    self.editor.add_history_entry(line)?;
                    self.runline(line);
                }
                Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn runline(&mut self, line: &str) {
        match self.calc.evaluate(line) {
            Ok(eval) => {
                if eval.help_requested {
                    help::print();
                }
                if let Some(val) = eval.value {
                    println!("{}", self.calc.render(&val));
                }
            }
            Err(err) => print!("{}", err.report(line)),
        }
    }
}
