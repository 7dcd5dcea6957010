mod cursor;
mod scan;

pub(crate) use self::cursor::Cursor;
use self::scan::Scanner;
use crate::value::Radix;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Token<'txt> {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: &'txt str,
    pub(crate) offset: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Unspecified,
    End,
    Number,
    Identifier,
    Option,
    Help,
    Delete,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Fac,
    Dfac,
    Mfac,
    LParen,
    RParen,
    Shl,
    Shr,
    BAnd,
    BOr,
    BXor,
    BNot,
    Eq,
}

// Text suitable for parser error messages.
impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unspecified => "unspecified",
            Self::End => "end",
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::Option => "option",
            Self::Help => "\"help\"",
            Self::Delete => "\"delete\"",
            Self::Add => "\"+\"",
            Self::Sub => "\"-\"",
            Self::Mul => "\"*\"",
            Self::Div => "\"/\"",
            Self::Mod => "\"%\"",
            Self::Pow => "\"**\"",
            Self::Fac => "\"!\"",
            Self::Dfac => "\"!!\"",
            Self::Mfac => "multifactorial",
            Self::LParen => "\"(\"",
            Self::RParen => "\")\"",
            Self::Shl => "\"<<\"",
            Self::Shr => "\">>\"",
            Self::BAnd => "\"&\"",
            Self::BOr => "\"|\"",
            Self::BXor => "\"^|\"",
            Self::BNot => "\"~\"",
            Self::Eq => "\"=\"",
        })
    }
}

pub(crate) fn is_radix_digit(b: u8, radix: Radix) -> bool {
    (b as char).to_digit(radix.value()).is_some()
}

// Two-token lookahead over the scanner; kept separate so the scanner stays a
// single-pass state machine.
pub(crate) struct Lexer<'txt> {
    scanner: Scanner<'txt>,
    peeked: [Option<Token<'txt>>; 2],
}

impl<'txt> Lexer<'txt> {
    pub(crate) fn new(input: &'txt str, default_radix: Radix) -> Self {
        Self {
            scanner: Scanner::new(input, default_radix),
            peeked: [None, None],
        }
    }

    pub(crate) fn set_default_radix(&mut self, radix: Radix) {
        self.scanner.set_default_radix(radix);
    }

    pub(crate) fn peek(&mut self) -> Token<'txt> {
        if self.peeked[0].is_none() {
            self.peeked[0] = Some(self.scanner.next_token());
        }
        self.peeked[0].unwrap()
    }

    pub(crate) fn peek2(&mut self) -> Token<'txt> {
        self.peek();
        if self.peeked[1].is_none() {
            self.peeked[1] = Some(self.scanner.next_token());
        }
        self.peeked[1].unwrap()
    }

    pub(crate) fn get(&mut self) -> Token<'txt> {
        match self.peeked[0].take() {
            Some(t) => {
                self.peeked[0] = self.peeked[1].take();
                t
            }
            None => self.scanner.next_token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input, Radix::Dec);
        let mut out = Vec::new();
        loop {
            let t = lexer.get();
            out.push(t.kind);
            if t.kind == TokenKind::End || t.kind == TokenKind::Unspecified {
                break;
            }
        }
        out
    }

    #[test]
    fn lookahead_caches_two() {
        let mut lexer = Lexer::new("1 + 2", Radix::Dec);

        assert_eq!(lexer.peek().kind, TokenKind::Number);
        assert_eq!(lexer.peek2().kind, TokenKind::Add);
        assert_eq!(lexer.peek().kind, TokenKind::Number);

        let t = lexer.get();

        assert_eq!(t.kind, TokenKind::Number);
        assert_eq!(t.lexeme, "1");
        assert_eq!(lexer.peek().kind, TokenKind::Add);
        assert_eq!(lexer.peek2().kind, TokenKind::Number);
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds("+ - * / % ** ( ) << >> & | ^| ~ ="),
            vec![
                TokenKind::Add,
                TokenKind::Sub,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Mod,
                TokenKind::Pow,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::BAnd,
                TokenKind::BOr,
                TokenKind::BXor,
                TokenKind::BNot,
                TokenKind::Eq,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn caret_is_pow() {
        assert_eq!(kinds("2^3"), vec![TokenKind::Number, TokenKind::Pow, TokenKind::Number, TokenKind::End]);
    }

    #[test]
    fn bang_runs() {
        assert_eq!(kinds("5!"), vec![TokenKind::Number, TokenKind::Fac, TokenKind::End]);
        assert_eq!(kinds("5!!"), vec![TokenKind::Number, TokenKind::Dfac, TokenKind::End]);
        assert_eq!(kinds("5!!!"), vec![TokenKind::Number, TokenKind::Mfac, TokenKind::End]);
        assert_eq!(kinds("5!!!!!"), vec![TokenKind::Number, TokenKind::Mfac, TokenKind::End]);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(kinds("help"), vec![TokenKind::Help, TokenKind::End]);
        assert_eq!(kinds("delete x"), vec![TokenKind::Delete, TokenKind::Identifier, TokenKind::End]);
        // keywords are case-sensitive
        assert_eq!(kinds("Help"), vec![TokenKind::Identifier, TokenKind::End]);
        assert_eq!(kinds("_foo9"), vec![TokenKind::Identifier, TokenKind::End]);
    }

    #[test]
    fn option_token() {
        let mut lexer = Lexer::new("@w16 1", Radix::Dec);

        let t = lexer.get();

        assert_eq!(t.kind, TokenKind::Option);
        assert_eq!(t.lexeme, "@w16");
        assert_eq!(t.offset, 0);
        assert_eq!(lexer.get().kind, TokenKind::Number);
    }

    #[test]
    fn double_at_option() {
        let mut lexer = Lexer::new("@@help", Radix::Dec);

        let t = lexer.get();

        assert_eq!(t.kind, TokenKind::Option);
        assert_eq!(t.lexeme, "@@help");
    }

    #[test]
    fn stray_char_is_unspecified() {
        let mut lexer = Lexer::new("$", Radix::Dec);

        let t = lexer.get();

        assert_eq!(t.kind, TokenKind::Unspecified);
        assert_eq!(t.offset, 0);
    }

    #[test]
    fn lone_shift_half_is_unspecified() {
        assert_eq!(kinds("1 < 2"), vec![TokenKind::Number, TokenKind::Unspecified]);
    }

    #[test]
    fn end_token_offset() {
        let mut lexer = Lexer::new("ab ", Radix::Dec);

        lexer.get();
        let t = lexer.get();

        assert_eq!(t.kind, TokenKind::End);
        assert_eq!(t.offset, 3);
        assert_eq!(t.lexeme, "");
    }

    mod numbers {
        use super::*;

        fn first_lexeme(input: &str, radix: Radix) -> (TokenKind, String) {
            let mut lexer = Lexer::new(input, radix);
            let t = lexer.get();
            (t.kind, t.lexeme.to_owned())
        }

        #[test]
        fn plain_integer() {
            assert_eq!(first_lexeme("123", Radix::Dec), (TokenKind::Number, "123".to_owned()));
        }

        #[test]
        fn with_suffix() {
            assert_eq!(first_lexeme("123u+4", Radix::Dec), (TokenKind::Number, "123u".to_owned()));
        }

        #[test]
        fn prefixed() {
            assert_eq!(first_lexeme("0x1f+1", Radix::Dec), (TokenKind::Number, "0x1f".to_owned()));
            assert_eq!(first_lexeme("0b1010", Radix::Dec), (TokenKind::Number, "0b1010".to_owned()));
            assert_eq!(first_lexeme("0o17", Radix::Dec), (TokenKind::Number, "0o17".to_owned()));
        }

        #[test]
        fn fraction_and_exponent() {
            assert_eq!(first_lexeme("3.25e+2*2", Radix::Dec), (TokenKind::Number, "3.25e+2".to_owned()));
            assert_eq!(first_lexeme("3.25e2", Radix::Dec), (TokenKind::Number, "3.25e2".to_owned()));
            assert_eq!(first_lexeme(".5", Radix::Dec), (TokenKind::Number, ".5".to_owned()));
        }

        #[test]
        fn hex_float_with_p_exponent() {
            assert_eq!(first_lexeme("0x1.8p+3", Radix::Dec), (TokenKind::Number, "0x1.8p+3".to_owned()));
        }

        #[test]
        fn p_exponent_in_hex_radix() {
            assert_eq!(first_lexeme("1.8p+3", Radix::Hex), (TokenKind::Number, "1.8p+3".to_owned()));
        }

        #[test]
        fn exponent_sign_needs_digits() {
            // "1e+" with no digits: the exponent is not absorbed
            assert_eq!(first_lexeme("1e+", Radix::Dec), (TokenKind::Number, "1e".to_owned()));
        }

        #[test]
        fn prefix_not_taken_when_letter_is_digit() {
            // in hex, 'd' is a digit so "0d" starts a plain number
            assert_eq!(first_lexeme("0dff", Radix::Hex), (TokenKind::Number, "0dff".to_owned()));
        }

        #[test]
        fn disambiguating_prefix() {
            // 0dx forces decimal when the default radix is hex
            assert_eq!(first_lexeme("0dx15", Radix::Hex), (TokenKind::Number, "0dx15".to_owned()));
            assert_eq!(first_lexeme("0bx101", Radix::Hex), (TokenKind::Number, "0bx101".to_owned()));
        }

        #[test]
        fn letters_absorbed_for_later_validation() {
            // the scanner delimits; the decoder rejects
            assert_eq!(first_lexeme("12qz", Radix::Dec), (TokenKind::Number, "12qz".to_owned()));
        }

        #[test]
        fn lone_dot_is_not_a_number() {
            let mut lexer = Lexer::new(".", Radix::Dec);
            assert_eq!(lexer.get().kind, TokenKind::Unspecified);
        }
    }
}
