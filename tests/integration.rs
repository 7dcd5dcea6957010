use pcalc::{Calculator, ErrorKind, Value};

struct Runner {
    calc: Calculator,
}

impl Runner {
    fn new() -> Self {
        Self {
            calc: Calculator::new(),
        }
    }

    fn show(&mut self, input: &str) -> String {
        let val = self.value(input);
        self.calc.render(&val)
    }

    fn value(&mut self, input: &str) -> Value {
        let r = self.calc.evaluate(input);
        assert!(r.is_ok(), "evaluation of {input:?} failed: {r:?}");
        let ev = r.unwrap();
        assert!(ev.value.is_some(), "no value for {input:?}");
        ev.value.unwrap()
    }

    fn parts(&mut self, input: &str) -> (f64, f64) {
        match self.value(input) {
            Value::Cplx(z) => (z.real().to_f64(), z.imag().to_f64()),
            v => panic!("expected complex for {input:?}, got {v:?}"),
        }
    }

    fn fail(&mut self, input: &str) -> ErrorKind {
        let r = self.calc.evaluate(input);
        assert!(r.is_err(), "evaluation of {input:?} unexpectedly succeeded");
        r.unwrap_err().kind()
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn arithmetic_with_precedence() {
        assert_eq!(Runner::new().show("2+3*6"), "20 (cplx base10)");
    }

    #[test]
    fn euler_identity_is_numerically_zero() {
        let (re, im) = Runner::new().parts("e^(i*pi)+1");
        assert!(re.abs() < 1e-30);
        assert!(im.abs() < 1e-30);
    }

    #[test]
    fn hex_pattern_reads_as_negative_signed() {
        let mut r = Runner::new();
        assert_eq!(r.show("@0du @w16 0xffff"), "-1 (int base10)");
    }

    #[test]
    fn bitwise_and_in_hex_output() {
        let mut r = Runner::new();
        assert_eq!(r.show("@ox 0xff & 0x0f"), "f (uint base16)");
    }

    #[test]
    fn addition_wraps_at_word_size() {
        let mut r = Runner::new();
        assert_eq!(r.show("@w8 0xff + 1"), "0 (int base10)");
    }

    #[test]
    fn division_by_zero() {
        let mut r = Runner::new();
        assert_eq!(r.fail("@0du 1/0"), ErrorKind::IntegerDivisionBy0);

        let mut r = Runner::new();
        assert_eq!(r.show("1.0/0"), "inf (cplx base10)");
    }

    #[test]
    fn unit_float_in_hex() {
        let mut r = Runner::new();
        assert_eq!(r.show("@ox 1.0"), "1p+0 (cplx base16)");
        let mut r = Runner::new();
        assert_eq!(r.show("@pu @ox 1.0"), "1p+0 (cplx base16)");
    }

    #[test]
    fn normalized_and_unnormalized_p_notation() {
        let mut r = Runner::new();
        assert_eq!(r.show("@pn @ox 255.0"), "1.fep+7 (cplx base16)");
        let mut r = Runner::new();
        assert_eq!(r.show("@pu @ox 255.0"), "ffp+0 (cplx base16)");
    }

    #[test]
    fn sin_of_pi_is_tiny_real() {
        let (re, im) = Runner::new().parts("sin(pi)");
        assert!(re.abs() < 1e-30);
        assert_eq!(im, 0.0);
    }

    #[test]
    fn gamma_and_factorials() {
        let mut r = Runner::new();
        assert_eq!(r.show("gamma(5)"), "24 (cplx base10)");
        assert_eq!(r.show("5!"), "120 (cplx base10)");
        assert_eq!(r.show("5!!"), "15 (cplx base10)");
    }
}

mod properties {
    use super::*;

    #[test]
    fn integer_results_stay_in_word_range() {
        let mut r = Runner::new();
        assert_eq!(r.show("@0du @w8 200+100"), "44 (uint base10)");
        assert_eq!(r.show("200*2"), "144 (uint base10)");
        assert_eq!(r.show("3**5"), "243 (uint base10)");
    }

    #[test]
    fn full_precision_hex_float_round_trips() {
        let mut r = Runner::new();
        let pi = r.value("pi");
        r.calc.evaluate("@ox @pr0").unwrap();
        let printed = r.calc.render(&pi);
        let literal = printed.trim_end_matches(" (cplx base16)");
        assert_ne!(literal, printed, "trailer missing in {printed:?}");

        let reread = r.value(&format!("0x{literal}"));
        assert_eq!(reread, pi);
    }

    #[test]
    fn full_precision_decimal_round_trips() {
        let mut r = Runner::new();
        let third = r.value("1/3");
        r.calc.evaluate("@pr0").unwrap();
        let printed = r.calc.render(&third);
        let literal = printed.trim_end_matches(" (cplx base10)");

        let reread = r.value(literal);
        assert_eq!(reread, third);
    }

    #[test]
    fn integer_radix_round_trips_as_bit_pattern() {
        let mut r = Runner::new();
        assert_eq!(r.show("@0d @w16 @ox -1"), "ffff (int base16)");
        // the pattern reads back as the same value
        assert_eq!(r.value("0xffff"), Value::Int(-1));
        assert_eq!(r.show("last"), "ffff (int base16)");
    }

    #[test]
    fn exponentiation_is_right_associative() {
        assert_eq!(Runner::new().show("2**3**2"), "512 (cplx base10)");
    }

    #[test]
    fn unary_minus_binds_looser_than_pow_unless_folded() {
        assert_eq!(Runner::new().show("-2**2"), "-4 (cplx base10)");
    }

    #[test]
    fn shift_saturation() {
        let mut r = Runner::new();
        assert_eq!(r.show("@0d @w16 -1 >> 40"), "-1 (int base10)");
        assert_eq!(r.show("21 >> 40"), "0 (int base10)");
        assert_eq!(r.show("21 << 16"), "0 (int base10)");
    }

    #[test]
    fn involutions() {
        let mut r = Runner::new();
        assert_eq!(r.show("@0d ~~21"), "21 (int base10)");
        assert_eq!(r.show("--21"), "21 (int base10)");
    }

    #[test]
    fn chained_assignment() {
        let mut r = Runner::new();
        assert_eq!(r.show("x = y = 5"), "5 (cplx base10)");
        assert_eq!(r.show("x+y"), "10 (cplx base10)");
    }

    #[test]
    fn complex_value_rendering() {
        let mut r = Runner::new();
        assert_eq!(r.show("2+3i"), "2+3i (cplx base10)");
        assert_eq!(r.show("i"), "i (cplx base10)");
        assert_eq!(r.show("-i"), "-i (cplx base10)");
        assert_eq!(r.show("2-i"), "2-i (cplx base10)");
    }

    #[test]
    fn options_persist_across_lines() {
        let mut r = Runner::new();
        r.calc.evaluate("@0x @w16").unwrap();
        assert_eq!(r.show("0ff"), "255 (int base10)");
        assert_eq!(r.value("7fff"), Value::Int(0x7fff));
    }

    #[test]
    fn caret_report_points_at_the_offending_token() {
        let mut r = Runner::new();
        let err = r.calc.evaluate("1 + frob").unwrap_err();
        assert_eq!(
            err.report("1 + frob").to_string(),
            "1 + frob\n    ^^^^\nError: undefined identifier.\n"
        );
    }

    #[test]
    fn error_leaves_last_untouched() {
        let mut r = Runner::new();
        r.value("7");
        assert_eq!(r.fail("3 +"), ErrorKind::UnexpectedEndOfInput);
        assert_eq!(r.show("last"), "7 (cplx base10)");
    }
}
