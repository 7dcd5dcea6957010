pub(crate) fn print() {
    println!("{HELP_TEXT}");
}

const HELP_TEXT: &str = "\
Basic guide:
pcalc [<input defaults>] [<output base>] [<p notation>] [<mode>] [<precision>]
[<int word size>] [-h] [--help] [<expression>]

<expression>: A mathematical expression, e.g.: 2+3*6. If omitted then
expressions will continuously be input from stdin until end of input or a
blank line. Exception: if <expression> is \"help\" then this content will be
printed.

<input defaults>: Specifies the default representation type and default
numeric base for numbers:
    -0b  - signed integer type, binary base; e.g.: 1010
    -0o  - signed integer type, octal base; e.g.: 12
    -0d  - signed integer type, decimal base; e.g.: 10
    -0x  - signed integer type, hexadecimal base; e.g.: 0a (prepend a number
           with 0 if it consists only of letter digits)
    -0bu - unsigned integer type, binary base (likewise -0ou, -0du, -0xu)
    -0dn - complex type, decimal base -- the default
    -0xn - complex type, hexadecimal base (hexadecimal floating point;
           likewise -0bn, -0on)
Complex type: Represents a complex number composed of a real and imaginary
part, both of which are high precision floating point (50 significant decimal
digits). A complex number can be given as a+b*i or, with implied
multiplication, a+bi; e.g.: 10+2i.
Exception: If a number is specified with a decimal point or exponent then it
will be represented as complex type; e.g., for -0x and -0xu, the numbers 0a.1
and 0a1p-4 will both be represented as complex type and interpreted in
hexadecimal base.

<output base>: Specifies the numeric base of the output:
    -ob - binary
    -oo - octal
    -od - decimal -- the default
    -ox - hexadecimal

<p notation>: Specifies how binary, octal and hexadecimal floating point
numbers are output:
    -pn - normalized scientific \"p\" notation -- the default
    -pu - unnormalized scientific \"p\" notation
Note: The \"p\" exponent is always the power of 2 expressed in decimal.

<mode>: Combines <input defaults> and <output base>: -mb (-0b -ob), -mo (-0o
-oo), -md (-0d -od), -mx (-0x -ox), -mbu (-0bu -ob), -mou (-0ou -oo), -mdu
(-0du -od), -mxu (-0xu -ox), -mdn (-0dn -od), -mxn (-0xn -ox).

<precision>: -pr<n> specifies the precision (number of significant digits) in
which floating point numbers are output; e.g., -pr15. The default is 25. 0 is
special and will cause numbers to be output in full precision, including
guard digits. Does not affect integer type numbers.

<int word size>: Specifies the word size for the integer types:
    -w8   -   8 bits
    -w16  -  16 bits
    -w32  -  32 bits
    -w64  -  64 bits
    -w128 - 128 bits -- the default
Note: this does not affect the complex type.

Options may also be provided in an expression (e.g., when input from stdin);
options provided this way begin with '@' instead of '-' (because '-' is the
subtraction/negation operator); e.g., @0x @w32

A number may optionally be given a prefix, suffix or both to specify its
numeric base and representation type, overriding the default ones.
Prefixes:
    0b - binary base; e.g.: 0b1010
    0o - octal base; e.g.: 0o12
    0d - decimal base; e.g.: 0d10
    0x - hexadecimal base; e.g.: 0xa
Suffixes:
    s    - signed integer type; e.g., 0b1010s, 10s
    u    - unsigned integer type; e.g., 0b1010u, 10u
    n    - complex type; e.g., 0xan
    none - if the number has a prefix (e.g., 0d10) then signed integer type;
           otherwise (e.g., 10) the default representation type
Exception: If a number has a decimal point or exponent then it will be
represented as complex type; e.g., 0xa.1 and 0xa1p-4 will both be
represented as complex type and interpreted in hexadecimal base.
Note: 0b and 0d cannot be used when the default numeric base is hexadecimal
because those are valid hexadecimal numbers. For that case, the 0bx and 0dx
prefixes can be used to specify binary base and decimal base respectively.

Examples: The following are different ways of expressing the number 314:
0b100111010 (binary signed integer type), 0o472u (octal unsigned integer
type), 314s (decimal signed integer type assuming decimal is the default
base), 0x13a (hexadecimal signed integer type), 0b1.0011101p+8 (normalized
binary floating point type), 0o472.0 (octal floating point type), 0o1.164p+8
(normalized octal floating point type), 0d3.14e+2 (decimal floating point
type), 0x13a.0 (hexadecimal floating point type), 0x1.3ap+8 (normalized
hexadecimal floating point type).

Available arithmetic operators:
    + (addition and unary plus) - (subtraction and negation)
    * (multiplication; also implied by juxtaposition, e.g. 2pi, 3(x+1))
    / (division) % (modulus) ^ ** (exponentiation) ! !! (factorial and
    double factorial) ( ) (grouping)

Available bitwise operators:
    ~ (not) & (and) | (or) ^| (xor) << >> (shift; algebraic for signed type)
Note: unlike C, C++ and many other programming languages, ^ means
exponentiation here, not bitwise xor; use ^| instead for bitwise xor.

Available symbolic values:
    pi, e (Euler's number), i (imaginary unit), last (last result); e.g.,
    e^(i*pi)+1

Available functions; e.g.: sin(5):
    exp - exp(n) is e raised to the power of n
    ln - natural (base e) log
    log10 - base 10 log
    log2 - base 2 log
    sqrt - square root
    cbrt - cubic root
    sin cos tan
    asin acos atan - arc functions
    sinh cosh tanh - hyperbolic functions
    asinh acosh atanh - inverse hyperbolic functions
    gamma
    lgamma - log gamma
    arg - phase angle
    norm - squared magnitude
    conj - conjugate
    proj - projection onto the Riemann sphere

Variables can be created and used in expressions, e.g.:
    approx_pi=22/7
    r=5
    approx_pi*r^2
Variable assignments can be chained, e.g.: x=y=2
A variable can be removed with the delete command, e.g.: delete r";
