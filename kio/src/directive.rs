//! Format directive scanner
//!
//! A directive has the fixed shape
//!
//! ```text
//! %[flags][width][.precision][length]<conversion>
//! ```
//!
//! and is scanned in that order, one stage at a time. A stage that does not
//! match hands the same byte to the next stage; no stage runs twice.

/// What a directive renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionType {
    /// Unrecognized conversion, or the template ended mid-directive
    Invalid,
    /// `d`, `i`
    SignedInt,
    /// `u`
    UnsignedInt,
    /// `o`
    Octal,
    /// `x`, `X`
    Hex,
    /// `f`, `F`
    Float,
    /// `e`, `E`
    Scientific,
    /// `g`, `G`
    Shortest,
    /// `a`, `A`
    HexFloat,
    /// `c`
    Char,
    /// `s`
    Str,
    /// `p`
    Pointer,
    /// `n`
    StoreCount,
    /// `%%`
    Percent,
}

/// Directive flags, independently combinable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Flags = Flags(0);
    /// `-`: left-justify within width
    pub const LEFT_JUSTIFY: Flags = Flags(0x10);
    /// `0`: zero-pad within width
    pub const ZERO_PAD: Flags = Flags(0x01);
    /// `+`: prefix positive values with a plus
    pub const FORCE_SIGN: Flags = Flags(0x02);
    /// ` `: prefix positive values with a space
    pub const SPACE_SIGN: Flags = Flags(0x04);
    /// `#`: alternate form
    pub const ALT_FORM: Flags = Flags(0x08);

    /// Maps a flag character to its flag
    pub const fn from_byte(byte: u8) -> Option<Flags> {
        match byte {
            b'-' => Some(Self::LEFT_JUSTIFY),
            b'0' => Some(Self::ZERO_PAD),
            b'+' => Some(Self::FORCE_SIGN),
            b' ' => Some(Self::SPACE_SIGN),
            b'#' => Some(Self::ALT_FORM),
            _ => None,
        }
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl core::ops::BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

/// Width of the argument a numeric directive reads
///
/// `l` and `ll` are deliberately mapped the opposite way round from C:
/// a single `l` selects 64 bits and `ll` selects 32 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthModifier {
    /// No modifier
    #[default]
    Int,
    /// `hh`
    Char,
    /// `h`
    Short,
    /// `ll`
    Int32,
    /// `l`
    Int64,
    /// `j`
    IntMax,
    /// `z`
    Size,
    /// `t`
    PtrDiff,
    /// `L`
    LongDouble,
}

/// Width or precision field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldSpec {
    #[default]
    Unspecified,
    Literal(usize),
    /// `*`: supplied by the next argument
    FromArgument,
}

/// One parsed `%...` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub conversion: ConversionType,
    pub flags: Flags,
    pub length: LengthModifier,
    pub width: FieldSpec,
    pub precision: FieldSpec,
    /// The conversion letter was the uppercase member of its pair
    pub uppercase: bool,
}

impl Default for Directive {
    fn default() -> Self {
        Self {
            conversion: ConversionType::Invalid,
            flags: Flags::NONE,
            length: LengthModifier::Int,
            width: FieldSpec::Unspecified,
            precision: FieldSpec::Unspecified,
            uppercase: false,
        }
    }
}

/// Conversion letter lookup: letter -> (type, uppercase)
pub const fn conversion_for(letter: u8) -> Option<(ConversionType, bool)> {
    use ConversionType::*;

    let entry = match letter {
        b'd' | b'i' => (SignedInt, false),
        b'u' => (UnsignedInt, false),
        b'o' => (Octal, false),
        b'x' => (Hex, false),
        b'X' => (Hex, true),
        b'f' => (Float, false),
        b'F' => (Float, true),
        b'e' => (Scientific, false),
        b'E' => (Scientific, true),
        b'g' => (Shortest, false),
        b'G' => (Shortest, true),
        b'a' => (HexFloat, false),
        b'A' => (HexFloat, true),
        b'c' => (Char, false),
        b's' => (Str, false),
        b'p' => (Pointer, false),
        b'n' => (StoreCount, false),
        b'%' => (Percent, false),
        _ => return None,
    };
    Some(entry)
}

/// Byte cursor over the directive body
struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Next byte, or `None` at the end of the slice or a NUL terminator
    fn peek(&self) -> Option<u8> {
        match self.input.get(self.pos) {
            Some(&0) | None => None,
            Some(&byte) => Some(byte),
        }
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn bump_if(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes a maximal run of decimal digits
    ///
    /// No overflow guard: oversized fields wrap.
    fn number(&mut self) -> usize {
        let mut value: usize = 0;
        while let Some(digit @ b'0'..=b'9') = self.peek() {
            value = value.wrapping_mul(10).wrapping_add((digit - b'0') as usize);
            self.bump();
        }
        value
    }

    /// `*` or a digit run; anything else leaves the field alone
    fn field(&mut self) -> Option<FieldSpec> {
        match self.peek()? {
            b'*' => {
                self.bump();
                Some(FieldSpec::FromArgument)
            }
            b'0'..=b'9' => Some(FieldSpec::Literal(self.number())),
            _ => None,
        }
    }
}

/// Scans one directive
///
/// `input` starts just past the `%`. Returns the directive and the number of
/// bytes consumed, counting the conversion character (or the offending
/// character when the directive is invalid). If the template ends inside the
/// directive, the count covers only the bytes that exist.
pub fn scan(input: &[u8]) -> (Directive, usize) {
    let mut directive = Directive::default();
    let mut s = Scanner { input, pos: 0 };

    while let Some(flag) = s.peek().and_then(Flags::from_byte) {
        directive.flags.insert(flag);
        s.bump();
    }

    if let Some(width) = s.field() {
        directive.width = width;
    }

    if s.bump_if(b'.') {
        match s.field() {
            // `.*` lands in width, not precision
            Some(FieldSpec::FromArgument) => directive.width = FieldSpec::FromArgument,
            Some(precision) => directive.precision = precision,
            None => {}
        }
    }

    match s.peek() {
        Some(b'h') => {
            s.bump();
            directive.length = if s.bump_if(b'h') {
                LengthModifier::Char
            } else {
                LengthModifier::Short
            };
        }
        Some(b'l') => {
            s.bump();
            directive.length = if s.bump_if(b'l') {
                LengthModifier::Int32
            } else {
                LengthModifier::Int64
            };
        }
        Some(b'j') => {
            s.bump();
            directive.length = LengthModifier::IntMax;
        }
        Some(b'z') => {
            s.bump();
            directive.length = LengthModifier::Size;
        }
        Some(b't') => {
            s.bump();
            directive.length = LengthModifier::PtrDiff;
        }
        Some(b'L') => {
            s.bump();
            directive.length = LengthModifier::LongDouble;
        }
        _ => {}
    }

    if let Some(letter) = s.peek() {
        s.bump();
        if let Some((conversion, uppercase)) = conversion_for(letter) {
            directive.conversion = conversion;
            directive.uppercase = uppercase;
        }
    }

    (directive, s.pos)
}
