//! The operand value model.
//!
//! Every register-like entity is an [`Operand`]: a narrow integer value
//! tagged with an [`OperandKind`]. Values are not validated on construction;
//! [`Operand::check`] is the validity predicate and must be called by code
//! that requires a well-formed operand.

use core::fmt;
use core::str::FromStr;

use crate::catalog;
use crate::error::ParseError;
use crate::lexer::Tokens;

/// The register class (or modifier) an operand belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandKind {
    /// 64-bit general-purpose register (`%rax`–`%r15`).
    R64,
    /// 32-bit general-purpose register (`%eax`–`%r15d`).
    R32,
    /// 16-bit general-purpose register (`%ax`–`%r15w`).
    R16,
    /// Low byte of a general-purpose register (`%al`–`%r15b`).
    R8,
    /// High byte of one of the first four general-purpose registers (`%ah`–`%bh`).
    Rh,
    /// 128-bit SSE register.
    Xmm,
    /// The fixed `%xmm0` operand that some SSE4.1 encodings read implicitly.
    /// Its only valid value is 0; it occupies the same physical slot as
    /// `%xmm0`.
    Xmm0,
    /// 256-bit AVX register.
    Ymm,
    /// A bit (or bit field) of the RFLAGS register.
    Eflags,
    /// Modifier: the 0x66 operand/address-size override prefix.
    Pref66,
    /// Modifier: the REX.W prefix.
    PrefRexW,
    /// Modifier: far variant of a call/jump/return.
    Far,
}

impl OperandKind {
    /// Whether this kind is a modifier pseudo-operand.
    #[must_use]
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            OperandKind::Pref66 | OperandKind::PrefRexW | OperandKind::Far
        )
    }

    /// Number of distinct valid values, or `None` for flags, whose valid
    /// values are not a contiguous range.
    #[must_use]
    pub fn slot_count(self) -> Option<u8> {
        match self {
            OperandKind::R64
            | OperandKind::R32
            | OperandKind::R16
            | OperandKind::R8
            | OperandKind::Xmm
            | OperandKind::Ymm => Some(16),
            OperandKind::Rh => Some(4),
            OperandKind::Eflags => None,
            OperandKind::Xmm0
            | OperandKind::Pref66
            | OperandKind::PrefRexW
            | OperandKind::Far => Some(1),
        }
    }
}

/// A typed operand identity: `(kind, value)`.
///
/// Equality, ordering and hashing consider the kind first and the value
/// second. For registers the value is the register number; for flags it is
/// the index of the flag's lowest bit in RFLAGS; modifiers are always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operand {
    kind: OperandKind,
    value: u8,
}

impl Operand {
    /// Build an operand without validating `value`. See [`Operand::check`].
    #[must_use]
    pub const fn new(kind: OperandKind, value: u8) -> Self {
        Self { kind, value }
    }

    /// The operand's kind tag.
    #[must_use]
    pub const fn kind(self) -> OperandKind {
        self.kind
    }

    /// The operand's raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Returns true if the value is in range for the kind.
    #[must_use]
    pub fn check(self) -> bool {
        match self.kind.slot_count() {
            Some(n) => self.value < n,
            None => catalog::flag_width(self.value).is_some(),
        }
    }

    /// Injective hash of `(kind, value)`.
    #[must_use]
    pub fn hash_code(self) -> u64 {
        ((self.kind as u64) << 8) | u64::from(self.value)
    }

    /// Exchange two operands in place.
    pub fn swap(&mut self, other: &mut Operand) {
        core::mem::swap(self, other);
    }

    /// Whether this operand is a modifier pseudo-operand.
    #[must_use]
    pub fn is_modifier(self) -> bool {
        self.kind.is_modifier()
    }

    /// Whether this is a general-purpose register of any width.
    #[must_use]
    pub fn is_gpr(self) -> bool {
        matches!(
            self.kind,
            OperandKind::R64
                | OperandKind::R32
                | OperandKind::R16
                | OperandKind::R8
                | OperandKind::Rh
        )
    }

    /// Whether this is an XMM or YMM register, including the fixed `%xmm0`.
    #[must_use]
    pub fn is_vector(self) -> bool {
        matches!(
            self.kind,
            OperandKind::Xmm | OperandKind::Xmm0 | OperandKind::Ymm
        )
    }

    /// Whether this is an RFLAGS bit or bit field.
    #[must_use]
    pub fn is_flag(self) -> bool {
        self.kind == OperandKind::Eflags
    }

    /// Width in bits: the register size, the declared width of a flag
    /// field, or 0 for modifiers and invalid flags.
    #[must_use]
    pub fn size_bits(self) -> u16 {
        match self.kind {
            OperandKind::R64 => 64,
            OperandKind::R32 => 32,
            OperandKind::R16 => 16,
            OperandKind::R8 | OperandKind::Rh => 8,
            OperandKind::Xmm | OperandKind::Xmm0 => 128,
            OperandKind::Ymm => 256,
            OperandKind::Eflags => catalog::flag_width(self.value).map_or(0, u16::from),
            OperandKind::Pref66 | OperandKind::PrefRexW | OperandKind::Far => 0,
        }
    }

    /// Parse one mnemonic as an operand of the given kind.
    ///
    /// Returns `None` if the mnemonic names nothing, or names an operand of
    /// a different kind. Modifiers never parse. The fixed `%xmm0` kind
    /// accepts only `%xmm0`.
    #[must_use]
    pub fn parse_att(kind: OperandKind, mnemonic: &str) -> Option<Operand> {
        let op = catalog::lookup(mnemonic)?;
        match kind {
            OperandKind::Xmm0 if op == catalog::XMM0 => Some(catalog::XMM0_FIXED),
            _ => (op.kind == kind).then_some(op),
        }
    }

    /// Read the next token of `tokens` as an operand of the given kind.
    ///
    /// # Errors
    ///
    /// Modifier kinds always fail with [`ParseError::ModifierNotReadable`]
    /// without consuming input. Otherwise fails with
    /// [`ParseError::UnexpectedEof`] or [`ParseError::UnknownOperand`]
    /// after consuming the token.
    pub fn read_att(kind: OperandKind, tokens: &mut Tokens<'_>) -> Result<Operand, ParseError> {
        if kind.is_modifier() {
            let span = tokens.peek().map_or_else(|| tokens.eof_span(), |t| t.span);
            return Err(ParseError::ModifierNotReadable { kind, span });
        }
        let span = tokens.eof_span();
        let tok = tokens.next().ok_or(ParseError::UnexpectedEof { span })?;
        Operand::parse_att(kind, tok.text).ok_or_else(|| ParseError::UnknownOperand {
            token: tok.text.into(),
            span: tok.span,
        })
    }

    /// Write the AT&T mnemonic. Modifiers write nothing.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors.
    pub fn write_att<W: fmt::Write>(self, w: &mut W) -> fmt::Result {
        if self.is_modifier() {
            return Ok(());
        }
        match catalog::mnemonic(self) {
            Some(name) => w.write_str(name),
            None => write!(w, "<invalid {:?} {}>", self.kind, self.value),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_att(f)
    }
}

impl FromStr for Operand {
    type Err = ParseError;

    /// Parse a single register or flag mnemonic, e.g. `%rax` or `%zf`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(s);
        let span = tokens.eof_span();
        let tok = tokens.next().ok_or(ParseError::UnexpectedEof { span })?;
        let op = catalog::lookup(tok.text).ok_or_else(|| ParseError::UnknownOperand {
            token: tok.text.into(),
            span: tok.span,
        })?;
        if let Some(extra) = tokens.next() {
            return Err(ParseError::TrailingInput {
                token: extra.text.into(),
                span: extra.span,
            });
        }
        Ok(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::*;
    use alloc::string::{String, ToString};

    #[test]
    fn check_accepts_declared_ranges() {
        for v in 0..16 {
            for kind in [
                OperandKind::R64,
                OperandKind::R32,
                OperandKind::R16,
                OperandKind::R8,
                OperandKind::Xmm,
                OperandKind::Ymm,
            ] {
                assert!(Operand::new(kind, v).check(), "{kind:?} {v}");
            }
        }
        for v in 0..4 {
            assert!(Operand::new(OperandKind::Rh, v).check());
        }
        assert!(PREF_66.check());
        assert!(PREF_REX_W.check());
        assert!(FAR.check());
    }

    #[test]
    fn check_rejects_out_of_range() {
        assert!(!Operand::new(OperandKind::R64, 16).check());
        assert!(!Operand::new(OperandKind::Xmm, 16).check());
        assert!(!Operand::new(OperandKind::Ymm, 255).check());
        assert!(!Operand::new(OperandKind::Rh, 4).check());
        assert!(!Operand::new(OperandKind::Far, 1).check());
        // Upper half of %iopl and anything past %id.
        assert!(!Operand::new(OperandKind::Eflags, 13).check());
        assert!(!Operand::new(OperandKind::Eflags, 22).check());
    }

    #[test]
    fn fixed_xmm0_has_one_value() {
        assert!(XMM0_FIXED.check());
        assert!(!Operand::new(OperandKind::Xmm0, 1).check());
        assert!(XMM0_FIXED.is_vector());
        assert!(!XMM0_FIXED.is_modifier());
        assert_eq!(XMM0_FIXED.size_bits(), 128);
        assert_eq!(XMM0_FIXED.to_string(), "%xmm0");
        assert_ne!(XMM0_FIXED, XMM0);
        assert_ne!(XMM0_FIXED.hash_code(), XMM0.hash_code());
    }

    #[test]
    fn fixed_xmm0_reads_only_xmm0() {
        let mut tokens = Tokens::new("%xmm0 %xmm1");
        assert_eq!(
            Operand::read_att(OperandKind::Xmm0, &mut tokens),
            Ok(XMM0_FIXED)
        );
        assert!(matches!(
            Operand::read_att(OperandKind::Xmm0, &mut tokens),
            Err(ParseError::UnknownOperand { ref token, .. }) if token == "%xmm1"
        ));
        // Untyped parsing keeps the ordinary class.
        assert_eq!("%xmm0".parse::<Operand>(), Ok(XMM0));
    }

    #[test]
    fn ordering_is_kind_then_value() {
        assert!(RAX < RCX);
        assert!(R15 < EAX);
        assert!(XMM15 < YMM0);
        assert_eq!(RAX.cmp(&RAX), core::cmp::Ordering::Equal);
        assert_ne!(RAX, EAX);
        assert_ne!(RAX.hash_code(), EAX.hash_code());
        assert_eq!(XMM3.hash_code(), Operand::new(OperandKind::Xmm, 3).hash_code());
    }

    #[test]
    fn swap_exchanges_values() {
        let mut a = RAX;
        let mut b = XMM7;
        a.swap(&mut b);
        assert_eq!(a, XMM7);
        assert_eq!(b, RAX);
    }

    #[test]
    fn size_bits_per_kind() {
        assert_eq!(RAX.size_bits(), 64);
        assert_eq!(R8D.size_bits(), 32);
        assert_eq!(R8W.size_bits(), 16);
        assert_eq!(SIL.size_bits(), 8);
        assert_eq!(AH.size_bits(), 8);
        assert_eq!(XMM0.size_bits(), 128);
        assert_eq!(YMM0.size_bits(), 256);
        assert_eq!(EFLAGS_CF.size_bits(), 1);
        assert_eq!(EFLAGS_IOPL.size_bits(), 2);
        assert_eq!(FAR.size_bits(), 0);
    }

    #[test]
    fn display_att() {
        assert_eq!(RAX.to_string(), "%rax");
        assert_eq!(R13D.to_string(), "%r13d");
        assert_eq!(BH.to_string(), "%bh");
        assert_eq!(YMM12.to_string(), "%ymm12");
        assert_eq!(EFLAGS_IOPL.to_string(), "%iopl");
    }

    #[test]
    fn modifiers_write_nothing() {
        let mut s = String::new();
        PREF_REX_W.write_att(&mut s).unwrap();
        FAR.write_att(&mut s).unwrap();
        assert_eq!(s, "");
        assert_eq!(PREF_66.to_string(), "");
    }

    #[test]
    fn modifiers_refuse_read() {
        let mut tokens = Tokens::new("%rax");
        let err = Operand::read_att(OperandKind::Pref66, &mut tokens).unwrap_err();
        assert!(matches!(
            err,
            ParseError::ModifierNotReadable {
                kind: OperandKind::Pref66,
                ..
            }
        ));
        // Nothing was consumed.
        assert_eq!(tokens.offset(), 0);
    }

    #[test]
    fn read_att_checks_kind() {
        let mut tokens = Tokens::new("%eax %eax");
        assert_eq!(Operand::read_att(OperandKind::R32, &mut tokens), Ok(EAX));
        let err = Operand::read_att(OperandKind::R64, &mut tokens).unwrap_err();
        assert!(matches!(err, ParseError::UnknownOperand { ref token, .. } if token == "%eax"));
        assert!(matches!(
            Operand::read_att(OperandKind::R64, &mut tokens),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn from_str_round_trips_display() {
        for op in R64S.iter().chain(&R8S).chain(&RHS).chain(&YMMS).chain(&EFLAGS) {
            assert_eq!(op.to_string().parse::<Operand>(), Ok(*op));
        }
    }

    #[test]
    fn from_str_rejects_junk() {
        assert!(matches!(
            "%notareg".parse::<Operand>(),
            Err(ParseError::UnknownOperand { .. })
        ));
        assert!(matches!(
            "".parse::<Operand>(),
            Err(ParseError::UnexpectedEof { .. })
        ));
        assert!(matches!(
            "%rax %rbx".parse::<Operand>(),
            Err(ParseError::TrailingInput { .. })
        ));
        // Mnemonics are case-sensitive.
        assert!("%RAX".parse::<Operand>().is_err());
    }

    #[test]
    fn invalid_operand_display_is_marked() {
        assert_eq!(
            Operand::new(OperandKind::R64, 20).to_string(),
            "<invalid R64 20>"
        );
    }
}
