//! Bit-packed sets of registers and flags.
//!
//! A [`RegSet`] records which registers an instruction (or a sequence of
//! instructions) reads or writes. Every alias of every physical register has
//! its own bit: inserting `%eax` marks only `%eax`, not `%rax`, `%ax` or
//! `%al`. Flags occupy a flat bit space where a multi-bit field such as
//! `%iopl` is inserted, tested and printed as one unit.
//!
//! # Text form
//!
//! ```text
//! { %rax %ecx %al %ah %ymm0 %xmm3 %zf }
//! ```
//!
//! The writer prints one token per occupied physical slot, widest alias
//! first: if `%rax` is present then `%eax`, `%ax` and `%al` are not printed
//! even when they are also members. Only the low and high byte of the first
//! four registers are printed side by side. The text form is therefore a
//! lossy projection; serialize with `serde` when exact membership matters.

use core::fmt;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, Range, Sub, SubAssign,
};
use core::str::FromStr;

use alloc::string::String;

use crate::alias;
use crate::catalog::{self, EFLAGS, R16S, R32S, R64S, R8S, RHS, XMMS, YMMS};
use crate::error::ParseError;
use crate::lexer::Tokens;
use crate::mem::{self, MemoryRef};
use crate::operand::{Operand, OperandKind};

/// Limits applied while reading register sets from untrusted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadLimits {
    /// Maximum number of register/flag tokens between the braces of one set.
    /// Duplicates count. Default: 4096.
    pub max_tokens: usize,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self { max_tokens: 4096 }
    }
}

// Bit layout: one block per class, flags last.
const R64_BASE: usize = 0;
const R32_BASE: usize = R64_BASE + 16;
const R16_BASE: usize = R32_BASE + 16;
const R8_BASE: usize = R16_BASE + 16;
const RH_BASE: usize = R8_BASE + 16;
const XMM_BASE: usize = RH_BASE + 4;
const YMM_BASE: usize = XMM_BASE + 16;
const FLAGS_BASE: usize = YMM_BASE + 16;
const TOTAL_BITS: usize = FLAGS_BASE + catalog::EFLAGS_BITS;

const WORDS: usize = (TOTAL_BITS + 63) / 64;

/// First bit of each class's block; `None` for modifiers.
fn class_base(kind: OperandKind) -> Option<usize> {
    match kind {
        OperandKind::R64 => Some(R64_BASE),
        OperandKind::R32 => Some(R32_BASE),
        OperandKind::R16 => Some(R16_BASE),
        OperandKind::R8 => Some(R8_BASE),
        OperandKind::Rh => Some(RH_BASE),
        OperandKind::Xmm | OperandKind::Xmm0 => Some(XMM_BASE),
        OperandKind::Ymm => Some(YMM_BASE),
        OperandKind::Eflags => Some(FLAGS_BASE),
        OperandKind::Pref66 | OperandKind::PrefRexW | OperandKind::Far => None,
    }
}

/// Bits owned by an operand. Modifiers and invalid operands own none.
fn bit_range(op: Operand) -> Option<Range<usize>> {
    if !op.check() {
        return None;
    }
    let start = class_base(op.kind())? + usize::from(op.value());
    let width = match op.kind() {
        OperandKind::Eflags => usize::from(catalog::flag_width(op.value())?),
        _ => 1,
    };
    Some(start..start + width)
}

/// A set of registers and flags.
///
/// Plain `Copy` value; every operation works on a private bit array.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RegSet {
    bits: [u64; WORDS],
}

impl RegSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Every register alias and every flag.
    #[must_use]
    pub fn universe() -> Self {
        let mut set = Self::empty();
        for i in 0..TOTAL_BITS {
            set.set_bit(i);
        }
        set
    }

    /// Registers a System V AMD64 callee may clobber: `%rax %rcx %rdx %rsi
    /// %rdi %r8`–`%r11`, every YMM register and every flag.
    #[must_use]
    pub fn linux_caller_save() -> Self {
        let gprs = [
            catalog::RAX,
            catalog::RCX,
            catalog::RDX,
            catalog::RSI,
            catalog::RDI,
            catalog::R8,
            catalog::R9,
            catalog::R10,
            catalog::R11,
        ];
        gprs.into_iter().chain(YMMS).chain(EFLAGS).collect()
    }

    /// Registers a System V AMD64 callee must preserve.
    #[must_use]
    pub fn linux_callee_save() -> Self {
        [
            catalog::RBX,
            catalog::RSP,
            catalog::RBP,
            catalog::R12,
            catalog::R13,
            catalog::R14,
            catalog::R15,
        ]
        .into_iter()
        .collect()
    }

    /// Registers carrying integer and vector arguments in the System V AMD64
    /// calling convention.
    #[must_use]
    pub fn linux_call_parameters() -> Self {
        [
            catalog::RDI,
            catalog::RSI,
            catalog::RDX,
            catalog::RCX,
            catalog::R8,
            catalog::R9,
        ]
        .into_iter()
        .chain(XMMS[..8].iter().copied())
        .collect()
    }

    /// Registers carrying return values in the System V AMD64 calling
    /// convention.
    #[must_use]
    pub fn linux_call_return() -> Self {
        [catalog::RAX, catalog::RDX, catalog::XMM0, catalog::XMM1]
            .into_iter()
            .collect()
    }

    #[inline]
    fn set_bit(&mut self, i: usize) {
        self.bits[i / 64] |= 1u64 << (i % 64);
    }

    #[inline]
    fn clear_bit(&mut self, i: usize) {
        self.bits[i / 64] &= !(1u64 << (i % 64));
    }

    #[inline]
    fn test_bit(&self, i: usize) -> bool {
        self.bits[i / 64] & (1u64 << (i % 64)) != 0
    }

    /// Insert exactly `op`. Flags mark their whole bit span. Modifiers and
    /// operands failing [`Operand::check`] are ignored.
    pub fn insert(&mut self, op: Operand) {
        if let Some(bits) = bit_range(op) {
            for i in bits {
                self.set_bit(i);
            }
        }
    }

    /// Insert every alias of the physical register behind `op`.
    pub fn insert_group(&mut self, op: Operand) {
        for alias in alias::group(op) {
            self.insert(alias);
        }
    }

    /// Insert the registers a memory operand reads when computing its
    /// address. See [`mem::address_registers`].
    pub fn insert_mem<M: MemoryRef + ?Sized>(&mut self, m: &M) {
        for reg in mem::address_registers(m) {
            self.insert(reg);
        }
    }

    /// Remove exactly `op`, leaving other aliases of its slot untouched.
    pub fn remove(&mut self, op: Operand) {
        if let Some(bits) = bit_range(op) {
            for i in bits {
                self.clear_bit(i);
            }
        }
    }

    /// Whether `op` was inserted. For flags every bit of the field must be
    /// present.
    #[must_use]
    pub fn contains(&self, op: Operand) -> bool {
        match bit_range(op) {
            Some(mut bits) => bits.all(|i| self.test_bit(i)),
            None => false,
        }
    }

    /// Whether every member of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &RegSet) -> bool {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Number of registers and flags in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Remove every member.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Members in catalog order: 64-bit, 32-bit, 16-bit, low-byte,
    /// high-byte, XMM, YMM, flags.
    pub fn iter(&self) -> impl Iterator<Item = Operand> + '_ {
        R64S.iter()
            .chain(&R32S)
            .chain(&R16S)
            .chain(&R8S)
            .chain(&RHS)
            .chain(&XMMS)
            .chain(&YMMS)
            .chain(&EFLAGS)
            .copied()
            .filter(move |&op| self.contains(op))
    }

    /// Read a set in `{ ... }` form from `tokens` with default limits.
    ///
    /// # Errors
    ///
    /// See [`RegSet::read_text_with_limits`].
    pub fn read_text(&mut self, tokens: &mut Tokens<'_>) -> Result<(), ParseError> {
        self.read_text_with_limits(tokens, &ReadLimits::default())
    }

    /// Read a set in `{ ... }` form from `tokens`.
    ///
    /// The set is cleared first. Each token between the braces is resolved
    /// as a 64-bit, 32-bit, 16-bit, low-byte or high-byte register, a YMM
    /// or XMM register, or a flag, in that order, and inserted. Only the
    /// tokens of this set are consumed, so further values can be read from
    /// the same stream.
    ///
    /// # Errors
    ///
    /// - [`ParseError::ExpectedOpenBrace`] if the first token is not `{`;
    ///   nothing is inserted.
    /// - [`ParseError::UnknownOperand`] after consuming a token that names
    ///   no register or flag.
    /// - [`ParseError::UnexpectedEof`] if input ends before `}`.
    /// - [`ParseError::ResourceLimitExceeded`] past `limits.max_tokens`.
    ///
    /// On error the set holds whatever was inserted so far and must not be
    /// relied upon.
    pub fn read_text_with_limits(
        &mut self,
        tokens: &mut Tokens<'_>,
        limits: &ReadLimits,
    ) -> Result<(), ParseError> {
        self.clear();

        let span = tokens.eof_span();
        let open = tokens.next().ok_or(ParseError::UnexpectedEof { span })?;
        if open.text != "{" {
            log::debug!("register set at {} does not start with '{{'", open.span);
            return Err(ParseError::ExpectedOpenBrace {
                found: open.text.into(),
                span: open.span,
            });
        }

        let mut count = 0usize;
        loop {
            let span = tokens.eof_span();
            let tok = tokens.next().ok_or(ParseError::UnexpectedEof { span })?;
            if tok.text == "}" {
                log::trace!("read register set with {} tokens", count);
                return Ok(());
            }
            count += 1;
            if count > limits.max_tokens {
                return Err(ParseError::ResourceLimitExceeded {
                    resource: String::from("tokens"),
                    limit: limits.max_tokens,
                });
            }
            match catalog::lookup(tok.text) {
                Some(op) => self.insert(op),
                None => {
                    log::debug!("unknown register '{}' at {}", tok.text, tok.span);
                    return Err(ParseError::UnknownOperand {
                        token: tok.text.into(),
                        span: tok.span,
                    });
                }
            }
        }
    }

    /// Write the canonical `{ ... }` form.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors.
    pub fn write_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("{")?;
        for i in 0..R64S.len() {
            if self.contains(R64S[i]) {
                write!(w, " {}", R64S[i])?;
            } else if self.contains(R32S[i]) {
                write!(w, " {}", R32S[i])?;
            } else if self.contains(R16S[i]) {
                write!(w, " {}", R16S[i])?;
            } else {
                if self.contains(R8S[i]) {
                    write!(w, " {}", R8S[i])?;
                }
                if let Some(&rh) = RHS.get(i) {
                    if self.contains(rh) {
                        write!(w, " {}", rh)?;
                    }
                }
            }
        }
        for i in 0..YMMS.len() {
            if self.contains(YMMS[i]) {
                write!(w, " {}", YMMS[i])?;
            } else if self.contains(XMMS[i]) {
                write!(w, " {}", XMMS[i])?;
            }
        }
        for flag in EFLAGS {
            if self.contains(flag) {
                write!(w, " {}", flag)?;
            }
        }
        w.write_str(" }")
    }
}

impl fmt::Display for RegSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f)
    }
}

impl fmt::Debug for RegSet {
    /// Lists every member, without the alias masking of `Display`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RegSet {")?;
        for op in self.iter() {
            write!(f, " {}", op)?;
        }
        f.write_str(" }")
    }
}

impl FromStr for RegSet {
    type Err = ParseError;

    /// Parse exactly one set; trailing tokens are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(s);
        let mut set = RegSet::empty();
        set.read_text(&mut tokens)?;
        if let Some(extra) = tokens.next() {
            return Err(ParseError::TrailingInput {
                token: extra.text.into(),
                span: extra.span,
            });
        }
        Ok(set)
    }
}

impl FromIterator<Operand> for RegSet {
    fn from_iter<I: IntoIterator<Item = Operand>>(iter: I) -> Self {
        let mut set = RegSet::empty();
        set.extend(iter);
        set
    }
}

impl Extend<Operand> for RegSet {
    fn extend<I: IntoIterator<Item = Operand>>(&mut self, iter: I) {
        for op in iter {
            self.insert(op);
        }
    }
}

impl AddAssign<Operand> for RegSet {
    fn add_assign(&mut self, op: Operand) {
        self.insert(op);
    }
}

impl<M: MemoryRef + ?Sized> AddAssign<&M> for RegSet {
    fn add_assign(&mut self, m: &M) {
        self.insert_mem(m);
    }
}

impl AddAssign<RegSet> for RegSet {
    fn add_assign(&mut self, rhs: RegSet) {
        *self |= rhs;
    }
}

impl Add<Operand> for RegSet {
    type Output = RegSet;

    fn add(mut self, op: Operand) -> RegSet {
        self.insert(op);
        self
    }
}

impl Add<RegSet> for RegSet {
    type Output = RegSet;

    fn add(self, rhs: RegSet) -> RegSet {
        self | rhs
    }
}

impl SubAssign<Operand> for RegSet {
    fn sub_assign(&mut self, op: Operand) {
        self.remove(op);
    }
}

impl SubAssign<RegSet> for RegSet {
    fn sub_assign(&mut self, rhs: RegSet) {
        for (a, b) in self.bits.iter_mut().zip(rhs.bits) {
            *a &= !b;
        }
    }
}

impl Sub<Operand> for RegSet {
    type Output = RegSet;

    fn sub(mut self, op: Operand) -> RegSet {
        self.remove(op);
        self
    }
}

impl Sub<RegSet> for RegSet {
    type Output = RegSet;

    fn sub(mut self, rhs: RegSet) -> RegSet {
        self -= rhs;
        self
    }
}

impl BitOrAssign for RegSet {
    fn bitor_assign(&mut self, rhs: RegSet) {
        for (a, b) in self.bits.iter_mut().zip(rhs.bits) {
            *a |= b;
        }
    }
}

impl BitOr for RegSet {
    type Output = RegSet;

    fn bitor(mut self, rhs: RegSet) -> RegSet {
        self |= rhs;
        self
    }
}

impl BitAndAssign for RegSet {
    fn bitand_assign(&mut self, rhs: RegSet) {
        for (a, b) in self.bits.iter_mut().zip(rhs.bits) {
            *a &= b;
        }
    }
}

impl BitAnd for RegSet {
    type Output = RegSet;

    fn bitand(mut self, rhs: RegSet) -> RegSet {
        self &= rhs;
        self
    }
}

// Serialized as the list of members, which unlike the text form is exact.
#[cfg(feature = "serde")]
impl serde::Serialize for RegSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RegSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ops = <alloc::vec::Vec<Operand> as serde::Deserialize>::deserialize(deserializer)?;
        if let Some(bad) = ops.iter().find(|op| !op.check() || op.is_modifier()) {
            return Err(serde::de::Error::custom(alloc::format!(
                "{:?} cannot be a register set member",
                bad
            )));
        }
        Ok(ops.into_iter().collect())
    }
}
