//! Conversions between aliases of one physical register.
//!
//! `%rax`, `%eax`, `%ax`, `%al` and `%ah` are views of the same physical
//! register at different widths; so are `%xmm3` and `%ymm3`. The functions
//! here move between those views by table lookup. Each returns `None` when
//! the requested alias does not exist (e.g. the high byte of `%rsi`) or the
//! input is not a register of a compatible family.

use crate::catalog::{R16S, R32S, R64S, R8S, RHS, XMMS, YMMS};
use crate::operand::{Operand, OperandKind};

/// Physical register file an operand lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegFile {
    /// General-purpose registers.
    Gpr,
    /// SSE/AVX vector registers.
    Vector,
    /// RFLAGS.
    Flags,
}

/// The physical register slot behind an operand: its file and index.
///
/// For flags the index is the flag's lowest bit. Returns `None` for
/// modifiers and operands failing [`Operand::check`].
#[must_use]
pub fn slot(op: Operand) -> Option<(RegFile, u8)> {
    if !op.check() {
        return None;
    }
    let file = match op.kind() {
        OperandKind::R64
        | OperandKind::R32
        | OperandKind::R16
        | OperandKind::R8
        | OperandKind::Rh => RegFile::Gpr,
        OperandKind::Xmm | OperandKind::Xmm0 | OperandKind::Ymm => RegFile::Vector,
        OperandKind::Eflags => RegFile::Flags,
        OperandKind::Pref66 | OperandKind::PrefRexW | OperandKind::Far => return None,
    };
    Some((file, op.value()))
}

/// Whether two operands are views of the same physical register.
#[must_use]
pub fn same_slot(a: Operand, b: Operand) -> bool {
    match (slot(a), slot(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn gpr_index(op: Operand) -> Option<usize> {
    match slot(op)? {
        (RegFile::Gpr, i) => Some(usize::from(i)),
        _ => None,
    }
}

fn vector_index(op: Operand) -> Option<usize> {
    match slot(op)? {
        (RegFile::Vector, i) => Some(usize::from(i)),
        _ => None,
    }
}

/// The 64-bit alias of a general-purpose register.
#[must_use]
pub fn to_quad(op: Operand) -> Option<Operand> {
    gpr_index(op).map(|i| R64S[i])
}

/// The 32-bit alias of a general-purpose register.
///
/// This is the mapping applied to address registers under an address-size
/// override.
#[must_use]
pub fn to_double(op: Operand) -> Option<Operand> {
    gpr_index(op).map(|i| R32S[i])
}

/// The 16-bit alias of a general-purpose register.
#[must_use]
pub fn to_word(op: Operand) -> Option<Operand> {
    gpr_index(op).map(|i| R16S[i])
}

/// The low-byte alias of a general-purpose register.
#[must_use]
pub fn to_byte(op: Operand) -> Option<Operand> {
    gpr_index(op).map(|i| R8S[i])
}

/// The high-byte alias of a general-purpose register; only the first four
/// registers have one.
#[must_use]
pub fn to_high(op: Operand) -> Option<Operand> {
    gpr_index(op).and_then(|i| RHS.get(i).copied())
}

/// The 128-bit alias of a vector register.
#[must_use]
pub fn to_xmm(op: Operand) -> Option<Operand> {
    vector_index(op).map(|i| XMMS[i])
}

/// The 256-bit alias of a vector register.
#[must_use]
pub fn to_ymm(op: Operand) -> Option<Operand> {
    vector_index(op).map(|i| YMMS[i])
}

/// Every alias of the physical register behind `op`, widest first,
/// including `op` itself.
///
/// A flag's group is the flag alone; a modifier's group is empty. The fixed
/// `%xmm0` operand's group is `%ymm0 %xmm0`.
pub fn group(op: Operand) -> impl Iterator<Item = Operand> {
    let members = match slot(op) {
        Some((RegFile::Gpr, _)) => [
            to_quad(op),
            to_double(op),
            to_word(op),
            to_byte(op),
            to_high(op),
        ],
        Some((RegFile::Vector, _)) => [to_ymm(op), to_xmm(op), None, None, None],
        Some((RegFile::Flags, _)) => [Some(op), None, None, None, None],
        None => [None; 5],
    };
    members.into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::*;
    use alloc::vec::Vec;

    #[test]
    fn gpr_width_conversions() {
        assert_eq!(to_double(RAX), Some(EAX));
        assert_eq!(to_double(R13), Some(R13D));
        assert_eq!(to_quad(AH), Some(RAX));
        assert_eq!(to_word(BL), Some(BX));
        assert_eq!(to_byte(RSI), Some(SIL));
        assert_eq!(to_high(EDX), Some(DH));
        assert_eq!(to_high(RSI), None);
        assert_eq!(to_double(XMM0), None);
    }

    #[test]
    fn vector_width_conversions() {
        assert_eq!(to_ymm(XMM9), Some(YMM9));
        assert_eq!(to_xmm(YMM0), Some(XMM0));
        assert_eq!(to_xmm(RAX), None);
    }

    #[test]
    fn invalid_and_modifier_operands_have_no_aliases() {
        assert_eq!(to_double(Operand::new(OperandKind::R64, 16)), None);
        assert_eq!(slot(PREF_REX_W), None);
        assert_eq!(group(FAR).count(), 0);
    }

    #[test]
    fn groups_list_every_view() {
        let g: Vec<_> = group(EAX).collect();
        assert_eq!(g, [RAX, EAX, AX, AL, AH]);
        let g: Vec<_> = group(R9W).collect();
        assert_eq!(g, [R9, R9D, R9W, R9B]);
        let g: Vec<_> = group(XMM4).collect();
        assert_eq!(g, [YMM4, XMM4]);
        let g: Vec<_> = group(EFLAGS_ZF).collect();
        assert_eq!(g, [EFLAGS_ZF]);
    }

    #[test]
    fn fixed_xmm0_is_the_xmm0_slot() {
        assert_eq!(slot(XMM0_FIXED), Some((RegFile::Vector, 0)));
        assert_eq!(to_xmm(XMM0_FIXED), Some(XMM0));
        assert_eq!(to_ymm(XMM0_FIXED), Some(YMM0));
        let g: Vec<_> = group(XMM0_FIXED).collect();
        assert_eq!(g, [YMM0, XMM0]);
        assert_eq!(slot(Operand::new(OperandKind::Xmm0, 1)), None);
    }

    #[test]
    fn same_slot_relation() {
        assert!(same_slot(XMM0_FIXED, YMM0));
        assert!(same_slot(RAX, AH));
        assert!(same_slot(XMM2, YMM2));
        assert!(!same_slot(RAX, XMM0));
        assert!(!same_slot(RAX, RCX));
        assert!(!same_slot(FAR, FAR));
    }
}
