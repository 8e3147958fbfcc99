//! Memory operands and the registers they reference.
//!
//! [`MemoryRef`] is the contract a memory operand offers to register-set
//! code; [`Mem`] is the crate's own implementation. [`address_registers`]
//! applies the address-size override rule: under a 32-bit override the CPU
//! reads only the low halves of the base and index registers, so the 32-bit
//! aliases are reported instead of the stored 64-bit registers.

use core::fmt;

use crate::alias;
use crate::catalog::RSP;
use crate::operand::{Operand, OperandKind};

/// Read-only view of a memory operand's address registers.
pub trait MemoryRef {
    /// Whether the 32-bit address-size override is active.
    fn addr_or(&self) -> bool;
    /// Whether a base register is present.
    fn contains_base(&self) -> bool;
    /// The base register, stored as a 64-bit register. Only meaningful when
    /// [`contains_base`](MemoryRef::contains_base) is true.
    fn get_base(&self) -> Operand;
    /// Whether an index register is present.
    fn contains_index(&self) -> bool;
    /// The index register, stored as a 64-bit register. Only meaningful
    /// when [`contains_index`](MemoryRef::contains_index) is true.
    fn get_index(&self) -> Operand;
}

/// The registers a memory operand actually reads: base then index, each
/// mapped to its 32-bit alias when the address-size override is active.
pub fn address_registers<M: MemoryRef + ?Sized>(mem: &M) -> impl Iterator<Item = Operand> {
    let narrow = |r: Operand| {
        if mem.addr_or() {
            alias::to_double(r)
        } else {
            Some(r)
        }
    };
    let base = mem.contains_base().then(|| mem.get_base()).and_then(narrow);
    let index = mem
        .contains_index()
        .then(|| mem.get_index())
        .and_then(narrow);
    [base, index].into_iter().flatten()
}

/// An x86-64 memory operand: `disp(base, index, scale)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mem {
    /// Base register (64-bit), if any.
    pub base: Option<Operand>,
    /// Index register (64-bit), if any.
    pub index: Option<Operand>,
    /// Index scale factor: 1, 2, 4, or 8.
    pub scale: u8,
    /// Signed 32-bit displacement.
    pub disp: i32,
    /// Whether the 0x67 address-size override applies (32-bit addressing).
    pub addr32: bool,
}

impl Default for Mem {
    fn default() -> Self {
        Self {
            base: None,
            index: None,
            scale: 1,
            disp: 0,
            addr32: false,
        }
    }
}

impl Mem {
    /// A memory operand with only a base register.
    #[must_use]
    pub fn base(base: Operand) -> Self {
        Self {
            base: Some(base),
            ..Self::default()
        }
    }

    /// Set the index register and scale.
    #[must_use]
    pub fn with_index(mut self, index: Operand, scale: u8) -> Self {
        self.index = Some(index);
        self.scale = scale;
        self
    }

    /// Set the displacement.
    #[must_use]
    pub fn with_disp(mut self, disp: i32) -> Self {
        self.disp = disp;
        self
    }

    /// Enable the 32-bit address-size override.
    #[must_use]
    pub fn with_addr32(mut self) -> Self {
        self.addr32 = true;
        self
    }

    /// Returns true if the operand is encodable: base and index are valid
    /// 64-bit registers, the index is not `%rsp`, and the scale is 1, 2, 4
    /// or 8.
    #[must_use]
    pub fn check(&self) -> bool {
        let is_r64 = |r: Operand| r.kind() == OperandKind::R64 && r.check();
        self.base.map_or(true, is_r64)
            && self.index.map_or(true, |r| is_r64(r) && r != RSP)
            && matches!(self.scale, 1 | 2 | 4 | 8)
    }

    fn shown(&self, r: Operand) -> Operand {
        if self.addr32 {
            alias::to_double(r).unwrap_or(r)
        } else {
            r
        }
    }
}

impl MemoryRef for Mem {
    fn addr_or(&self) -> bool {
        self.addr32
    }

    fn contains_base(&self) -> bool {
        self.base.is_some()
    }

    fn get_base(&self) -> Operand {
        self.base.unwrap_or(Operand::new(OperandKind::R64, 0))
    }

    fn contains_index(&self) -> bool {
        self.index.is_some()
    }

    fn get_index(&self) -> Operand {
        self.index.unwrap_or(Operand::new(OperandKind::R64, 0))
    }
}

impl fmt::Display for Mem {
    /// AT&T form, e.g. `-8(%rbp)`, `(%rax,%rcx,8)`, `0x10(%eax)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has_regs = self.base.is_some() || self.index.is_some();
        if self.disp != 0 || !has_regs {
            if self.disp < 0 {
                write!(f, "-0x{:x}", self.disp.unsigned_abs())?;
            } else {
                write!(f, "0x{:x}", self.disp)?;
            }
        }
        if !has_regs {
            return Ok(());
        }
        write!(f, "(")?;
        if let Some(base) = self.base {
            write!(f, "{}", self.shown(base))?;
        }
        if let Some(index) = self.index {
            write!(f, ",{},{}", self.shown(index), self.scale)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn registers_without_override() {
        let m = Mem::base(RBX).with_index(R12, 4);
        let regs: Vec<_> = address_registers(&m).collect();
        assert_eq!(regs, [RBX, R12]);
    }

    #[test]
    fn registers_under_override_are_narrowed() {
        let m = Mem::base(RBP).with_index(RSI, 2).with_addr32();
        let regs: Vec<_> = address_registers(&m).collect();
        assert_eq!(regs, [EBP, ESI]);
    }

    #[test]
    fn absolute_address_references_nothing() {
        let m = Mem::default().with_disp(0x1000).with_addr32();
        assert_eq!(address_registers(&m).count(), 0);
    }

    #[test]
    fn index_only() {
        let m = Mem::default().with_index(RCX, 8);
        let regs: Vec<_> = address_registers(&m).collect();
        assert_eq!(regs, [RCX]);
    }

    #[test]
    fn check_rules() {
        assert!(Mem::base(RAX).with_index(RCX, 8).check());
        assert!(Mem::default().check());
        assert!(!Mem::base(RAX).with_index(RSP, 1).check());
        assert!(!Mem::base(EAX).check());
        assert!(!Mem::base(RAX).with_index(RCX, 3).check());
    }

    #[test]
    fn display_att() {
        assert_eq!(Mem::base(RBP).with_disp(-8).to_string(), "-0x8(%rbp)");
        assert_eq!(
            Mem::base(RAX).with_index(RCX, 8).to_string(),
            "(%rax,%rcx,8)"
        );
        assert_eq!(
            Mem::base(RAX).with_disp(16).with_addr32().to_string(),
            "0x10(%eax)"
        );
        assert_eq!(Mem::default().with_index(R9, 2).to_string(), "(,%r9,2)");
        assert_eq!(Mem::default().to_string(), "0x0");
    }
}
