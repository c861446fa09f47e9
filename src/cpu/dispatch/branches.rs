//! Branch family: the eight flag-conditional relative branches.
//!
//! Base cost covers the not-taken path. A taken branch costs one extra
//! cycle, two when the destination lands on a different page than the
//! instruction following the branch.

use crate::cpu::addressing::{Resolved, Target};
use crate::cpu::state::{CARRY, CpuState, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::table::Mnemonic;

/// Apply the branch, returning the extra cycles (0, 1, or 2).
pub(crate) fn exec(cpu: &mut CpuState, m: Mnemonic, operand: &Resolved) -> u32 {
    let take = match m {
        Mnemonic::Bcc => !cpu.is_flag_set(CARRY),
        Mnemonic::Bcs => cpu.is_flag_set(CARRY),
        Mnemonic::Bne => !cpu.is_flag_set(ZERO),
        Mnemonic::Beq => cpu.is_flag_set(ZERO),
        Mnemonic::Bpl => !cpu.is_flag_set(NEGATIVE),
        Mnemonic::Bmi => cpu.is_flag_set(NEGATIVE),
        Mnemonic::Bvc => !cpu.is_flag_set(OVERFLOW),
        Mnemonic::Bvs => cpu.is_flag_set(OVERFLOW),
        _ => false,
    };

    let Target::Relative(offset) = operand.target else {
        return 0;
    };
    if !take {
        return 0;
    }

    let from = cpu.pc; // already past the displacement byte
    cpu.pc = from.wrapping_add(offset as i16 as u16);
    if (from & 0xFF00) != (cpu.pc & 0xFF00) {
        2
    } else {
        1
    }
}
