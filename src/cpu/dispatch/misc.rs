//! Transfers, register increment/decrement, stack operations, flag
//! operations, and NOP.
//!
//! TXS is the one transfer that sets no flags. PHP pushes with B set (the
//! stack copy, not the live register); PLP/PLA pull in the usual Z/N or
//! status-restore rules. NOPs with an addressing mode still perform their
//! operand read, because on hardware that read is visible to whatever the
//! address decodes to.

use crate::bus::Bus;
use crate::cpu::addressing::{Resolved, Target};
use crate::cpu::state::{CARRY, CpuState, DECIMAL, IRQ_DISABLE, OVERFLOW};
use crate::cpu::table::Mnemonic;

pub(crate) fn exec(cpu: &mut CpuState, bus: &mut Bus, m: Mnemonic, operand: &Resolved) {
    match m {
        // Register transfers
        Mnemonic::Tax => {
            cpu.x = cpu.a;
            cpu.update_zn(cpu.x);
        }
        Mnemonic::Tay => {
            cpu.y = cpu.a;
            cpu.update_zn(cpu.y);
        }
        Mnemonic::Txa => {
            cpu.a = cpu.x;
            cpu.update_zn(cpu.a);
        }
        Mnemonic::Tya => {
            cpu.a = cpu.y;
            cpu.update_zn(cpu.a);
        }
        Mnemonic::Tsx => {
            cpu.x = cpu.sp;
            cpu.update_zn(cpu.x);
        }
        Mnemonic::Txs => {
            cpu.sp = cpu.x; // no flags
        }

        // Register increment / decrement
        Mnemonic::Inx => {
            cpu.x = cpu.x.wrapping_add(1);
            cpu.update_zn(cpu.x);
        }
        Mnemonic::Iny => {
            cpu.y = cpu.y.wrapping_add(1);
            cpu.update_zn(cpu.y);
        }
        Mnemonic::Dex => {
            cpu.x = cpu.x.wrapping_sub(1);
            cpu.update_zn(cpu.x);
        }
        Mnemonic::Dey => {
            cpu.y = cpu.y.wrapping_sub(1);
            cpu.update_zn(cpu.y);
        }

        // Stack
        Mnemonic::Pha => {
            let a = cpu.a;
            cpu.push_u8(bus, a);
        }
        Mnemonic::Php => {
            let status = cpu.compose_status_for_push(true);
            cpu.push_u8(bus, status);
        }
        Mnemonic::Pla => {
            let v = cpu.pop_u8(bus);
            cpu.a = v;
            cpu.update_zn(v);
        }
        Mnemonic::Plp => {
            let v = cpu.pop_u8(bus);
            cpu.restore_status(v);
        }

        // Flag set / clear
        Mnemonic::Clc => cpu.assign_flag(CARRY, false),
        Mnemonic::Sec => cpu.assign_flag(CARRY, true),
        Mnemonic::Cli => cpu.assign_flag(IRQ_DISABLE, false),
        Mnemonic::Sei => cpu.assign_flag(IRQ_DISABLE, true),
        Mnemonic::Cld => cpu.assign_flag(DECIMAL, false),
        Mnemonic::Sed => cpu.assign_flag(DECIMAL, true),
        Mnemonic::Clv => cpu.assign_flag(OVERFLOW, false),

        // NOP: no architectural effect, but memory forms read their operand.
        Mnemonic::Nop => {
            if let Target::Address(_) = operand.target {
                let _ = operand.value(cpu, bus);
            }
        }

        _ => {}
    }
}
