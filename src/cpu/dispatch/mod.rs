/*!
dispatch - orchestration of one instruction step.

The repeating machine cycle lives here: poll interrupts at the boundary,
fetch the opcode, decode it through the table, resolve the operand, hand the
operation to its category handler, then retire with the cycle count (base
cycles + the page-cross penalty where the table charges one + whatever extra
the handler reports, which today only branches do).

Category handlers are grouped the way the instruction set groups:

```text
    load_store   - LDA/LDX/LDY/STA/STX/STY
    arithmetic   - ADC/SBC
    logical      - AND/ORA/EOR/BIT
    rmw          - shifts, rotates, INC/DEC on memory or the accumulator
    compare      - CMP/CPX/CPY
    branches     - the eight flag-conditional relative branches
    control_flow - JMP/JSR/RTS/RTI/BRK
    misc         - transfers, register inc/dec, stack ops, flag ops, NOP
    illegal      - the undocumented combination opcodes
```

A jammed CPU executes nothing (and ignores interrupts — only the reset line
revives the real part), so `step` returns 0 cycles once `halted` is set.
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod illegal;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

use log::{debug, trace, warn};

use crate::bus::Bus;
use crate::cpu::addressing;
use crate::cpu::interrupt::{
    INTERRUPT_ENTRY_CYCLES, IRQ_VECTOR, InterruptController, NMI_VECTOR,
};
use crate::cpu::state::{CpuState, IRQ_DISABLE};
use crate::cpu::table::{self, Mnemonic};

/// Execute one instruction (or service one interrupt) and return the cycles
/// consumed. Returns 0 only when the CPU is jammed.
pub(crate) fn step(cpu: &mut CpuState, ints: &mut InterruptController, bus: &mut Bus) -> u32 {
    if cpu.halted {
        return 0;
    }

    // Interrupts are recognized at instruction boundaries only. NMI wins and
    // ignores the I flag; IRQ is taken while any source holds the line and I
    // is clear.
    if ints.take_nmi() {
        debug!("NMI taken -> vector ${NMI_VECTOR:04X}");
        return interrupt_entry(cpu, bus, NMI_VECTOR);
    }
    if ints.irq_asserted() && !cpu.is_flag_set(IRQ_DISABLE) {
        debug!("IRQ taken -> vector ${IRQ_VECTOR:04X}");
        return interrupt_entry(cpu, bus, IRQ_VECTOR);
    }

    let pc = cpu.pc;
    let opcode = cpu.fetch_u8(bus);
    let op = table::decode(opcode);
    let operand = addressing::resolve(cpu, bus, op.mode);

    trace!(
        "{pc:04X}  {opcode:02X}{} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
        if op.documented { " " } else { "*" },
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status,
        cpu.sp
    );

    use Mnemonic::*;
    let extra = match op.mnemonic {
        Lda | Ldx | Ldy | Sta | Stx | Sty => {
            load_store::exec(cpu, bus, op.mnemonic, &operand);
            0
        }
        Adc | Sbc => {
            arithmetic::exec(cpu, bus, op.mnemonic, &operand);
            0
        }
        And | Ora | Eor | Bit => {
            logical::exec(cpu, bus, op.mnemonic, &operand);
            0
        }
        Asl | Lsr | Rol | Ror | Inc | Dec => {
            rmw::exec(cpu, bus, op.mnemonic, &operand);
            0
        }
        Cmp | Cpx | Cpy => {
            compare::exec(cpu, bus, op.mnemonic, &operand);
            0
        }
        Bcc | Bcs | Beq | Bne | Bmi | Bpl | Bvc | Bvs => {
            branches::exec(cpu, op.mnemonic, &operand)
        }
        Jmp | Jsr | Rts | Rti | Brk => {
            control_flow::exec(cpu, bus, op.mnemonic, &operand);
            0
        }
        Tax | Tay | Tsx | Txa | Txs | Tya | Inx | Iny | Dex | Dey | Pha | Php | Pla | Plp
        | Clc | Sec | Cli | Sei | Cld | Sed | Clv | Nop => {
            misc::exec(cpu, bus, op.mnemonic, &operand);
            0
        }
        Lax | Sax | Dcp | Isc | Slo | Rla | Sre | Rra | Anc | Alr | Arr | Sbx => {
            illegal::exec(cpu, bus, op.mnemonic, &operand);
            0
        }
        Jam => {
            warn!("jam opcode ${opcode:02X} at ${pc:04X}; CPU wedged until reset");
            cpu.halt();
            0
        }
    };

    let mut cycles = op.cycles as u32 + extra;
    if op.page_penalty && operand.page_crossed {
        cycles += 1;
    }
    cycles
}

/// Hardware interrupt entry: push PC then status (B clear), set I, load the
/// handler address from the vector. Costs the fixed 7-cycle entry sequence.
pub(crate) fn interrupt_entry(cpu: &mut CpuState, bus: &mut Bus, vector: u16) -> u32 {
    let pc = cpu.pc;
    cpu.push_u16(bus, pc);
    let status = cpu.compose_status_for_push(false);
    cpu.push_u8(bus, status);
    cpu.assign_flag(IRQ_DISABLE, true);
    let handler = bus.read_word(vector);
    cpu.pc = handler;
    INTERRUPT_ENTRY_CYCLES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::{CARRY, STACK_PAGE, UNUSED};
    use crate::test_utils::bus_with_program;

    fn setup(prg: &[u8]) -> (CpuState, InterruptController, Bus) {
        let mut bus = bus_with_program(prg, 0x8000);
        let mut cpu = CpuState::new();
        cpu.reset(&mut bus);
        (cpu, InterruptController::new(), bus)
    }

    #[test]
    fn nmi_preempts_the_next_opcode() {
        let (mut cpu, mut ints, mut bus) = setup(&[0xEA]);
        ints.assert_nmi();
        let cycles = step(&mut cpu, &mut ints, &mut bus);
        assert_eq!(cycles, 7);
        // NMI vector in the test image points at the program start.
        assert_eq!(cpu.pc, 0x8000);
        assert!(cpu.is_flag_set(IRQ_DISABLE));
    }

    #[test]
    fn masked_irq_executes_the_opcode_instead() {
        let (mut cpu, mut ints, mut bus) = setup(&[0x38]); // SEC
        ints.assert_irq(0);
        // I is set from reset, so the IRQ waits and SEC runs.
        let cycles = step(&mut cpu, &mut ints, &mut bus);
        assert_eq!(cycles, 2);
        assert!(cpu.is_flag_set(CARRY));
        assert!(ints.irq_asserted(), "level IRQ stays pending");
    }

    #[test]
    fn interrupt_entry_pushes_pc_and_status_with_break_clear() {
        let (mut cpu, mut ints, mut bus) = setup(&[0xEA]);
        cpu.status = CARRY | UNUSED;
        let sp0 = cpu.sp;
        ints.assert_nmi();
        step(&mut cpu, &mut ints, &mut bus);

        let pushed_pc_hi = bus.read(STACK_PAGE | sp0 as u16);
        let pushed_pc_lo = bus.read(STACK_PAGE | sp0.wrapping_sub(1) as u16);
        let pushed_status = bus.read(STACK_PAGE | sp0.wrapping_sub(2) as u16);
        assert_eq!(pushed_pc_hi, 0x80);
        assert_eq!(pushed_pc_lo, 0x00);
        assert_eq!(pushed_status & 0x10, 0, "B must be clear on hardware pushes");
        assert_ne!(pushed_status & UNUSED, 0);
    }

    #[test]
    fn jammed_cpu_steps_for_free_and_ignores_interrupts() {
        let (mut cpu, mut ints, mut bus) = setup(&[0x02, 0xEA]);
        assert_eq!(step(&mut cpu, &mut ints, &mut bus), 2); // the jam itself
        assert!(cpu.halted);

        ints.assert_nmi();
        assert_eq!(step(&mut cpu, &mut ints, &mut bus), 0);
        assert_eq!(cpu.pc, 0x8001, "PC frozen past the jam byte");
    }
}
