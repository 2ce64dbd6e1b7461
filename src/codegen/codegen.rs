use crate::ir::{Instr, Operand, TacProgram};
use crate::parser::BinOp;

use super::RegisterAllocator;

/// Lowers an optimized TAC program into NASM-flavored x86-64 text in one
/// linear walk. Register assignment is delegated to the allocator; the
/// boilerplate (data section, print helper, entry point) frames the
/// translated instruction stream.
pub struct Codegen {
    registers: RegisterAllocator,
    body: Vec<String>,
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            registers: RegisterAllocator::new(),
            body: vec![],
        }
    }

    pub fn generate(mut self, program: &TacProgram) -> String {
        for instr in &program.0 {
            self.gen_instr(instr);
        }

        self.build_assembly()
    }

    fn emit(&mut self, instruction: &str) {
        self.body.push(format!("    {instruction}"));
    }

    fn comment(&mut self, text: &str) {
        self.body.push(format!("    ; {text}"));
    }

    /// Operand's register, allocating on first sight. A never-seen name
    /// yields a register with undefined contents; the naive allocator has
    /// no way to detect that.
    fn operand_register(&mut self, name: &str) -> &'static str {
        match self.registers.get(name) {
            Some(register) => register,
            None => self.registers.allocate(name),
        }
    }

    fn gen_instr(&mut self, instr: &Instr) {
        match instr {
            Instr::Assign {
                dest,
                src,
                op: None,
            } => {
                self.comment(&format!("Assignment: {instr}"));
                self.gen_copy(dest, src);
            }
            Instr::Assign {
                dest,
                src,
                op: Some((kind, rhs)),
            } => {
                self.comment(&format!("Assignment: {instr}"));
                self.gen_binary(dest, src, *kind, rhs);
            }
            Instr::Print { operand } => {
                self.comment(&format!("Print: {instr}"));
                self.gen_print(operand);
            }
        }
    }

    fn gen_copy(&mut self, dest: &str, src: &Operand) {
        let dest_reg = self.registers.allocate(dest);

        match src {
            Operand::Const(value) => {
                self.emit(&format!("mov {dest_reg}, {}", *value as i64));
            }
            Operand::Var(name) => {
                let src_reg = self.operand_register(name);
                if src_reg != dest_reg {
                    self.emit(&format!("mov {dest_reg}, {src_reg}"));
                }
            }
        }
    }

    fn gen_binary(&mut self, dest: &str, src: &Operand, op: BinOp, rhs: &Operand) {
        let dest_reg = self.registers.allocate(dest);

        // Load operand1 into the result register unless already resident.
        match src {
            Operand::Const(value) => {
                self.emit(&format!("mov {dest_reg}, {}", *value as i64));
            }
            Operand::Var(name) => {
                let src_reg = self.operand_register(name);
                if src_reg != dest_reg {
                    self.emit(&format!("mov {dest_reg}, {src_reg}"));
                }
            }
        }

        match op {
            BinOp::Add => match rhs {
                Operand::Const(value) => {
                    self.emit(&format!("add {dest_reg}, {}", *value as i64));
                }
                Operand::Var(name) => {
                    let rhs_reg = self.operand_register(name);
                    self.emit(&format!("add {dest_reg}, {rhs_reg}"));
                }
            },
            BinOp::Sub => match rhs {
                Operand::Const(value) => {
                    self.emit(&format!("sub {dest_reg}, {}", *value as i64));
                }
                Operand::Var(name) => {
                    let rhs_reg = self.operand_register(name);
                    self.emit(&format!("sub {dest_reg}, {rhs_reg}"));
                }
            },
            BinOp::Mul => match rhs {
                Operand::Const(value) => {
                    self.emit(&format!("imul {dest_reg}, {dest_reg}, {}", *value as i64));
                }
                Operand::Var(name) => {
                    let rhs_reg = self.operand_register(name);
                    self.emit(&format!("imul {dest_reg}, {rhs_reg}"));
                }
            },
            BinOp::Div => {
                // Signed division needs the dividend in rax and rdx zeroed;
                // the quotient moves back out when dest lives elsewhere.
                self.comment("Division operation");
                if dest_reg != "rax" {
                    self.emit(&format!("mov rax, {dest_reg}"));
                }
                self.emit("xor rdx, rdx");
                match rhs {
                    Operand::Const(value) => {
                        self.emit(&format!("mov rbx, {}", *value as i64));
                        self.emit("idiv rbx");
                    }
                    Operand::Var(name) => {
                        let rhs_reg = self.operand_register(name);
                        self.emit(&format!("idiv {rhs_reg}"));
                    }
                }
                if dest_reg != "rax" {
                    self.emit(&format!("mov {dest_reg}, rax"));
                }
            }
        }
    }

    fn gen_print(&mut self, operand: &Operand) {
        match operand {
            Operand::Const(value) => {
                self.emit(&format!("mov rdi, {}", *value as i64));
            }
            Operand::Var(name) => {
                let reg = self.operand_register(name);
                if reg != "rdi" {
                    self.emit(&format!("mov rdi, {reg}"));
                }
            }
        }
        self.emit("call print_int");
    }

    fn build_assembly(&self) -> String {
        let mut lines: Vec<String> = vec![
            "; Generated x86-64 assembly code".into(),
            "; Compile with: nasm -f elf64 output.asm && gcc -o program output.o".into(),
            "".into(),
            "extern printf".into(),
            "extern exit".into(),
            "".into(),
            "section .data".into(),
            "    print_fmt db '%d', 10, 0    ; Format string for printing integers".into(),
            "".into(),
            "section .text".into(),
            "global _start".into(),
            "".into(),
            "print_int:".into(),
            "    ; Print integer in rdi".into(),
            "    push rbp".into(),
            "    mov rbp, rsp".into(),
            "    mov rsi, rdi          ; Move integer to second argument".into(),
            "    mov rdi, print_fmt    ; Move format string to first argument".into(),
            "    xor rax, rax          ; Clear rax (no floating point args)".into(),
            "    call printf".into(),
            "    pop rbp".into(),
            "    ret".into(),
            "".into(),
            "_start:".into(),
        ];

        lines.extend(self.body.iter().cloned());

        lines.push("".into());
        lines.push("    ; Exit program".into());
        lines.push("    mov rdi, 0    ; Exit status".into());
        lines.push("    call exit".into());
        lines.push("".into());

        lines.join("\n")
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}
