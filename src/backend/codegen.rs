use crate::frontend::ast::{Op, Program};

/// The runtime's only subroutine: prints the unsigned magnitude in rdi as
/// decimal followed by a newline, with a single write(2) syscall. Digits
/// are produced back to front in a stack buffer using the reciprocal
/// multiplication idiom for division by ten. Negative operands are out of
/// contract and print as their two's-complement magnitude.
const DUMP: &str = "dump:
    mov     r9, -3689348814741910323
    sub     rsp, 40
    mov     BYTE [rsp+31], 10
    lea     rcx, [rsp+30]
.L2:
    mov     rax, rdi
    lea     r8, [rsp+32]
    mul     r9
    mov     rax, rdi
    sub     r8, rcx
    shr     rdx, 3
    lea     rsi, [rdx+rdx*4]
    add     rsi, rsi
    sub     rax, rsi
    add     eax, 48
    mov     BYTE [rcx], al
    mov     rax, rdi
    mov     rdi, rdx
    mov     rdx, rcx
    sub     rcx, 1
    cmp     rax, 9
    ja      .L2
    lea     rax, [rsp+32]
    mov     edi, 1
    sub     rdx, rax
    xor     eax, eax
    lea     rsi, [rsp+32+rdx]
    mov     rdx, r8
    mov     rax, 1
    syscall
    add     rsp, 40
    ret
";

/// Lowers a program to NASM elf64 assembly realizing a stack machine on
/// the hardware stack. The emitted text is a wire contract with the
/// external assembler and is fully determined by the program, so compiling
/// the same source twice produces byte-identical output.
pub fn codegen(program: &Program) -> String {
    let mut code = String::new();
    code.push_str("BITS 64\n");
    code.push_str("segment .text\n");
    code.push_str(DUMP);
    code.push_str("global _start\n");
    code.push_str("_start:\n");
    for op in &program.ops {
        lower_op(&mut code, *op);
    }
    code.push_str("    ;; -- exit --\n");
    code.push_str("    mov rax, 60\n");
    code.push_str("    mov rdi, 0\n");
    code.push_str("    syscall\n");
    code
}

fn lower_op(code: &mut String, op: Op) {
    match op {
        Op::PushInt(value) => {
            code.push_str(&format!("    ;; -- push {value} --\n"));
            code.push_str(&format!("    push {value}\n"));
        }
        Op::Plus => {
            code.push_str("    ;; -- add --\n");
            code.push_str("    pop rax\n");
            code.push_str("    pop rbx\n");
            code.push_str("    add rax, rbx\n");
            code.push_str("    push rax\n");
        }
        // rax holds the later-pushed operand, so the earlier-pushed one is
        // the minuend.
        Op::Minus => {
            code.push_str("    ;; -- sub --\n");
            code.push_str("    pop rax\n");
            code.push_str("    pop rbx\n");
            code.push_str("    sub rbx, rax\n");
            code.push_str("    push rbx\n");
        }
        Op::Dump => {
            code.push_str("    ;; -- dump --\n");
            code.push_str("    pop rdi\n");
            code.push_str("    call dump\n");
        }
    }
}
