mod backend;
mod frontend;

use crate::backend::codegen::codegen;
use crate::frontend::lexer::lex_source;
use crate::frontend::ast::Program;
use crate::frontend::parser::{Parser, ParserError};
use crate::frontend::token::Token;
use colored::Colorize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io;
use std::io::{Read, Write, stdout};
use std::process::Command;

#[derive(Ord, PartialOrd, Eq, PartialEq, Debug)]
enum CommandArg {
    Lex,
    Parse,
    Codegen,
    Run,
}

#[derive(Debug)]
struct MainError {
    message: &'static str,
}

impl Display for MainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for MainError {}

fn main() -> Result<(), anyhow::Error> {
    let args: Vec<String> = std::env::args().collect();
    let executable_name = &args[0];
    let command: CommandArg;
    let input_file: &str;

    match args.len() {
        2 => {
            command = CommandArg::Run;
            input_file = &args[1];
        }
        3 => {
            match args[1].as_str() {
                "--lex" => command = CommandArg::Lex,
                "--parse" => command = CommandArg::Parse,
                "--codegen" => command = CommandArg::Codegen,
                _ => {
                    print_usage(executable_name)?;
                    return Err(MainError {
                        message: "Unknown command.",
                    }
                    .into());
                }
            }
            input_file = &args[2];
        }
        _ => {
            print_usage(executable_name)?;
            return Err(MainError {
                message: "Invalid number of arguments.",
            }
            .into());
        }
    }

    let tokens = run_lexer(input_file)?;
    if command == CommandArg::Lex {
        for token in &tokens {
            println!("{input_file}:{token}");
        }
    }
    if command >= CommandArg::Parse {
        let outcome = Parser::new(input_file, tokens).parse();
        if let Err(err) = &outcome {
            eprintln!("{err}");
        }
        if command == CommandArg::Parse {
            if let Ok(program) = &outcome {
                println!("{:?}", program.ops);
            }
        }
        if command >= CommandArg::Codegen {
            if let Some(assembly) = emit_artifact(&outcome) {
                File::create("out.asm")?.write_all(assembly.as_bytes())?;
                println!("{} out.asm", "Compiled to".green());
                if command >= CommandArg::Run {
                    println!("{}", "Running nasm...".dimmed());
                    if !run_tool("nasm", &["-felf64", "out.asm"])? {
                        return Err(MainError {
                            message: "Assembler reported failure.",
                        }
                        .into());
                    }
                    println!("{}", "Linking...".dimmed());
                    if !run_tool("ld", &["-o", "out", "out.o"])? {
                        return Err(MainError {
                            message: "Linker reported failure.",
                        }
                        .into());
                    }
                    println!("{}", "Running...".dimmed());
                    run_tool("./out", &[])?;
                }
            }
        }
    }

    Ok(())
}

fn run_lexer(input_file: &str) -> io::Result<Vec<Token>> {
    let mut file = File::open(input_file)?;
    let file_length = file.metadata()?.len() as usize;
    let mut buffer = String::with_capacity(file_length);
    file.read_to_string(&mut buffer)?;
    if buffer.starts_with("\u{FEFF}") {
        // Skip BOM
        buffer.remove(0);
    }

    Ok(lex_source(&buffer))
}

/// A failed or empty parse yields no artifact, so no external tool runs
/// on it.
fn emit_artifact(outcome: &Result<Program, ParserError>) -> Option<String> {
    match outcome {
        Ok(program) if !program.is_empty() => Some(codegen(program)),
        _ => None,
    }
}

fn run_tool(program: &str, args: &[&str]) -> io::Result<bool> {
    Ok(Command::new(program).args(args).status()?.success())
}

fn print_usage(arg0: &str) -> io::Result<()> {
    let mut stdout = stdout().lock();
    let name = arg0.split('/').next_back().unwrap();
    writeln!(stdout, "Usage: {} [--lex|--parse|--codegen] <input file>", name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_lexer_reads_and_skips_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("\u{FEFF}34 35 +\n.\n".as_bytes()).unwrap();
        let tokens = run_lexer(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(0, 0, "34"),
                Token::new(0, 3, "35"),
                Token::new(0, 6, "+"),
                Token::new(1, 0, "."),
            ]
        );
    }

    #[test]
    fn failed_parse_produces_no_artifact() {
        let outcome = Parser::new("test.stk", lex_source("1 bogus +")).parse();
        assert!(outcome.is_err());
        assert!(emit_artifact(&outcome).is_none());
    }

    #[test]
    fn empty_program_produces_no_artifact() {
        let outcome = Parser::new("test.stk", lex_source("  \n\t\n")).parse();
        assert!(emit_artifact(&outcome).is_none());
    }

    #[test]
    fn non_empty_program_produces_assembly() {
        let outcome = Parser::new("test.stk", lex_source("2 3 + .")).parse();
        assert!(emit_artifact(&outcome).is_some());
    }
}
