//! pegt Parser Generator CLI

use std::path::Path;

use pegt_codegen::CodegenOptions;
use pegt_diagnostic::emitter::SourceFile;
use pegtc::{compile_source, read_file, report, write_module, Compiled};

fn main() {
    pegtc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: pegtc check <grammar>");
                std::process::exit(1);
            }
            let compiled = compile_or_exit(&args[2]);
            println!(
                "OK: {} ({} rules)",
                args[2],
                compiled.grammar.rules().len()
            );
        }
        "dump" => {
            if args.len() < 3 {
                eprintln!("Usage: pegtc dump <grammar>");
                std::process::exit(1);
            }
            let compiled = compile_or_exit(&args[2]);
            print!("{}", compiled.rule_dump());
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("pegtc {}", env!("CARGO_PKG_VERSION"));
        }
        _ if args.len() == 3 => {
            let compiled = compile_or_exit(&args[1]);
            if let Err(e) = write_module(Path::new(&args[2]), &compiled.module) {
                report(&e, None);
                std::process::exit(1);
            }
            print!("{}", compiled.rule_dump());
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Compile the grammar at `path`, or report the error and exit.
fn compile_or_exit(path: &str) -> Compiled {
    let source = match read_file(Path::new(path)) {
        Ok(source) => source,
        Err(e) => {
            report(&e, None);
            std::process::exit(1);
        }
    };
    match compile_source(&source, &CodegenOptions::default()) {
        Ok(compiled) => compiled,
        Err(e) => {
            report(&e, Some(SourceFile::new(path, source)));
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("pegt parser generator");
    println!();
    println!("Usage: pegtc <grammar> <output>");
    println!("       pegtc <command> [args]");
    println!();
    println!("Generates a typed Rust parser module from <grammar>, writes it to");
    println!("<output> and prints the grammar's rules.");
    println!();
    println!("Commands:");
    println!("  check <grammar>    Validate a grammar and generate in memory only");
    println!("  dump <grammar>     Print the grammar's rules");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG           Enable tracing output (e.g. RUST_LOG=debug)");
}
