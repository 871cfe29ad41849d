//! Arbor driver CLI.
//!
//! Wires the language, builds the demo module, and drives one of the
//! cross-cutting algorithms over it.

use std::path::Path;
use std::process::ExitCode;

use arbor_archive::ArchiveWriter;
use arbor_eval::{evaluate_decl, Evaluator};
use arbor_fmt::module_to_string;
use arborc::{decl_spelling, demo_module, new_language, verify_algorithms};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let lang = new_language();
    verify_algorithms(&lang);
    let module = demo_module(&lang);

    match args[1].as_str() {
        "print" => {
            print!("{}", module_to_string(&lang, &module));
        }
        "eval" => {
            let mut ev = Evaluator::new();
            for &decl in module.declarations() {
                let name = decl_spelling(&lang, &module, decl);
                match evaluate_decl(&mut ev, &lang, &module, decl) {
                    Ok(value) => println!("{name} = {value}"),
                    // Recoverable: a real driver would defer this
                    // declaration to runtime code generation.
                    Err(err) => println!("{name} = <deferred: {err}>"),
                }
            }
        }
        "gen" => {
            let mut g = arbor_codegen::Generator::new();
            arbor_codegen::generate_module(&mut g, &lang, &module);
            print!("{}", g.finish());
        }
        "archive" => {
            if args.len() < 3 {
                eprintln!("Usage: arbor archive <out.arb>");
                return ExitCode::FAILURE;
            }
            let mut w = ArchiveWriter::new();
            w.write_module(&lang, &module);
            if let Err(err) = w.save(Path::new(&args[2])) {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
            println!(
                "wrote {} ({} types, {} decls, {} strings)",
                args[2],
                w.type_records(),
                w.decl_records(),
                w.string_records()
            );
        }
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn print_usage() {
    eprintln!("Usage: arbor <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  print            Pretty-print the demo module");
    eprintln!("  eval             Constant-fold the demo module's declarations");
    eprintln!("  gen              Emit pseudo-IR for the demo module");
    eprintln!("  archive <path>   Serialize the demo module to a binary archive");
}
