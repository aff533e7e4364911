//! Valet REPL
//!
//! Interactive literal shell and file runner. Each line is parsed as one
//! literal and echoed back with its kind and canonical form.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use valet::Context;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match args.len() {
        1 => {
            if let Err(e) = run_repl() {
                eprintln!("valet: {}", e);
                std::process::exit(1);
            }
        }
        2 => {
            if let Err(e) = run_file(&args[1]) {
                eprintln!("valet: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("usage: valet [file]");
            std::process::exit(2);
        }
    }
}

fn run_file(path: &str) -> std::io::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let ctx = Context::new();

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        report(&ctx, line);
    }
    Ok(())
}

fn run_repl() -> rustyline::Result<()> {
    println!("Valet value shell");
    println!("Enter a literal (null, true, 1.5, \"text\"), Ctrl+D to exit.\n");

    let ctx = Context::new();
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                report(&ctx, line);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn report(ctx: &Context, line: &str) {
    match ctx.parse(line) {
        Ok((value, consumed)) => {
            if consumed < line.len() {
                println!(
                    "{}: {} (trailing input ignored: {:?})",
                    value.kind(),
                    value,
                    &line[consumed..]
                );
            } else {
                println!("{}: {}", value.kind(), value);
            }
        }
        Err(e) => println!("error: {}", e),
    }
}
