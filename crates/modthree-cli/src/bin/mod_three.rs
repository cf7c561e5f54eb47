// mod-three: remainder of binary numerals divided by three.
//
// Reads numerals from the command line, from stdin (one per line), or from a
// single interactive prompt, and prints the remainder of each:
//   Remainder when 1101 is divided by 3: 1
//
// Usage:
//   mod-three [OPTIONS] [BINARY...]
//
// Options:
//   -i, --interactive       Prompt for one numeral (no BINARY arguments)
//   -q, --quiet             Print only the remainder
//   -t, --trace             Also print the residue after each digit
//   --log-file PATH         Also write log records to PATH
//   -h, --help              Print help
//
// Exit status is 1 if any input was rejected (including stdin lines that are
// not UTF-8), 2 on usage errors.

use std::io::{self, BufRead, Write};
use std::process;

use modthree_dfa::Traced;
use modthree_fsm::ModThreeHandle;

fn print_help() {
    println!("mod-three: Remainder of binary numerals divided by three.");
    println!();
    println!("Usage: mod-three [OPTIONS] [BINARY...]");
    println!();
    println!("If BINARY arguments are given, computes each one.");
    println!("Otherwise reads numerals from stdin (one per line).");
    println!("Digits are read most significant first; the empty numeral is 0.");
    println!();
    println!("Options:");
    println!("  -i, --interactive       Prompt for a single numeral");
    println!("                          (cannot be combined with BINARY)");
    println!("  -q, --quiet             Print only the remainder");
    println!("  -t, --trace             Also print the residue after each digit");
    println!("  --log-file PATH         Also write log records to PATH");
    println!("                          (default: ${})", modthree_cli::LOG_FILE_ENV);
    println!("  -h, --help              Print this help");
    println!();
    println!("Log level is taken from RUST_LOG (default: warn).");
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = modthree_cli::parse_args(&args)
        .unwrap_or_else(|e| modthree_cli::fatal(&e.to_string()))
        .with_env();

    if options.help {
        print_help();
        return;
    }

    if let Err(e) = modthree_cli::init_logging(options.log_file.as_deref()) {
        modthree_cli::fatal(&e.to_string());
    }

    let mut handle = ModThreeHandle::with_observer(Traced);
    handle.set_diagnostics(|msg| eprintln!("{msg}"));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut all_valid = true;
    let mut stdin_failed = false;

    let mut run = |input: &str, out: &mut io::BufWriter<io::StdoutLock<'static>>| {
        match modthree_cli::process_input(&mut handle, input, &options, out) {
            Ok(valid) => all_valid &= valid,
            Err(e) => modthree_cli::fatal(&format!("failed to write output: {e}")),
        }
    };

    if options.interactive {
        print!("{}", modthree_cli::PROMPT);
        let _ = io::stdout().flush();
        let mut line = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut line) {
            modthree_cli::fatal(&format!("error reading stdin: {e}"));
        }
        run(line.trim_end_matches(['\r', '\n']), &mut out);
    } else if !options.inputs.is_empty() {
        for input in &options.inputs {
            run(input, &mut out);
        }
    } else {
        let stdin = io::stdin();
        for (index, line) in stdin.lock().split(b'\n').enumerate() {
            let bytes = match line {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    stdin_failed = true;
                    break;
                }
            };
            let input = match modthree_cli::decode_line(&bytes, index + 1) {
                Ok(input) => input,
                Err(e) => {
                    eprintln!("Error processing input: {e}");
                    stdin_failed = true;
                    continue;
                }
            };
            if input.is_empty() {
                continue;
            }
            run(input, &mut out);
        }
    }

    drop(run);
    all_valid &= !stdin_failed;
    if let Err(e) = out.flush() {
        modthree_cli::fatal(&format!("failed to write output: {e}"));
    }
    if !all_valid {
        process::exit(1);
    }
}
