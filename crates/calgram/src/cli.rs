//! Command-line front end: validate a calendar token and print its derivations.
//!
//! ```text
//! calgram 05/12/2023            # explanation, both derivations, both trees
//! calgram --json 05/12/2023     # the same as a JSON report
//! calgram --batch tokens.txt    # one verdict per line
//! ```
//!
//! Exits 0 when every input is valid, 1 when any is invalid and 2 on usage or
//! I/O errors. Set `RUST_LOG=debug` to trace the derivations.

use calgram::{derive, explain, recognize, validate, Derivation, Grammar, Order, Report};
use facet::Facet;
use std::fmt::{self, Write as _};
use std::process::ExitCode;
use std::{fs, io};
use thiserror::Error;

/// Validate calendar tokens against the grammar and show their derivations.
#[derive(Facet)]
struct Args {
    /// The token to check, or a file of tokens with `--batch`.
    #[facet(positional)]
    input: String,

    /// Print a JSON report instead of text.
    #[facet(named, short = 'j', default)]
    json: bool,

    /// Print the grammar before the results.
    #[facet(named, short = 'g', default)]
    grammar: bool,

    /// Read one token per line from the file named by INPUT.
    #[facet(named, short = 'b', default)]
    batch: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Derivation(#[from] calgram::DerivationError),
    #[error("formatting output failed")]
    Format(#[from] fmt::Error),
}

struct Output {
    text: String,
    all_valid: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Args = match facet_args::from_std_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let result = if args.batch {
        run_batch(&args)
    } else {
        run_single(&args)
    };

    match result {
        Ok(output) => {
            print!("{}", output.text);
            if output.all_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn preamble(args: &Args) -> Result<String, CliError> {
    let mut text = String::new();
    if args.grammar && !args.json {
        writeln!(text, "Grammar:\n{}\n", Grammar::canonical())?;
    }
    Ok(text)
}

fn run_batch(args: &Args) -> Result<Output, CliError> {
    let contents = fs::read_to_string(&args.input).map_err(|source| CliError::Read {
        path: args.input.clone(),
        source,
    })?;

    let mut text = preamble(args)?;
    let mut all_valid = true;
    for line in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
        all_valid &= validate(line);
        if args.json {
            writeln!(text, "{}", Report::new(line).to_json())?;
            continue;
        }
        match recognize(line) {
            Ok(_) => writeln!(text, "{line}\tvalid")?,
            Err(reason) => writeln!(text, "{line}\tinvalid: {reason}")?,
        }
    }
    Ok(Output { text, all_valid })
}

fn run_single(args: &Args) -> Result<Output, CliError> {
    let mut text = preamble(args)?;
    // The grammar engine never trims, so a pasted token is trimmed here.
    let input = args.input.trim();

    if args.json {
        let report = Report::new(input);
        writeln!(text, "{}", report.to_json())?;
        return Ok(Output {
            text,
            all_valid: report.valid,
        });
    }

    let fields = match recognize(input) {
        Ok(fields) => fields,
        Err(reason) => {
            writeln!(text, "✗ '{input}' is invalid: {reason}")?;
            return Ok(Output {
                text,
                all_valid: false,
            });
        }
    };

    writeln!(text, "✓ '{input}' is valid according to the grammar.\n")?;
    writeln!(text, "Explanation:")?;
    for line in explain(&fields) {
        writeln!(text, "{line}")?;
    }
    for order in [Order::Leftmost, Order::Rightmost] {
        write_derivation(&mut text, &derive(input, order)?)?;
    }
    Ok(Output {
        text,
        all_valid: true,
    })
}

fn write_derivation(text: &mut String, derivation: &Derivation) -> fmt::Result {
    let heading = match derivation.order {
        Order::Leftmost => "Leftmost",
        Order::Rightmost => "Rightmost",
    };
    writeln!(text, "\n{heading} derivation:")?;
    for (i, step) in derivation.steps.iter().enumerate() {
        let arrow = if i == 0 { "  " } else { "=>" };
        writeln!(text, "  {arrow} {step}")?;
    }
    writeln!(text, "\n{heading} parse tree:")?;
    text.write_str(&derivation.tree.render_ascii())
}
