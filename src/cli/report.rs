//! Report formatting and printing utilities.
//!
//! Separate from core logic to allow envcheck to be used as a library.
//! Results go to stdout, problems to stderr.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// Print a success message when every referenced variable is declared.
pub fn print_success(variables: usize, files: usize) {
    print_success_to(variables, files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(variables: usize, files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source {} - all {} environment {} declared",
            files,
            plural(files, "file", "files"),
            variables,
            plural(variables, "variable is", "variables are"),
        )
        .green()
    );
}

/// Print one error per undeclared variable, then where to declare them.
pub fn print_missing(missing: &[String], declared_in: &str) {
    print_missing_to(missing, declared_in, &mut io::stderr().lock());
}

pub fn print_missing_to<W: Write>(missing: &[String], declared_in: &str, writer: &mut W) {
    if missing.is_empty() {
        return;
    }

    for name in missing {
        let _ = writeln!(
            writer,
            "{}: environment variable \"{}\" is not declared",
            "error".bold().red(),
            name
        );
    }

    let _ = writeln!(
        writer,
        "\n{} Add the missing {} to {} to continue",
        FAILURE_MARK.red(),
        plural(missing.len(), "variable", "variables"),
        declared_in.bold()
    );
}

/// Print scanned variables, one per line or as a JSON array.
pub fn print_variables(names: &[String], json: bool) -> Result<()> {
    print_variables_to(names, json, &mut io::stdout().lock())
}

pub fn print_variables_to<W: Write>(names: &[String], json: bool, writer: &mut W) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(names)?)?;
    } else {
        for name in names {
            writeln!(writer, "{}", name)?;
        }
    }
    Ok(())
}
