//! Consistent colored terminal output for gitseed.
//!
//! All user-facing narration goes through these helpers so colors are uniform.
//! `colored` honours NO_COLOR / CLICOLOR, so piped output stays plain.

use colored::Colorize;

const RULE_WIDTH: usize = 70;

// ---------- Banners ----------

/// A full-width rule line
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Rule, centered-ish title, rule
pub fn banner(title: &str) -> String {
    format!("{}\n  {}\n{}", rule(), title.bold(), rule())
}

/// Numbered step heading: "(3/10) Verifying remote"
pub fn step(number: usize, total: usize, title: &str) -> String {
    format!("\n{} {}", progress(number, total), title.bold().cyan())
}

/// Step counter shown in front of each heading: "(1/10)"
pub fn progress(current: usize, total: usize) -> String {
    format!("{}", format!("({}/{})", current, total).dimmed())
}

// ---------- Command echo ----------

/// The command about to run: "   $ git init"
pub fn command(line: &str) -> String {
    format!("   {} {}", "$".dimmed(), line)
}

/// Captured stdout of a successful command, continuation lines indented
pub fn command_ok(output: &str) -> String {
    format!("   {} {}", "✓".green().bold(), indent_tail(output, 5))
}

/// Captured error text of a failed command
pub fn command_err(output: &str) -> String {
    format!(
        "   {} {} {}",
        "✗".red().bold(),
        "Error:".red(),
        indent_tail(output, 5)
    )
}

fn indent_tail(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------- Outcomes ----------

/// A milestone reached: "✓ Push completed"
pub fn success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg)
}

/// Something went wrong but the run goes on (push fallback, no upstream)
pub fn warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg)
}

/// Fatal outcome, printed just before the run stops
pub fn error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg)
}

/// Blue "i" + message, for outcomes that are expected and harmless
pub fn info(msg: &str) -> String {
    format!("{} {}", "i".blue().bold(), msg)
}

/// Side remarks: credential note, overflow count, report location
pub fn hint(msg: &str) -> String {
    format!("{}", msg.dimmed())
}

// ---------- Listings ----------

/// One sampled path in the file listing
pub fn file_entry(path: &str) -> String {
    format!("      - {}", path)
}

/// Format a key-value summary line with aligned values
pub fn summary_line(key: &str, value: &str) -> String {
    format!("  {:<12} {}", format!("{}:", key).dimmed(), value)
}

/// Bold section label: "Next steps:", "Useful commands:"
pub fn section(label: &str) -> String {
    format!("{}", label.bold())
}

/// A command suggestion with an aligned trailing comment
pub fn suggestion(cmd: &str, comment: &str) -> String {
    format!("   {:<30} {}", cmd.cyan(), format!("# {}", comment).dimmed())
}
