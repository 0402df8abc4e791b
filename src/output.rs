//! Shared output formatting for taskdesk CLI commands.

use serde::Serialize;

use crate::error::Result;

pub const SCHEMA_VERSION: &str = "taskdesk.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    details: Vec<String>,
    warnings: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            summary: Vec::new(),
            details: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let warnings = human.map(|h| h.warnings.clone()).unwrap_or_default();

        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            warnings: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
            warnings,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if options.quiet {
        return Ok(());
    }

    if let Some(human) = human {
        println!("{}", format_human(human));
    }

    Ok(())
}

pub fn emit_error(command: &str, err: &crate::error::Error, json: bool) -> Result<()> {
    if json {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            message: &'a str,
            code: i32,
            kind: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<serde_json::Value>,
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: ErrorBody<'a>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: ErrorBody {
                message: &err.to_string(),
                code: err.exit_code(),
                kind: err.kind(),
                details: err.details(),
            },
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let crate::error::Error::Validation(fields) = err {
        for field in fields {
            eprintln!("  - {field}");
        }
    }
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = Vec::new();
    lines.push(output.header.clone());

    push_summary(&mut lines, &output.summary);
    push_section(&mut lines, "Details", &output.details);
    push_section(&mut lines, "Warnings", &output.warnings);

    lines.join("\n")
}

pub fn infer_command_name_from_args() -> String {
    infer_command_name(std::env::args().skip(1))
}

fn infer_command_name(args: impl IntoIterator<Item = String>) -> String {
    let mut args = args.into_iter();
    let mut command = None;
    let mut subcommand = None;

    while let Some(arg) = args.next() {
        if is_value_taking_flag(&arg) {
            args.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        command = Some(arg);
        break;
    }

    let command = match command {
        Some(cmd) => cmd,
        None => return "taskdesk".to_string(),
    };

    if matches!(command.as_str(), "task" | "category" | "user" | "stats") {
        while let Some(arg) = args.next() {
            if is_value_taking_flag(&arg) {
                args.next();
                continue;
            }
            if arg.starts_with('-') {
                continue;
            }
            subcommand = Some(arg);
            break;
        }
    }

    if let Some(sub) = subcommand {
        format!("{command} {sub}")
    } else {
        command
    }
}

/// Global flags that consume the following token as their value
/// (`--root=path` style carries the value inline and takes nothing).
fn is_value_taking_flag(arg: &str) -> bool {
    matches!(arg, "--root" | "--user")
}

fn push_summary(lines: &mut Vec<String>, summary: &[(String, String)]) {
    if summary.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());
    for (key, value) in summary {
        if value.is_empty() {
            lines.push(format!("- {key}"));
        } else {
            lines.push(format!("- {key}: {value}"));
        }
    }
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push(format!("{title}:"));
    for item in items {
        lines.push(format!("- {item}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(args: &[&str]) -> String {
        infer_command_name(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn command_name_skips_global_flag_values() {
        assert_eq!(infer(&["task", "list"]), "task list");
        assert_eq!(infer(&["--user", "2", "task", "list"]), "task list");
        assert_eq!(infer(&["--root", "/tmp/data", "--json", "init"]), "init");
        assert_eq!(infer(&["task", "--user", "2", "get"]), "task get");
        assert_eq!(infer(&["--user=2", "stats", "summary"]), "stats summary");
        assert_eq!(infer(&[]), "taskdesk");
    }

    #[test]
    fn human_output_formats_sections() {
        let mut output = HumanOutput::new("Task created");
        output.push_summary("id", "4");
        output.push_summary("title", "Buy milk");
        output.push_detail("priority defaulted to medium");

        let text = format_human(&output);
        assert!(text.starts_with("Task created"));
        assert!(text.contains("- id: 4"));
        assert!(text.contains("Details:"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let output = HumanOutput::new("Done");
        assert_eq!(format_human(&output), "Done");
    }
}
