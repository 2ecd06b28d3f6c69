//! Console output utilities.
//!
//! Everything human-readable goes to stderr so the JSON report can be
//! piped from stdout.

use std::fs;
use std::io::Write;
use std::path::Path;

use console::style;

use crate::error::Result;
use crate::scrape::ScrapeReport;

/// Print an info message.
pub fn print_info(message: &str) {
    eprintln!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print a numbered pipeline step, e.g. `[1/3] Resolving user: @alice`.
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", style(format!("[{}/{}]", step, total)).bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    eprintln!(
        "{}",
        style(format!("TikTok Collection Scraper v{}", env!("CARGO_PKG_VERSION")))
            .cyan()
            .bold()
    );
}

/// Write the report to `path`, or to stdout when no path is given.
pub fn write_report(report: &ScrapeReport, path: Option<&Path>, pretty: bool) -> Result<()> {
    let json = report.to_json(pretty)?;

    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunMode;
    use crate::resolve::ResolvedIdentity;

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = ScrapeReport::new(
            "@alice",
            ResolvedIdentity {
                sec_uid: "MS4wLjABalice".into(),
                uid: None,
                unique_id: Some("alice".into()),
            },
            RunMode::Guest,
            0.0,
            Vec::new(),
        );

        write_report(&report, Some(&path), false).unwrap();

        let written: ScrapeReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, report);
    }
}
