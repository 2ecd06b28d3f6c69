//! Console progress for a scrape run.

use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::console::print_step;
use crate::output::stats::format_collection_line;
use crate::resolve::ResolvedIdentity;
use crate::scrape::{CollectionDescriptor, CollectionResult, ScrapeProgress};

/// Number of pipeline steps shown in the step headers.
const STEPS: usize = 3;

/// Characters of the secUid echoed after resolution.
const SEC_UID_PREVIEW: usize = 30;

/// Create a spinner for long-running operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Prints step headers and one line per collection to stderr.
///
/// While waiting on the network a spinner is shown, but only when stderr
/// is a terminal.
pub struct ConsoleProgress {
    spinner: Option<ProgressBar>,
    interactive: bool,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            spinner: None,
            interactive: Term::stderr().is_term(),
        }
    }

    fn start_spinner(&mut self, message: &str) {
        if self.interactive {
            self.spinner = Some(create_spinner(message));
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn println(&self, line: &str) {
        match &self.spinner {
            Some(spinner) => spinner.println(line),
            None => eprintln!("{}", line),
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrapeProgress for ConsoleProgress {
    fn resolving(&mut self, target: &str) {
        print_step(1, STEPS, &format!("Resolving user: {}", target));
        self.start_spinner("resolving...");
    }

    fn resolved(&mut self, identity: &ResolvedIdentity) {
        self.stop_spinner();
        let preview: String = identity.sec_uid.chars().take(SEC_UID_PREVIEW).collect();
        eprintln!("      secUid: {}...", preview);
    }

    fn listing_collections(&mut self) {
        print_step(2, STEPS, "Fetching collections...");
        self.start_spinner("listing collections...");
    }

    fn collections_listed(&mut self, collections: &[CollectionDescriptor]) {
        self.stop_spinner();
        eprintln!("      Found {} collections", collections.len());
        print_step(3, STEPS, "Fetching videos...");
        if let Some(first) = collections.first() {
            self.start_spinner(&format!("fetching {}", first.name));
        }
    }

    fn collection_done(&mut self, index: usize, total: usize, result: &CollectionResult) {
        self.println(&format_collection_line(index, total, result));

        if index + 1 == total {
            self.stop_spinner();
        } else if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("collection {}/{}", index + 2, total));
        }
    }
}

impl Drop for ConsoleProgress {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
