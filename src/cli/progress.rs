//! Console progress reporting for the crawl.
//!
//! Implements the crawler's [`ProgressObserver`] with an indicatif spinner,
//! updating its message after each fully enriched page. Presentation only;
//! all counts come from the crawler.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::github::{ProgressObserver, TopLevelCollection};

const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Spinner-based progress reporter for interactive runs.
#[derive(Debug)]
pub struct ConsoleProgress {
    spinner: ProgressBar,
}

impl ConsoleProgress {
    /// Starts a spinner announcing the target repository.
    #[must_use]
    pub fn start(owner: &str, repo: &str) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(TICK_INTERVAL);
        spinner.set_message(format!("Gathering data for {owner}/{repo}"));
        Self { spinner }
    }

    /// Completes the spinner with a final summary message.
    pub fn finish(&self, issues: usize, pull_requests: usize) {
        self.spinner.finish_with_message(format!(
            "Retrieved {issues} issues and {pull_requests} pull requests"
        ));
    }

    /// Abandons the spinner with a failure indicator.
    pub fn fail(&self) {
        self.spinner.abandon_with_message("Retriever broke...");
    }
}

impl ProgressObserver for ConsoleProgress {
    fn collection_started(&self, collection: TopLevelCollection, total: u64) {
        self.spinner
            .set_message(format!("Retrieving {} 0/{total}", collection.label()));
    }

    fn page_completed(&self, collection: TopLevelCollection, processed: u64, total: u64) {
        self.spinner.set_message(format!(
            "Retrieving {} {processed}/{total}",
            collection.label()
        ));
    }
}
