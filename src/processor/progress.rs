//! Progress reporting for long-running reads
//!
//! Byte-based progress bar when the input size is known, spinner when it
//! is not (stdin). Disabled reporters do nothing.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Progress reporter over bytes read
#[derive(Debug, Default)]
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    base_position: u64,
}

impl ProgressReporter {
    /// A reporter that never renders
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Set up a byte progress bar, or a spinner when `total_bytes` is unknown
    pub fn new(total_bytes: Option<u64>, label: &str) -> Self {
        let progress_bar = match total_bytes {
            Some(total) => {
                let pb = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::default_bar().template(concat!(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ",
                    "{bytes}/{total_bytes} ({eta}) {msg}",
                )) {
                    pb.set_style(style.progress_chars("#>-"));
                }
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {bytes} read {msg}")
                {
                    pb.set_style(style);
                }
                pb
            }
        };
        progress_bar.set_message(label.to_string());
        debug!("Progress reporting initialised for {:?} bytes", total_bytes);

        Self {
            progress_bar: Some(progress_bar),
            base_position: 0,
        }
    }

    /// Create a reporter honouring the `show_progress` setting
    pub fn when(enabled: bool, total_bytes: Option<u64>, label: &str) -> Self {
        if enabled {
            Self::new(total_bytes, label)
        } else {
            Self::disabled()
        }
    }

    /// Start a new file; positions reported afterwards are relative to it
    pub fn start_file(&mut self, name: &str) {
        if let Some(ref pb) = self.progress_bar {
            self.base_position = pb.position();
            pb.set_message(format!("Reading: {}", name));
        }
    }

    /// Report bytes read within the current file
    pub fn update(&self, bytes_in_file: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_position(self.base_position + bytes_in_file);
        }
    }

    /// Set a custom message
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Check if progress reporting is enabled
    pub fn is_enabled(&self) -> bool {
        self.progress_bar.is_some()
    }
}
