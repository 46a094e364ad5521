//! Progress bar display for batch installs

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a batch of tool installs
pub struct ProgressDisplay {
    tool_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total tool count
    pub fn new(total_tools: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let tool_pb = ProgressBar::new(total_tools);
        tool_pb.set_style(style);

        Self { tool_pb }
    }

    /// Update to show the tool currently being installed
    pub fn update_tool(&self, tool_name: &str, current: usize, total: usize) {
        self.tool_pb
            .set_message(format!("({}/{}) {}", current, total, tool_name));
    }

    /// Increment tool progress
    pub fn inc_tool(&self) {
        self.tool_pb.inc(1);
    }

    /// Finish and clear the bar so the report prints cleanly below it
    pub fn finish(&self) {
        self.tool_pb.finish_and_clear();
    }
}
