// progress.rs - Terminal progress bar for replicate comparisons

use crate::core::{ProgressEvent, ProgressObserver};
use indicatif::{ProgressBar, ProgressStyle};

/// Advances an indicatif bar once per compared replicate pair
pub struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    pub fn new(total_pairs: usize) -> Self {
        let bar = ProgressBar::new(total_pairs as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    /// Hidden bar, for quiet runs
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn on_pair_compared(&mut self, event: &ProgressEvent<'_>) {
        self.bar.set_length(event.total as u64);
        self.bar.set_position(event.completed as u64);
        self.bar.set_message(format!("{} vs {}", event.first, event.second));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_follows_events() {
        let mut observer = ProgressBarObserver::hidden();
        observer.on_pair_compared(&ProgressEvent {
            completed: 2,
            total: 3,
            first: "a.vcf",
            second: "c.vcf",
        });
        assert_eq!(observer.bar.position(), 2);
        assert_eq!(observer.bar.length(), Some(3));
        observer.finish();
    }
}
