// crates/console/src/indicator.rs
//! Terminal rendition of the floating job indicator.
//!
//! One progress bar per tracked job, fed from the tracker's snapshot
//! channel; toast events print above the bars so they don't clobber the
//! drawing.

use std::collections::HashMap;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use aibys_console_types::{AppEvent, JobId, JobSnapshot, JobStatus, ToastKind};

pub struct Indicator {
    multi: MultiProgress,
    bars: HashMap<JobId, ProgressBar>,
}

impl Indicator {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: HashMap::new(),
        }
    }

    /// Indicator that draws nowhere, for tests.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden()),
            bars: HashMap::new(),
        }
    }

    /// Render one snapshot, creating the job's bar on first sight.
    pub fn apply(&mut self, snap: &JobSnapshot) {
        let multi = &self.multi;
        let bar = self.bars.entry(snap.id).or_insert_with(|| {
            let bar = multi.add(ProgressBar::new(snap.total.max(1)));
            bar.set_style(bar_style());
            bar
        });

        bar.set_length(snap.total.max(1));
        bar.set_position(snap.current);
        match snap.status {
            JobStatus::Running => bar.set_message(snap.label.clone()),
            JobStatus::Done => bar.finish_with_message(format!("selesai — {}", snap.label)),
            JobStatus::Failed => {
                let reason = snap.message.clone().unwrap_or_else(|| "gagal".to_string());
                bar.abandon_with_message(format!("gagal — {} ({reason})", snap.label));
            }
        }
    }

    /// Print a toast line above the bars. Refresh events carry no UI here;
    /// list views are the dashboard's concern.
    pub fn toast(&self, event: &AppEvent) {
        if let AppEvent::ShowToast {
            kind,
            message,
            description,
        } = event
        {
            let prefix = match kind {
                ToastKind::Success => "✓",
                ToastKind::Error => "✗",
            };
            let line = match description {
                Some(desc) => format!("{prefix} {message} — {desc}"),
                None => format!("{prefix} {message}"),
            };
            let _ = self.multi.println(line);
        }
    }

    /// Number of bars currently drawn (running or finished).
    #[cfg(test)]
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} [{bar:20.cyan/blue}] {pos}/{len} {msg}")
        .expect("valid progress template")
        .progress_chars("=>-")
}
