use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Page index within the book (front and back matter excluded by the caller)
pub type PageIndex = usize;

/// Per-session accumulator of which pages and media a reader has seen
///
/// All operations are total: duplicate indices are absorbed by the sets and
/// duration deltas are taken as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookInteraction {
    /// Set once the reader reaches the last numbered page, never cleared
    last_numbered_page_was_read: bool,

    /// Accumulated audio playback (seconds)
    total_audio_duration: f64,

    /// Accumulated video playback (seconds)
    total_video_duration: f64,

    pages_shown: BTreeSet<PageIndex>,
    audio_pages_shown: BTreeSet<PageIndex>,
    video_pages_shown: BTreeSet<PageIndex>,
}

/// Analytics snapshot handed to the reporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub audio_pages: usize,

    /// `|pages shown| - |audio pages shown|`, which goes negative when audio
    /// marks arrive for pages that were never reported as shown
    pub non_audio_pages: i64,

    pub video_pages: usize,
    pub audio_duration: f64,
    pub video_duration: f64,
    pub last_numbered_page_read: bool,
}

impl BookInteraction {
    /// Create an empty accumulator for a new reading session
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Page visits =====

    /// Record that a page was shown
    pub fn page_shown(&mut self, index: PageIndex) {
        if self.pages_shown.insert(index) {
            tracing::trace!("page {} shown for the first time", index);
        }
    }

    /// Record that a page with audio was shown
    pub fn audio_page_shown(&mut self, index: PageIndex) {
        self.audio_pages_shown.insert(index);
    }

    /// Record that a page with video was shown
    pub fn video_page_shown(&mut self, index: PageIndex) {
        self.video_pages_shown.insert(index);
    }

    /// Forget visited pages when a reading pass restarts
    ///
    /// Durations and the last-page flag survive.
    pub fn clear_pages_shown(&mut self) {
        tracing::debug!(
            pages = self.pages_shown.len(),
            audio = self.audio_pages_shown.len(),
            video = self.video_pages_shown.len(),
            "Clearing pages shown"
        );
        self.pages_shown.clear();
        self.audio_pages_shown.clear();
        self.video_pages_shown.clear();
    }

    // ===== Media durations =====

    /// Add to the audio playback total (no validation of `delta`)
    pub fn add_audio_duration(&mut self, delta: f64) {
        self.total_audio_duration += delta;
    }

    /// Add to the video playback total (no validation of `delta`)
    pub fn add_video_duration(&mut self, delta: f64) {
        self.total_video_duration += delta;
    }

    // ===== Last page =====

    pub fn mark_last_numbered_page_read(&mut self) {
        if !self.last_numbered_page_was_read {
            tracing::info!("📖 Last numbered page reached");
        }
        self.last_numbered_page_was_read = true;
    }

    // ===== Getters =====

    pub fn last_numbered_page_was_read(&self) -> bool {
        self.last_numbered_page_was_read
    }

    pub fn total_audio_duration(&self) -> f64 {
        self.total_audio_duration
    }

    pub fn total_video_duration(&self) -> f64 {
        self.total_video_duration
    }

    pub fn pages_shown(&self) -> &BTreeSet<PageIndex> {
        &self.pages_shown
    }

    pub fn audio_pages_shown(&self) -> &BTreeSet<PageIndex> {
        &self.audio_pages_shown
    }

    pub fn video_pages_shown(&self) -> &BTreeSet<PageIndex> {
        &self.video_pages_shown
    }

    /// Build the analytics snapshot (pure read)
    pub fn progress_report_properties_for_analytics(&self) -> ProgressReport {
        let audio_pages = self.audio_pages_shown.len();

        ProgressReport {
            audio_pages,
            // Plain count difference, not the set difference
            non_audio_pages: self.pages_shown.len() as i64 - audio_pages as i64,
            video_pages: self.video_pages_shown.len(),
            audio_duration: self.total_audio_duration,
            video_duration: self.total_video_duration,
            last_numbered_page_read: self.last_numbered_page_was_read,
        }
    }
}
