use crate::application::{
    ActivityHost, ActivityRegistry, InputDisposition, MediaKind, NavigationQueue, PlayerCommand,
    PlayerConfig, PlayerError, Result,
};
use crate::domain::{
    Book, BookInteraction, Direction, InputPolicy, PageIndex, PageInput, PlayerEvent,
    ProgressReport,
};
use std::sync::Arc;

/// One reading session over a book
///
/// Drives the activity host and the interaction accumulator from page
/// transitions, input and media events. Navigation requested by activities
/// is queued and applied after the triggering step completes.
pub struct BookPlayer {
    book: Book,
    host: ActivityHost,
    interaction: BookInteraction,

    /// Shared with every activity context the host hands out
    navigation: Arc<NavigationQueue>,

    config: PlayerConfig,
    current_page: Option<PageIndex>,

    /// Outbound event log (caller drains this)
    outbound: Vec<PlayerEvent>,
}

impl BookPlayer {
    pub fn new(book: Book, registry: ActivityRegistry, config: PlayerConfig) -> Self {
        let navigation = Arc::new(NavigationQueue::new(config.navigation_queue_capacity));
        let host = ActivityHost::new(registry, navigation.clone())
            .with_navigation_hiding(config.hide_navigation_for_self_navigating);

        Self {
            book,
            host,
            interaction: BookInteraction::new(),
            navigation,
            config,
            current_page: None,
            outbound: Vec::new(),
        }
    }

    /// Player with the built-in activities and default configuration
    pub fn with_builtin(book: Book) -> Self {
        Self::new(book, ActivityRegistry::with_builtin(), PlayerConfig::default())
    }

    /// Execute a single command
    pub fn handle_command(&mut self, command: PlayerCommand) -> Result<()> {
        match command {
            PlayerCommand::ShowPage { index } => self.show_page(index),
            PlayerCommand::NextPage => self.next_page().map(|_| ()),
            PlayerCommand::PreviousPage => self.previous_page().map(|_| ()),
            PlayerCommand::Input { input } => {
                self.handle_input(&input);
                Ok(())
            }
            PlayerCommand::MediaPlayed { kind, seconds } => {
                self.media_played(kind, seconds);
                Ok(())
            }
            PlayerCommand::RestartReading => {
                self.restart_reading();
                Ok(())
            }
            PlayerCommand::Close => {
                self.close();
                Ok(())
            }
        }
    }

    // ===== Navigation =====

    /// Make `index` the current page
    pub fn show_page(&mut self, index: PageIndex) -> Result<()> {
        self.display(index)?;
        self.process_navigation();
        Ok(())
    }

    /// Returns false at the end of the book
    pub fn next_page(&mut self) -> Result<bool> {
        let target = match self.current_page {
            None if self.book.page_count() == 0 => return Err(PlayerError::EmptyBook),
            None => Some(0),
            Some(_) => self.neighbour(Direction::Forward),
        };
        self.go_to(target)
    }

    /// Returns false at the start of the book
    pub fn previous_page(&mut self) -> Result<bool> {
        if self.book.page_count() == 0 {
            return Err(PlayerError::EmptyBook);
        }
        let target = self.neighbour(Direction::Backward);
        self.go_to(target)
    }

    fn go_to(&mut self, target: Option<PageIndex>) -> Result<bool> {
        match target {
            Some(index) => {
                self.show_page(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn neighbour(&self, direction: Direction) -> Option<PageIndex> {
        let current = self.current_page?;
        match direction {
            Direction::Forward if current + 1 < self.book.page_count() => Some(current + 1),
            Direction::Backward if current > 0 => Some(current - 1),
            _ => None,
        }
    }

    /// True when the current page is at or past the last numbered page
    ///
    /// Only then does arriving at page 0 start a new reading pass; flipping
    /// back to the cover mid-book keeps what was read.
    fn finished_pass(&self) -> bool {
        match (self.current_page, self.book.last_numbered_index()) {
            (Some(current), Some(last)) => current != 0 && current >= last,
            _ => false,
        }
    }

    /// Page transition without draining queued navigation
    fn display(&mut self, index: PageIndex) -> Result<()> {
        let page = self
            .book
            .page(index)
            .cloned()
            .ok_or(PlayerError::PageOutOfRange {
                index,
                count: self.book.page_count(),
            })?;

        // Previous activity is fully stopped before anything else happens
        self.host.stop();
        self.collect_host_events();

        if index == 0 && self.finished_pass() && self.config.reset_on_restart {
            self.restart_reading();
        }

        self.current_page = Some(index);
        let numbered = page.kind.is_numbered();
        if numbered {
            self.interaction.page_shown(index);
            if page.has_audio {
                self.interaction.audio_page_shown(index);
            }
            if page.has_video {
                self.interaction.video_page_shown(index);
            }
            if self.book.last_numbered_index() == Some(index) {
                self.interaction.mark_last_numbered_page_read();
            }
        }

        tracing::info!("📄 Showing page {} ({:?})", index, page.kind);
        self.outbound.push(PlayerEvent::PageShown { index, numbered });

        if page.element.activity_id().is_some() {
            match self.host.load_activity(page.element) {
                Ok(loaded) => self.host.start(loaded),
                Err(e) => {
                    tracing::warn!("Showing page {} without its activity: {}", index, e);
                    self.outbound.push(PlayerEvent::ActivityMountFailed {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
            self.collect_host_events();
        }

        Ok(())
    }

    /// Apply navigation queued by activities or default input handling
    fn process_navigation(&mut self) {
        // An activity that navigates on every start could otherwise loop forever
        let limit = self.book.page_count() + 1;
        let mut applied = 0;

        while let Some(direction) = self.navigation.pop() {
            if applied >= limit {
                let dropped = self.navigation.drain().len() + 1;
                tracing::warn!("Navigation chain too long, dropping {} requests", dropped);
                break;
            }
            applied += 1;

            self.outbound.push(PlayerEvent::NavigationRequested { direction });

            match self.neighbour(direction) {
                Some(target) => {
                    if let Err(e) = self.display(target) {
                        tracing::warn!("Navigation to page {} failed: {}", target, e);
                    }
                }
                None => tracing::debug!("Ignoring {:?} navigation at book edge", direction),
            }
        }
    }

    // ===== Input & media =====

    /// Offer input to the current page
    pub fn handle_input(&mut self, input: &PageInput) -> InputDisposition {
        if self.current_page.is_none() {
            return InputDisposition::Unhandled;
        }

        let disposition = self.host.handle_input(input);
        self.collect_host_events();
        self.process_navigation();
        disposition
    }

    pub fn media_played(&mut self, kind: MediaKind, seconds: f64) {
        match kind {
            MediaKind::Audio => self.interaction.add_audio_duration(seconds),
            MediaKind::Video => self.interaction.add_video_duration(seconds),
        }
    }

    /// Start a new reading pass, keeping durations and the last-page flag
    pub fn restart_reading(&mut self) {
        self.interaction.clear_pages_shown();
        self.outbound.push(PlayerEvent::ReadingRestarted);
    }

    /// End of session: stop the live activity
    pub fn close(&mut self) {
        self.host.stop();
        self.collect_host_events();
        self.navigation.drain();
    }

    // ===== Queries =====

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn current_page(&self) -> Option<PageIndex> {
        self.current_page
    }

    pub fn host(&self) -> &ActivityHost {
        &self.host
    }

    pub fn interaction(&self) -> &BookInteraction {
        &self.interaction
    }

    pub fn input_policy(&self) -> InputPolicy {
        self.host.input_policy()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Analytics snapshot for the reporter
    pub fn progress_report(&self) -> ProgressReport {
        self.interaction.progress_report_properties_for_analytics()
    }

    /// Drain all emitted events (caller's responsibility)
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.outbound)
    }

    fn collect_host_events(&mut self) {
        let events = self.host.drain_events();
        self.outbound.extend(events);
    }
}
