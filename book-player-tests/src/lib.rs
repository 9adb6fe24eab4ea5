use book_player_core::{
    ActivityRegistry, Book, BookInteraction, BookPage, BookPlayer, InputDisposition, PageElement,
    PageInput, PlayerConfig, PlayerEvent,
};
use cucumber::World;
use std::fmt;

#[derive(World, Default)]
pub struct PlayerWorld {
    /// Book under construction; handed to the player on first use
    pub book: Book,

    pub config: PlayerConfig,

    /// Player (the system under test), created lazily from `book`
    pub player: Option<BookPlayer>,

    /// Standalone accumulator for scenarios that skip the player
    pub interaction: BookInteraction,

    /// Every event drained from the player so far
    pub events: Vec<PlayerEvent>,

    pub last_disposition: Option<InputDisposition>,

    pub last_error: Option<String>,
}

impl fmt::Debug for PlayerWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerWorld")
            .field("pages", &self.book.page_count())
            .field("current_page", &self.player.as_ref().and_then(|p| p.current_page()))
            .field("events", &self.events.len())
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl PlayerWorld {
    /// Front matter, `count` numbered pages, back matter
    pub fn build_book(&mut self, count: u32) {
        let mut pages = vec![BookPage::front_matter()];
        pages.extend((1..=count).map(|n| BookPage::numbered(n, PageElement::new())));
        pages.push(BookPage::back_matter());
        self.book = Book::new(pages);
        self.player = None;
    }

    /// Mutable access to a page before the player is created
    pub fn page_mut(&mut self, index: usize) -> &mut BookPage {
        assert!(self.player.is_none(), "book is frozen once reading starts");
        self.book
            .pages
            .get_mut(index)
            .unwrap_or_else(|| panic!("Page {} not in book", index))
    }

    pub fn player(&mut self) -> &mut BookPlayer {
        let (book, config) = (&self.book, &self.config);
        self.player.get_or_insert_with(|| {
            BookPlayer::new(book.clone(), ActivityRegistry::with_builtin(), config.clone())
        })
    }

    /// Run an action against the player and collect its events
    pub fn act<T>(&mut self, action: impl FnOnce(&mut BookPlayer) -> T) -> T {
        let outcome = action(self.player());
        let drained = self.player().drain_events();
        self.events.extend(drained);
        outcome
    }

    pub fn open_page(&mut self, index: usize) {
        if let Err(e) = self.act(|player| player.show_page(index)) {
            self.last_error = Some(e.to_string());
        }
    }

    pub fn send_input(&mut self, input: PageInput) {
        let disposition = self.act(|player| player.handle_input(&input));
        self.last_disposition = Some(disposition);
    }

    pub fn count_events(&self, predicate: impl Fn(&PlayerEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}
