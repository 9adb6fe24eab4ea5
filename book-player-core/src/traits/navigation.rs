/// Navigation operations an activity context delegates to
///
/// Implementations must tolerate being called from inside an activity's
/// `start`; the player's queue defers the actual page change.
pub trait NavigationController: Send + Sync {
    fn navigate_to_next_page(&self);

    fn navigate_to_previous_page(&self);
}
