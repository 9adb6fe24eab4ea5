mod activity_lifecycle_steps;
mod book_interaction_steps;
