pub mod matches_upcoming;
pub mod players;
pub mod years;

pub mod prelude {
    pub use super::matches_upcoming::Entity as MatchesUpcoming;
    pub use super::players::Entity as Players;
    pub use super::years::Entity as Years;
}
