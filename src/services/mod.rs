pub mod analysis;
pub mod challenges;
pub mod providers;
pub mod recommendation;
