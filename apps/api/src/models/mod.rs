pub mod candidate;
pub mod resume;
pub mod score;
