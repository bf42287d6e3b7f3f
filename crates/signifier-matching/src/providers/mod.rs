mod hashed_term;

pub use hashed_term::HashedTermProvider;
