pub mod search;
pub mod heads;
pub mod roles;
pub mod predicates;
pub mod pattern;
