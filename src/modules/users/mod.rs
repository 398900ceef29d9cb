pub mod repository;

pub use marquee_models::User;
