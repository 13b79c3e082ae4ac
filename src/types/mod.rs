pub mod error;
pub mod hospital;
pub mod response;
pub mod token;
pub mod user;
