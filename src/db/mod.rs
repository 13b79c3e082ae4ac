pub mod hospital;
pub mod service;
pub mod token;
pub mod user;
