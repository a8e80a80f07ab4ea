pub mod games;
pub mod notifications;
