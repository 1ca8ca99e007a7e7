pub mod about;
pub mod analysis;
pub mod compare;
pub mod dashboard;
pub mod help;
pub mod home;
pub mod login;
