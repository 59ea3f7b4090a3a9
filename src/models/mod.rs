pub mod language;
pub mod question;
