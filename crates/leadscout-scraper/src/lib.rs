pub mod emails;

pub use emails::{find_emails, EmailScraper};
