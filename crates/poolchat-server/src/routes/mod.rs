pub mod health;
pub mod inquiries;
pub mod quotes;
pub mod submissions;
