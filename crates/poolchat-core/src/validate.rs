//! Boundary validation for submission payloads.
//!
//! Runs before anything is dispatched to the engine or handed to the
//! store; the reducer never sees a malformed payload and the store does
//! not re-check business rules.

use crate::engine::{ContactDetails, InquiryDetails};
use crate::error::{ChatError, Result};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

const MIN_PHONE_DIGITS: usize = 7;
const MIN_ADDRESS_LEN: usize = 3;

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ChatError::validation("name", "Name is required"));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<()> {
    if !email_re().is_match(email.trim()) {
        return Err(ChatError::validation("email", "Invalid email"));
    }
    Ok(())
}

fn check_phone(phone: &str) -> Result<()> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(ChatError::validation("phone", "Phone is required"));
    }
    Ok(())
}

/// Validate contact details for a quote submission.
pub fn contact_details(details: &ContactDetails) -> Result<()> {
    check_name(&details.name)?;
    check_email(&details.email)?;
    check_phone(&details.phone)?;
    if details.address.trim().len() < MIN_ADDRESS_LEN {
        return Err(ChatError::validation("address", "Address is required"));
    }
    Ok(())
}

/// Validate inquiry details for the repair/question branch.
pub fn inquiry_details(inquiry: &InquiryDetails) -> Result<()> {
    check_name(&inquiry.name)?;
    check_phone(&inquiry.phone)?;
    check_email(&inquiry.email)?;
    if inquiry.message.trim().is_empty() {
        return Err(ChatError::validation("message", "Message is required"));
    }
    Ok(())
}
