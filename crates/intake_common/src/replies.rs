//! Canned assistant replies.
//!
//! Category-specific location questions and small-talk answers live in the
//! rule tables (see [`crate::intent`]); everything else the assistant says
//! is here.

use crate::category::{category_menu, Category};
use crate::ticket::ComplaintTicket;

/// Assistant display name
pub const ASSISTANT_NAME: &str = "Green Assistant";

/// Interstitial shown while the ticket is being submitted
pub const SUBMITTING: &str = "Submitting your report... ⏳";

/// Shown when the complaints API rejects or fails the submission
pub const SUBMIT_FAILED: &str =
    "❌ Oops! Something went wrong submitting the report. Please try again later.";

/// Asked once the location slot is filled
pub const ASK_DESCRIPTION: &str =
    "Got the location. \n\nPlease describe the issue briefly (e.g., 'Tap broken', 'Stale food served').";

/// Fallback when nothing in the utterance was recognised
pub const NUDGE: &str =
    "I didn't quite catch that. Try saying 'Report Food Issue' or 'Water Leakage'.";

/// Seeded first message of every conversation
pub fn welcome() -> String {
    "Hi! I'm your Green Campus Assistant. 🌿\n\n\
     I can help you report issues like:\n\
     - 🍔 Food Quality / Hygiene\n\
     - 🧹 Hostel Cleanliness\n\
     - 💧 Water/Food Wastage\n\
     - ⚡ Electricity Issues\n\n\
     Just type what's wrong!"
        .to_string()
}

/// Ask the user to pick a category
pub fn ask_category() -> String {
    format!(
        "I can help file a report. What kind of issue is it?\n({})",
        category_menu()
    )
}

/// Confirmation after a clarification turn resolved the category
pub fn confirm_category(category: Category) -> String {
    format!(
        "Okay, reporting: {}. \n\nWhere is this happening? (Location)",
        category
    )
}

/// Confirmation after the ticket was accepted
pub fn submitted(ticket: &ComplaintTicket) -> String {
    format!(
        "✅ **Complaint Registered!**\n\nThe staff has been notified about the {} issue at {}.\n\nThank you for keeping the campus green! 🌿",
        ticket.category,
        ticket.location()
    )
}

/// Reply to a turn that found an earlier submission abandoned mid-flight
pub fn submission_interrupted() -> String {
    "⚠️ Your previous report was interrupted before we heard back from the server. \
     Please check your complaints list before reporting it again."
        .to_string()
}

/// Closing line for interactive sessions
pub fn farewell() -> String {
    "Bye! Thanks for helping keep the campus green. 🌿".to_string()
}
