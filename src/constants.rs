/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "tea_tracker_session";

/// Session key under which the logged-in user is stored
pub const SESSION_USER_KEY: &str = "current_user";

/// Maximum username length accepted at registration
pub const MAX_USERNAME_LEN: usize = 64;

// =============================================================================
// Error Messages
// =============================================================================

/// Error message when a product patch carries no recognized fields
pub const ERR_NO_UPDATE_FIELDS: &str = "No valid fields provided for update.";

/// Error message when a quantity is zero or negative
pub const ERR_NON_POSITIVE_QUANTITY: &str = "Quantity must be a positive number.";

/// Error message when re-basing a purchase below the quantity already sold
pub const ERR_REBASE_BELOW_SOLD: &str =
    "Purchased quantity cannot drop below the quantity already sold.";
