// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DATABASE_FILE_NAME: &str = "finance.db";
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:4200";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// America/Bogota has no DST, so a fixed offset is exact
pub const DEFAULT_BUSINESS_UTC_OFFSET: &str = "-05:00";

// Validation limits
pub const MAX_POCKET_NAME_LENGTH: usize = 255;
pub const MAX_CONCEPT_NAME_LENGTH: usize = 255;
pub const MAX_DAILY_EXPENSE_DESCRIPTION_LENGTH: usize = 500;
pub const MIN_PAYMENT_DAY: u8 = 1;
pub const MAX_PAYMENT_DAY: u8 = 31;

// Ratio returned when spending exists against a zero budget
pub const RATIO_UNBOUNDED: i32 = i32::MAX;

// Error messages
pub const ERR_DATABASE_OPERATION: &str = "Database operation failed";
pub const ERR_SUMMARY_FAILED: &str = "Error calculating monthly summary";
pub const ERR_INVALID_MONTH: &str = "Invalid month format. Use YYYY-MM";
