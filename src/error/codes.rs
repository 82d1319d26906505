/// Error code registry for the ingestion pipeline
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Load errors (input files)
/// - 3000-3999: Storage errors (backups, validated copies)
/// - 5000-5999: Run summary errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;

    // Load errors (2000-2999)
    pub const LOAD_NOT_FOUND: u16 = 2001;
    pub const LOAD_PARSE_ERROR: u16 = 2002;
    pub const LOAD_DUPLICATE_COLUMN: u16 = 2003;

    // Storage errors (3000-3999)
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_PERMISSION_DENIED: u16 = 3002;
    pub const STORAGE_NOT_FOUND: u16 = 3003;
    pub const STORAGE_ALREADY_EXISTS: u16 = 3004;
    pub const STORAGE_BACKUP_FAILED: u16 = 3007;

    // Summary errors (5000-5999)
    pub const SUMMARY_WRITE_FAILED: u16 = 5001;
    pub const SUMMARY_SERIALIZATION_ERROR: u16 = 5002;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        // Configuration errors
        ErrorCode::CONFIG_GENERIC => "Configuration could not be loaded",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_INVALID_TOML => "Invalid TOML syntax in configuration",

        // Load errors
        ErrorCode::LOAD_NOT_FOUND => "Input file not found",
        ErrorCode::LOAD_PARSE_ERROR => "Input file could not be parsed",
        ErrorCode::LOAD_DUPLICATE_COLUMN => "Input file has duplicate column names",

        // Storage errors
        ErrorCode::STORAGE_IO_ERROR => "Storage I/O error",
        ErrorCode::STORAGE_PERMISSION_DENIED => "Storage permission denied",
        ErrorCode::STORAGE_NOT_FOUND => "Storage item not found",
        ErrorCode::STORAGE_ALREADY_EXISTS => "Storage item already exists",
        ErrorCode::STORAGE_BACKUP_FAILED => "Failed to back up file",

        // Summary errors
        ErrorCode::SUMMARY_WRITE_FAILED => "Failed to write run summary",
        ErrorCode::SUMMARY_SERIALIZATION_ERROR => "Run summary is not valid JSON",

        _ => "Unknown error code",
    }
}
