/// Smallest valid year (inclusive)
pub const MIN_YEAR: i32 = 1;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u32 = 12;

/// First day of month
pub const MIN_DAY: u32 = 1;

/// Month number for January
pub const JANUARY: u32 = 1;
/// Month number for December
pub const DECEMBER: u32 = 12;

/// Columns in a month grid
pub const DAYS_PER_WEEK: usize = 7;

/// Rows in a month grid; constant so every month renders at the same height
pub const GRID_ROWS: usize = 6;

/// Highest valid `first_day_of_week` (Saturday, with Sunday = 0)
pub const MAX_FIRST_DAY_OF_WEEK: u8 = 6;

/// Two-digit years at or below this value land in the 2000s, above it in the 1900s
pub const TWO_DIGIT_YEAR_PIVOT: u32 = 68;

/// Date component separator of the wire format
pub const DATE_SEPARATOR: char = '-';

/// chrono pattern of the wire format (`YYYY-MM-DD`)
pub const WIRE_FORMAT: &str = "%Y-%m-%d";

/// Display format used when the host does not configure one
pub const DEFAULT_DISPLAY_FORMAT: &str = "YYYY-MM-DD";

/// Month caption format used when the host does not configure one
pub const DEFAULT_MONTH_FORMAT: &str = "MMMM YYYY";

/// `num_days_from_ce` of 1970-01-01, the epoch of the `X` display token
pub const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Seconds in a whole day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Months the range picker shows side by side by default
pub const DEFAULT_RANGE_MONTHS: usize = 2;

/// Months the single-date picker shows by default
pub const DEFAULT_SINGLE_MONTHS: usize = 1;
