//! Application constants
//!
//! Centralized location for endpoint defaults and the visual end values
//! the focus animation interpolates between.

/// Default photo API base URL
pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

/// Number of records requested per load
pub const DEFAULT_BATCH_SIZE: u32 = 30;

/// Environment variable that overrides the configured access key
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

/// Application name
pub const APP_NAME: &str = "Wallpaper Browser";

/// Directory under $HOME holding config and log files
pub const APP_DIR: &str = ".wallpaper-browser";

/// Log file name inside the app directory
pub const LOG_FILE: &str = "wallpaper-browser.log";

// Focus transform end values (Normal -> Focused)
pub const SCALE_NORMAL: f64 = 1.0;
pub const SCALE_FOCUSED: f64 = 0.9;
pub const RADIUS_NORMAL: f64 = 0.0;
pub const RADIUS_FOCUSED: f64 = 30.0;
/// Action bar height in layout units; hidden means translated by its full height
pub const BAR_HEIGHT_UNITS: f64 = 80.0;
pub const BAR_OFFSET_HIDDEN: f64 = -BAR_HEIGHT_UNITS;
pub const BAR_OFFSET_VISIBLE: f64 = 0.0;

// Spring parameters
pub const SPRING_STIFFNESS: f64 = 40.0;
pub const SPRING_DAMPING: f64 = 7.0;
pub const SPRING_MASS: f64 = 1.0;
pub const SPRING_REST_DISPLACEMENT: f64 = 0.005;
pub const SPRING_REST_SPEED: f64 = 0.005;

/// Animation tick interval in milliseconds
pub const TICK_MS: u64 = 16;

/// Action bar height in terminal rows
pub const BAR_ROWS: u16 = 3;

/// Largest corner rounding in half-block pixels
pub const MAX_CORNER_PIXELS: f64 = 4.0;

/// Decoded previews are downscaled to fit this box
pub const PREVIEW_MAX_WIDTH: u32 = 320;
pub const PREVIEW_MAX_HEIGHT: u32 = 200;
