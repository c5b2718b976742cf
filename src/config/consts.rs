/// Item prefix identifying LED components
pub const DEFAULT_LEDS_PREFIX: &str = "7";
/// Item prefix identifying optics components
pub const DEFAULT_OPTICS_PREFIX: &str = "6";
/// TCP port of the reader's command interface
pub const DEFAULT_COMMAND_PORT: u16 = 9004;
/// Time allowed for the reader to answer a single command
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 5_000;
/// Delay between connection attempts
pub const DEFAULT_CONNECT_RETRY_DELAY_MS: u64 = 2_000;
/// Delay between trigger attempts
pub const DEFAULT_TRIGGER_RETRY_DELAY_MS: u64 = 1_000;
/// Highest area number the reader can hold
pub const MAX_AREAS: usize = 250;
/// Largest coordinate that fits the reader's 4-digit area format
pub const MAX_COORDINATE: u32 = 9_999;
/// Config files tried, in order, when none is given explicitly
pub const DEFAULT_CONFIG_FILES: &[&str] = &["config.production.yaml", "config.yaml"];
