//! Constants shared across the crate.

/// Number of bytes of the SHA-256 output kept in a digest (128 bits).
///
/// Digests are hex encoded, so they are twice this many characters long.
pub const DIGEST_BYTES: usize = 16;

/// Format used when none is configured.
pub const DEFAULT_FORMAT: &str = "html";

/// Template root used when none is configured.
pub const DEFAULT_ROOT: &str = "app/views";

/// Handler extension tried after the format when none are configured.
pub const DEFAULT_HANDLER: &str = "erb";

/// Project-local configuration file name.
pub const CONFIG_FILE_NAME: &str = "tdigest.toml";

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "TDIGEST_CONFIG";
