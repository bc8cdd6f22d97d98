//! Configuration management for wpreadme
//!
//! wpreadme reads a single optional user configuration file. It carries
//! defaults that would otherwise be passed on every invocation: the code
//! language used for `<code>` highlighting classes, extra segment-name
//! translations, cache lifetimes and a GitHub token.
//!
//! # Modules
//!
//! - `global` - Loading, saving and locating `config.toml`
//!
//! # Precedence
//!
//! Command-line flags override the configuration file, which overrides the
//! built-in defaults. Translations are the exception: they are merged, never
//! replaced, unless a reset sentinel (`none`) is passed with `--translate`.

pub mod global;

pub use global::{CacheConfig, GlobalConfig};
