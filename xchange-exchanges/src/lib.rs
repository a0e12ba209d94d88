//! xchange exchange adapters
//!
//! Binance, Gdax and Kucoin implementations of [`xchange_core::Exchange`]. Each adapter owns
//! its endpoint catalog, its signing strategy and the parsers that normalize its payloads.
//!
//! # Example
//!
//! ```rust,no_run
//! use xchange_exchanges::prelude::*;
//!
//! # async fn example() -> xchange_core::Result<()> {
//! let binance = Binance::new(ExchangeConfig::default())?;
//! let markets = binance.load_markets(false).await?;
//! println!("Found {} markets", markets.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::if_not_else)]
#![allow(clippy::if_same_then_else)]
#![allow(clippy::derivable_impls)]
#![allow(clippy::from_over_into)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::unnecessary_map_or)]
#![allow(clippy::clone_on_copy)]
#![allow(clippy::explicit_iter_loop)]
#![allow(clippy::ref_option)]
#![allow(clippy::ignored_unit_patterns)]
#![allow(clippy::manual_midpoint)]
#![allow(clippy::manual_pattern_char_comparison)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::format_push_string)]
#![allow(clippy::redundant_closure)]
#![allow(clippy::unused_self)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::unnested_or_patterns)]
#![allow(clippy::redundant_field_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::empty_line_after_doc_comments)]
#![allow(clippy::needless_continue)]
#![allow(clippy::redundant_else)]
#![allow(clippy::unnecessary_literal_bound)]
#![allow(clippy::let_and_return)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::get_first)]
#![allow(clippy::unnecessary_literal_unwrap)]
#![allow(clippy::map_flatten)]
#![allow(clippy::manual_map)]
#![allow(clippy::unnecessary_cast)]
#![allow(clippy::manual_strip)]
#![allow(clippy::unnecessary_lazy_evaluations)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::implicit_clone)]
#![allow(clippy::semicolon_if_nothing_returned)]
#![allow(clippy::single_match_else)]
#![allow(clippy::assigning_clones)]
#![allow(clippy::collapsible_match)]
#![allow(clippy::option_as_ref_deref)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::unused_async)]

// Re-export xchange-core
pub use xchange_core;

/// Binance exchange implementation
pub mod binance;

/// Gdax exchange implementation
pub mod gdax;

/// Kucoin exchange implementation
pub mod kucoin;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::binance::Binance;
    pub use crate::gdax::Gdax;
    pub use crate::kucoin::Kucoin;
    pub use xchange_core::prelude::*;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
