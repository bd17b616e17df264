//! High-level API module.
//!
//! # Example
//!
//! ```ignore
//! use sleepchef_core::api::Scanner;
//! use sleepchef_core::catalog::Catalog;
//!
//! let catalog = Catalog::load_many(["foods.json", "cooks.json"])?;
//! let scanner = Scanner::new(&catalog);
//! let outcome = scanner.scan("req-1", &annotations, 1170, 2532)?;
//! let reply = scanner.reply(&outcome, "サラダ");
//! ```

pub mod scanner;

pub use scanner::{ScanOutcome, Scanner};
