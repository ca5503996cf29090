//! Output rendering for reports.
//!
//! # Example
//!
//! ```no_run
//! use fcisim::render::{to_json, to_text, JsonFormat};
//!
//! let report = fcisim::simulate_file("FCI Abril 2025.xlsx")?;
//!
//! println!("{}", to_text(&report));
//! println!("{}", to_json(&report, JsonFormat::Pretty)?);
//! # Ok::<(), fcisim::Error>(())
//! ```

mod json;
mod text;

pub use json::{to_json, to_json_default, JsonFormat};
pub use text::{lots_to_text, to_text};
