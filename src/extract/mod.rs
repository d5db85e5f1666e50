//! Product extraction engine: selector profiles, price heuristics, currency
//! normalization and brand resolution.

pub mod brand;
pub mod currency;
pub mod document;
pub mod error;
pub mod extractor;
pub mod models;
pub mod patterns;
pub mod price;
pub mod profiles;
pub mod resolve;

pub use currency::CurrencyTable;
pub use error::ExtractError;
pub use extractor::Extractor;
pub use models::{Field, PriceCandidate, ProductRecord, SourceTag};
pub use profiles::{ProfileRegistry, SelectorProfile};
