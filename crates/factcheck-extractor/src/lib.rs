//! factcheck Extractor
//!
//! Turns raw document text into a sequence of verifiable claims using an LLM.
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → LLM → ClaimsPayload normalizer → Vec<Claim>
//! ```
//!
//! # Accepted response shapes
//!
//! - A bare JSON array of claim objects
//! - An object wrapping the array under `claims` or `data`
//! - A single claim object
//!
//! Anything else is a parse error.
//!
//! # Example Usage
//!
//! ```no_run
//! use factcheck_extractor::{ClaimExtractor, ExtractorConfig};
//! use factcheck_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"[{"claim": "Water boils at 100C", "category": "Science"}]"#);
//! let extractor = ClaimExtractor::new(llm, ExtractorConfig::default());
//!
//! let claims = extractor.extract("Water boils at 100C at sea level.").await?;
//! println!("Extracted {} claims", claims.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::ClaimExtractor;
pub use parser::{parse_claims, ClaimsPayload};
pub use prompt::PromptBuilder;
