// Clientforge - typed TypeScript client generation from DMMF documents

pub mod config;
pub mod dmmf;
pub mod error;
pub mod generation;
pub mod generator;
pub mod layout;
pub mod log;
pub mod ts;
pub mod validation;

pub use config::ClientforgeConfig;
pub use error::{ClientforgeError, Result};
pub use generation::files::ClientMetadata;
pub use generator::{
    BuildClientResult, GenerateClientOptions, GeneratedFile, GenerationReport, build_client,
    generate_client,
};

#[doc(hidden)]
pub use chrono as __chrono;
