//! Dashboard pages, one module per route.

mod genomics;
mod prediction;
mod sample_info;
mod transcriptomics;

pub use genomics::GenomicsPage;
pub use prediction::PredictionPage;
pub use sample_info::SampleInfoPage;
pub use transcriptomics::TranscriptomicsPage;
