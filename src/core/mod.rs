//! Core modules for emoset

pub mod normalizer;
pub mod lexicon;
pub mod scorer;
pub mod aggregator;
pub mod affect;
pub mod analyzer;
pub mod prompt;
pub mod renderer;
pub mod dataset;
pub mod pipeline;

pub use normalizer::normalize;
pub use lexicon::{Lexicon, load_lexicon, load_lexicon_or_default};
pub use scorer::score;
pub use aggregator::{aggregate, select_top_labels, pick_single_best};
pub use affect::{anchor, to_affect};
pub use analyzer::{EmotionAnalyzer, AnalyzerConfig};
pub use prompt::{synthesize_prompt, tag_prompt, prompt_digest};
pub use renderer::{Artifact, Renderer, PatternRenderer};
pub use dataset::{DatasetWriter, next_index, read_index, sample_stem};
pub use pipeline::{DatasetPipeline, PipelineConfig, Draft};
