//! End-to-end pipeline: analyze → prompt → render → persist
//!
//! The renderer is an explicitly injected, optional capability. Without one
//! (or when it fails) the deterministic [`PatternRenderer`] stands in, unless
//! fallback is disabled.

use tracing::{info, warn};

use crate::core::aggregator::pick_single_best;
use crate::core::analyzer::EmotionAnalyzer;
use crate::core::dataset::DatasetWriter;
use crate::core::prompt::{synthesize_prompt, tag_prompt};
use crate::core::renderer::{Artifact, PatternRenderer, Renderer};
use crate::types::{DatasetRecord, Emotion, EmotionAnalysisResult, RenderError, Result};
use crate::{ARTIFACT_HEIGHT, ARTIFACT_WIDTH};

/// Rendering settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub width: u32,
    pub height: u32,
    /// Use the pattern renderer when no renderer is wired in or it fails
    pub allow_fallback: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: ARTIFACT_WIDTH,
            height: ARTIFACT_HEIGHT,
            allow_fallback: true,
        }
    }
}

/// Analysis plus everything needed to render and label one sample
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub analysis: EmotionAnalysisResult,
    /// Dataset label: the override, or the single best label
    pub label: Emotion,
    /// Synthesized prompt
    pub prompt: String,
    /// `prompt` prefixed with `[emotion:<label>]`
    pub tagged_prompt: String,
}

pub struct DatasetPipeline {
    analyzer: EmotionAnalyzer,
    writer: DatasetWriter,
    config: PipelineConfig,
    renderer: Option<Box<dyn Renderer>>,
    fallback: PatternRenderer,
}

impl DatasetPipeline {
    pub fn new(analyzer: EmotionAnalyzer, writer: DatasetWriter, config: PipelineConfig) -> Self {
        Self {
            analyzer,
            writer,
            config,
            renderer: None,
            fallback: PatternRenderer::new(),
        }
    }

    /// Wire in a real renderer
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn analyzer(&self) -> &EmotionAnalyzer {
        &self.analyzer
    }

    pub fn writer(&self) -> &DatasetWriter {
        &self.writer
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze `text` and build its prompt. `label` overrides the automatic
    /// (single best) dataset label.
    pub fn draft(&self, text: &str, label: Option<Emotion>) -> Result<Draft> {
        let analysis = self.analyzer.analyze(text)?;
        let label = label.unwrap_or_else(|| pick_single_best(analysis.distribution()));
        let prompt = synthesize_prompt(text, &analysis);
        let tagged_prompt = tag_prompt(label, &prompt);
        Ok(Draft {
            analysis,
            label,
            prompt,
            tagged_prompt,
        })
    }

    /// Render through the injected renderer, falling back when allowed
    pub fn render(&self, prompt: &str, seed: u64) -> std::result::Result<Artifact, RenderError> {
        let PipelineConfig { width, height, allow_fallback } = self.config;

        let primary_err = match &self.renderer {
            Some(renderer) => match renderer.render(prompt, seed, width, height) {
                Ok(artifact) => return Ok(artifact),
                Err(e) => Some(e),
            },
            None => None,
        };

        if !allow_fallback {
            return Err(primary_err.unwrap_or(RenderError::NoRenderer));
        }
        if let Some(e) = &primary_err {
            warn!(code = e.code(), error = %e, "renderer failed, using pattern fallback");
        }
        self.fallback.render(prompt, seed, width, height)
    }

    /// Draft, render and persist one sample
    pub fn save(&self, text: &str, seed: u64, label: Option<Emotion>) -> Result<DatasetRecord> {
        let draft = self.draft(text, label)?;
        self.save_draft(&draft, seed)
    }

    /// Render and persist an existing draft without analyzing again
    pub fn save_draft(&self, draft: &Draft, seed: u64) -> Result<DatasetRecord> {
        let artifact = self.render(&draft.tagged_prompt, seed)?;
        let record = self.writer.persist(
            draft.label,
            draft.analysis.text(),
            &draft.tagged_prompt,
            seed,
            &artifact,
        )?;
        Ok(record)
    }

    /// Save `per_phrase` samples for every non-blank phrase.
    /// Seeds run `base_seed`, `base_seed + 1`, ... across the whole batch.
    pub fn generate_batch<I, S>(&self, phrases: I, base_seed: u64, per_phrase: usize) -> Result<Vec<DatasetRecord>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        let mut seed = base_seed;

        for phrase in phrases {
            let phrase = phrase.as_ref().trim();
            if phrase.is_empty() {
                continue;
            }
            let draft = self.draft(phrase, None)?;
            for _ in 0..per_phrase {
                records.push(self.save_draft(&draft, seed)?);
                seed = seed.wrapping_add(1);
            }
        }

        info!(samples = records.len(), dir = %self.writer.dir().display(), "batch complete");
        Ok(records)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Error;

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _: &str, _: u64, _: u32, _: u32) -> std::result::Result<Artifact, RenderError> {
            Err(RenderError::Failed("gpu on fire".to_string()))
        }
    }

    struct SolidRenderer;

    impl Renderer for SolidRenderer {
        fn render(&self, _: &str, _: u64, width: u32, height: u32) -> std::result::Result<Artifact, RenderError> {
            Artifact::from_rgb(width, height, vec![200; (width * height * 3) as usize])
                .ok_or_else(|| RenderError::Failed("size".to_string()))
        }
    }

    fn pipeline(dir: &std::path::Path, config: PipelineConfig) -> DatasetPipeline {
        DatasetPipeline::new(EmotionAnalyzer::builtin(), DatasetWriter::new(dir), config)
    }

    fn small(allow_fallback: bool) -> PipelineConfig {
        PipelineConfig { width: 16, height: 8, allow_fallback }
    }

    #[test]
    fn test_draft_auto_label_and_override() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), small(true));

        let draft = p.draft("Je suis furieux", None).unwrap();
        assert_eq!(draft.label, Emotion::Anger);
        assert!(draft.tagged_prompt.starts_with("[emotion:anger] Je suis furieux. "));

        let draft = p.draft("Je suis furieux", Some(Emotion::Calm)).unwrap();
        assert_eq!(draft.label, Emotion::Calm);
        assert!(draft.prompt.contains("spectrogram of anger"));
    }

    #[test]
    fn test_save_draft_matches_save() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), small(true));
        let draft = p.draft("Je suis furieux", Some(Emotion::Mystery)).unwrap();
        let record = p.save_draft(&draft, 4).unwrap();

        assert_eq!(record.emotion, Emotion::Mystery);
        assert_eq!(record.phrase, "Je suis furieux");
        assert_eq!(record.prompt, draft.tagged_prompt);
        assert_eq!(record.seed, 4);

        let again = p.save("Je suis furieux", 4, Some(Emotion::Mystery)).unwrap();
        assert_eq!(again.prompt, record.prompt);
        assert_eq!(again.n, 2);
    }

    #[test]
    fn test_blank_text_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), small(true));
        assert!(matches!(p.save("   ", 0, None), Err(Error::Validation(_))));
        assert!(!p.writer().index_path().exists());
    }

    #[test]
    fn test_fallback_without_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), small(true));
        let a = p.render("x", 3).unwrap();
        let b = PatternRenderer::new().render("x", 3, 16, 8).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_renderer_no_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), small(false));
        assert!(matches!(p.render("x", 3), Err(RenderError::NoRenderer)));
    }

    #[test]
    fn test_failing_renderer_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), small(true)).with_renderer(Box::new(FailingRenderer));
        assert!(p.render("x", 3).is_ok());

        let p = pipeline(dir.path(), small(false)).with_renderer(Box::new(FailingRenderer));
        assert!(matches!(p.render("x", 3), Err(RenderError::Failed(_))));
    }

    #[test]
    fn test_injected_renderer_wins() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), small(true)).with_renderer(Box::new(SolidRenderer));
        let a = p.render("x", 3).unwrap();
        assert!(a.as_raw().iter().all(|b| *b == 200));
    }

    #[test]
    fn test_batch_skips_blank_and_advances_seed() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), small(true));
        let records = p
            .generate_batch(["Je suis furieux", "", "  ", "la nuit est calme"], 100, 2)
            .unwrap();
        let seeds: Vec<u64> = records.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![100, 101, 102, 103]);
        assert_eq!(records[0].emotion, Emotion::Anger);
        assert_eq!(records[1].n, 2);
        assert_eq!(records[2].emotion, Emotion::Calm);
        assert_eq!(p.writer().read_index().unwrap().len(), 4);
    }
}
