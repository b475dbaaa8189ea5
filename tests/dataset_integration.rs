//! Integration tests for dataset persistence
//!
//! Sequence numbering, restart recovery, index/sidecar consistency and the
//! full text → sample pipeline.

use std::fs;

use emoset::core::{
    next_index, prompt_digest, read_index, DatasetPipeline, DatasetWriter, EmotionAnalyzer,
    PatternRenderer, PipelineConfig, Renderer,
};
use emoset::types::{Emotion, SidecarMeta};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn small_config() -> PipelineConfig {
    PipelineConfig {
        width: 24,
        height: 12,
        allow_fallback: true,
    }
}

fn save_joy(writer: &DatasetWriter, phrase: &str, seed: u64) -> emoset::types::DatasetRecord {
    let artifact = PatternRenderer::new().render(phrase, seed, 24, 12).unwrap();
    writer
        .persist(Emotion::Joy, phrase, "[emotion:joy] prompt", seed, &artifact)
        .unwrap()
}

/// Three joy samples into an empty directory
#[test]
fn test_sequential_joy_samples() {
    let dir = TempDir::new().unwrap();
    let writer = DatasetWriter::new(dir.path());

    let records: Vec<_> = (0..3).map(|i| save_joy(&writer, "soleil", i)).collect();

    let files: Vec<_> = records.iter().map(|r| r.artifact_file.as_str()).collect();
    assert_eq!(files, vec!["joy_00001.png", "joy_00002.png", "joy_00003.png"]);
    for name in ["joy_00001.txt", "joy_00002.txt", "joy_00003.txt"] {
        assert!(dir.path().join(name).is_file(), "missing {}", name);
    }

    let rows = read_index(dir.path()).unwrap();
    let ns: Vec<_> = rows.iter().map(|r| r.n).collect();
    assert_eq!(ns, vec![1, 2, 3]);
    assert_eq!(next_index(dir.path(), Emotion::Joy).unwrap(), 4);
    assert_eq!(next_index(dir.path(), Emotion::Sadness).unwrap(), 1);
}

/// A fresh writer on an existing directory continues numbering
#[test]
fn test_resume_after_restart() {
    let dir = TempDir::new().unwrap();
    {
        let writer = DatasetWriter::new(dir.path());
        save_joy(&writer, "first run", 1);
        save_joy(&writer, "first run", 2);
    }

    let writer = DatasetWriter::new(dir.path());
    let record = save_joy(&writer, "second run", 3);
    assert_eq!(record.n, 3);
    assert_eq!(record.artifact_file, "joy_00003.png");

    let rows = writer.read_index().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].phrase, "second run");
}

/// Index rows and sidecars describe the same sample
#[test]
fn test_index_and_sidecar_agree() {
    let dir = TempDir::new().unwrap();
    let writer = DatasetWriter::new(dir.path());
    let phrase = "soleil, \"plage\"\net sourire";
    let record = save_joy(&writer, phrase, 99);

    let rows = read_index(dir.path()).unwrap();
    assert_eq!(rows, vec![record.index_row()]);

    let raw = fs::read_to_string(dir.path().join(&record.sidecar_file)).unwrap();
    let meta: SidecarMeta = serde_json::from_str(&raw).unwrap();
    assert_eq!(meta.emotion, Emotion::Joy);
    assert_eq!(meta.n, record.n);
    assert_eq!(meta.seed, 99);
    assert_eq!(meta.phrase, phrase);
    assert_eq!(meta.timestamp, record.timestamp);
    assert_eq!(meta.prompt_sha256, prompt_digest(&meta.prompt));
    assert_eq!((meta.spec.width, meta.spec.height), (24, 12));
}

/// Unrelated files do not disturb numbering
#[test]
fn test_foreign_files_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.md"), "x").unwrap();
    fs::write(dir.path().join("joy_final.png"), "x").unwrap();
    fs::write(dir.path().join("joy_00010.txt"), "x").unwrap();
    fs::write(dir.path().join("JOY_00004.PNG"), "x").unwrap();

    assert_eq!(next_index(dir.path(), Emotion::Joy).unwrap(), 5);
    let writer = DatasetWriter::new(dir.path());
    assert_eq!(save_joy(&writer, "soleil", 0).n, 5);
}

/// Text in, three files and an index row out
#[test]
fn test_pipeline_save_flow() {
    let dir = TempDir::new().unwrap();
    let pipeline = DatasetPipeline::new(
        EmotionAnalyzer::builtin(),
        DatasetWriter::new(dir.path().join("nested").join("out")),
        small_config(),
    );

    let record = pipeline
        .save("Soleil, plage et sourire, je suis content", 7, None)
        .unwrap();
    assert_eq!(record.emotion, Emotion::Joy);
    assert_eq!(record.artifact_file, "joy_00001.png");
    assert!(record.prompt.starts_with("[emotion:joy] Soleil, plage et sourire"));

    let out = dir.path().join("nested").join("out");
    let png = fs::read(out.join("joy_00001.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let record = pipeline.save("xyz123 qwerty", 8, Some(Emotion::Mystery)).unwrap();
    assert_eq!(record.artifact_file, "mystery_00001.png");

    let counts = pipeline.writer().label_counts().unwrap();
    assert_eq!(counts.get(&Emotion::Joy), Some(&1));
    assert_eq!(counts.get(&Emotion::Mystery), Some(&1));
}

/// Batch generation over a phrase list
#[test]
fn test_batch_generation() {
    let dir = TempDir::new().unwrap();
    let pipeline = DatasetPipeline::new(
        EmotionAnalyzer::builtin(),
        DatasetWriter::new(dir.path()),
        small_config(),
    );

    let phrases = "Je suis furieux, quelle rage !\n\n   \nAmbiance zen et douceur\n";
    let records = pipeline.generate_batch(phrases.lines(), 10, 2).unwrap();

    let files: Vec<_> = records.iter().map(|r| r.artifact_file.as_str()).collect();
    assert_eq!(
        files,
        vec!["anger_00001.png", "anger_00002.png", "calm_00001.png", "calm_00002.png"]
    );
    let seeds: Vec<_> = records.iter().map(|r| r.seed).collect();
    assert_eq!(seeds, vec![10, 11, 12, 13]);
    assert_eq!(read_index(dir.path()).unwrap().len(), 4);
}
