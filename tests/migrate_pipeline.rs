//! Integration tests for the Migration phase: threshold gating and the
//! shapes produced for each historical document version.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use project_codec::migrate::{self, MIGRATIONS};
use project_codec::parse::RawDocument;
use project_codec::{ProjectError, SynthesisError, VersionTriple, decode_project};
use serde_json::json;

fn migrated(json: &str, synth: &mut FixedTimings) -> serde_json::Value {
    let doc = RawDocument::from_text(json).expect("Should decode");
    let version: VersionTriple = doc.app_version().unwrap().parse().unwrap();
    migrate::migrate(doc, version, synth)
        .expect("Should migrate")
        .into_value()
}

#[test]
fn v0_3_0_runs_both_steps() {
    let mut synth = FixedTimings::default();
    let value = migrated(include_str!("fixtures/project_v0_3_0.json"), &mut synth);

    let item = &value["audioItems"]["a1"];
    assert_eq!(item["characterIndex"], json!(1));
    assert!(item.get("charactorIndex").is_none());
    assert_eq!(item["query"]["volumeScale"], json!(1));
    assert_eq!(item["query"]["outputStereo"], json!(false));

    // b2 has no query, so only a1 needed timings.
    assert_eq!(synth.speakers, vec![1]);
    insta::assert_json_snapshot!("migrated_v0_3_0", value);
}

#[test]
fn v0_4_5_recomputes_timings_only() {
    let mut synth = FixedTimings::default();
    let value = migrated(include_str!("fixtures/project_v0_4_5.json"), &mut synth);

    let query = &value["audioItems"]["k1"]["query"];
    // Step A did not run: 0.4-era values are kept.
    assert_eq!(query["volumeScale"], json!(1.0));
    assert_eq!(query["kana"], json!("サ'クラ"));

    let moras = query["accentPhrases"][0]["moras"].as_array().unwrap();
    for mora in moras {
        assert_eq!(mora["vowelLength"], json!(VOWEL_LENGTH));
        assert_eq!(mora["consonantLength"], json!(CONSONANT_LENGTH));
    }
    assert!(query["accentPhrases"][0].get("pauseMora").is_none());
    assert_eq!(synth.speakers, vec![2]);
}

#[test]
fn v0_5_0_is_left_alone() {
    let json = include_str!("fixtures/project_v0_5_0.json");
    let mut synth = FixedTimings::default();
    let value = migrated(json, &mut synth);

    let original: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(value, original);
    assert!(synth.speakers.is_empty());
}

#[test]
fn synthesis_failure_aborts_the_load() {
    let mut engine = OfflineEngine::default();
    let err = decode_project(
        include_str!("fixtures/project_v0_4_5.json").as_bytes(),
        "0.6.0",
        &mut engine,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ProjectError::Synthesis {
            ref key,
            source: SynthesisError::Engine(_),
        } if key == "k1"
    ));
    assert!(!err.is_invalid_format());
    assert_eq!(engine.calls, 1);
}

#[test]
fn closure_synthesizer_is_accepted() {
    let mut calls = 0;
    let mut synth = |phrases: &[project_codec::AccentPhrase],
                     _speaker: i32|
     -> Result<Vec<project_codec::AccentPhrase>, SynthesisError> {
        calls += 1;
        Ok(phrases.to_vec())
    };
    let project = decode_project(
        include_str!("fixtures/project_v0_4_5.json").as_bytes(),
        "0.5.0",
        &mut synth,
    )
    .expect("Should load");
    assert_eq!(calls, 1);

    // The echo returns the zeroed placeholders.
    let mora = &project.audio_items["k1"].query.as_ref().unwrap().accent_phrases[0].moras[1];
    assert_eq!(mora.vowel_length, 0.0);
    assert_eq!(mora.consonant_length, Some(0.0));
}

#[test]
fn migration_ids_are_unique() {
    let mut ids: Vec<_> = MIGRATIONS.iter().map(|m| m.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), MIGRATIONS.len());
}
