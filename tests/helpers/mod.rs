use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use project_codec::{
    AccentPhrase, AudioItem, AudioRegistry, ProjectError, ProjectHost, SynthesisError,
    TimingSynthesizer,
};

// =============================================================================
// Registry
// =============================================================================

/// Ordered in-memory registry that hands out `item-N` keys.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    pub keys: Vec<String>,
    pub items: BTreeMap<String, AudioItem>,
    pub clears: usize,
    next_id: usize,
}

impl MemoryRegistry {
    pub fn with_texts(texts: &[&str]) -> Self {
        let mut registry = MemoryRegistry::default();
        let mut previous: Option<String> = None;
        for (i, text) in texts.iter().enumerate() {
            let item = AudioItem::new(*text, Some(i as i32));
            previous = Some(registry.register_item(item, previous.as_deref()));
        }
        registry
    }

    pub fn texts(&self) -> Vec<&str> {
        self.keys
            .iter()
            .map(|k| self.items[k].text.as_str())
            .collect()
    }
}

impl AudioRegistry for MemoryRegistry {
    fn audio_keys(&self) -> Vec<String> {
        self.keys.clone()
    }

    fn audio_items(&self) -> BTreeMap<String, AudioItem> {
        self.items.clone()
    }

    fn clear_all_items(&mut self) {
        self.keys.clear();
        self.items.clear();
        self.clears += 1;
    }

    fn register_item(&mut self, item: AudioItem, after: Option<&str>) -> String {
        self.next_id += 1;
        let key = format!("item-{}", self.next_id);
        let index = after
            .and_then(|anchor| self.keys.iter().position(|k| k == anchor))
            .map_or(0, |i| i + 1);
        self.keys.insert(index, key.clone());
        self.items.insert(key.clone(), item);
        key
    }
}

// =============================================================================
// Host
// =============================================================================

/// Host double with an in-memory file system and scripted dialog answers.
#[derive(Debug)]
pub struct ScriptedHost {
    pub version: String,
    pub files: HashMap<PathBuf, Vec<u8>>,
    pub load_path: Option<PathBuf>,
    pub save_path: Option<PathBuf>,
    pub confirm_answer: bool,
    pub confirms: Vec<String>,
    pub errors: Vec<String>,
    pub save_prompts: usize,
}

impl ScriptedHost {
    pub fn new(version: &str) -> Self {
        ScriptedHost {
            version: version.into(),
            files: HashMap::new(),
            load_path: None,
            save_path: None,
            confirm_answer: true,
            confirms: vec![],
            errors: vec![],
            save_prompts: 0,
        }
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(PathBuf::from(path), contents.as_bytes().to_vec());
        self
    }
}

impl ProjectHost for ScriptedHost {
    fn select_load_path(&mut self) -> Option<PathBuf> {
        self.load_path.clone()
    }

    fn select_save_path(&mut self) -> Option<PathBuf> {
        self.save_prompts += 1;
        self.save_path.clone()
    }

    fn confirm(&mut self, _title: &str, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answer
    }

    fn read_bytes(&mut self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn report_error(&mut self, _title: &str, message: &str) {
        self.errors.push(message.to_string());
    }

    fn app_version(&self) -> String {
        self.version.clone()
    }
}

// =============================================================================
// Synthesizers
// =============================================================================

pub const VOWEL_LENGTH: f32 = 0.25;
pub const CONSONANT_LENGTH: f32 = 0.125;
pub const PAUSE_LENGTH: f32 = 0.5;

/// Answers every request with fixed lengths and records the speakers asked.
#[derive(Debug, Default)]
pub struct FixedTimings {
    pub speakers: Vec<i32>,
}

impl TimingSynthesizer for FixedTimings {
    fn synthesize_timings(
        &mut self,
        accent_phrases: &[AccentPhrase],
        speaker: i32,
    ) -> Result<Vec<AccentPhrase>, SynthesisError> {
        self.speakers.push(speaker);
        Ok(accent_phrases
            .iter()
            .cloned()
            .map(|mut phrase| {
                for mora in &mut phrase.moras {
                    mora.vowel_length = VOWEL_LENGTH;
                    if mora.has_consonant() {
                        mora.consonant_length = Some(CONSONANT_LENGTH);
                    }
                }
                if let Some(pause) = &mut phrase.pause_mora {
                    pause.vowel_length = PAUSE_LENGTH;
                }
                phrase
            })
            .collect())
    }
}

/// Fails every request.
#[derive(Debug, Default)]
pub struct OfflineEngine {
    pub calls: usize,
}

impl TimingSynthesizer for OfflineEngine {
    fn synthesize_timings(
        &mut self,
        _accent_phrases: &[AccentPhrase],
        _speaker: i32,
    ) -> Result<Vec<AccentPhrase>, SynthesisError> {
        self.calls += 1;
        Err(SynthesisError::Engine("engine offline".into()))
    }
}

// =============================================================================
// Assertions
// =============================================================================

pub fn assert_has_code(err: &ProjectError, code: &str) {
    assert!(
        err.diagnostics().iter().any(|d| d.code == code),
        "Expected diagnostic {}, got: {:?}",
        code,
        err
    );
}
