//! Declarative description of the current project document shape.
//!
//! The grammar is a small subset of JSON Type Definition: primitive types,
//! homogeneous arrays (`Elements`), string-keyed maps (`Values`) and records
//! with required and optional properties.

use std::sync::LazyLock;

use Primitive::{Boolean, Float32, Int32, String as Str};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    /// A JSON number representable as a finite `f32`.
    Float32,
    /// A JSON integer within `i32` range.
    Int32,
    Boolean,
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::String => write!(f, "string"),
            Primitive::Float32 => write!(f, "float32"),
            Primitive::Int32 => write!(f, "int32"),
            Primitive::Boolean => write!(f, "boolean"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Type(Primitive),
    Elements(Box<Schema>),
    Values(Box<Schema>),
    Properties(Record),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub required: Vec<(&'static str, Schema)>,
    pub optional: Vec<(&'static str, Schema)>,
    /// Whether properties outside `required`/`optional` are accepted.
    pub additional: bool,
}

impl Record {
    pub fn new() -> Self {
        Record {
            required: Vec::new(),
            optional: Vec::new(),
            additional: true,
        }
    }

    pub fn required(mut self, name: &'static str, schema: Schema) -> Self {
        self.required.push((name, schema));
        self
    }

    pub fn optional(mut self, name: &'static str, schema: Schema) -> Self {
        self.optional.push((name, schema));
        self
    }

    pub fn closed(mut self) -> Self {
        self.additional = false;
        self
    }

    pub fn knows(&self, name: &str) -> bool {
        self.required
            .iter()
            .chain(&self.optional)
            .any(|(known, _)| *known == name)
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn elements(schema: Schema) -> Self {
        Schema::Elements(Box::new(schema))
    }

    pub fn values(schema: Schema) -> Self {
        Schema::Values(Box::new(schema))
    }
}

pub fn mora_schema() -> Schema {
    Schema::Properties(
        Record::new()
            .required("text", Schema::Type(Str))
            .required("vowel", Schema::Type(Str))
            .required("vowelLength", Schema::Type(Float32))
            .required("pitch", Schema::Type(Float32))
            .optional("consonant", Schema::Type(Str))
            .optional("consonantLength", Schema::Type(Float32)),
    )
}

pub fn accent_phrase_schema() -> Schema {
    Schema::Properties(
        Record::new()
            .required("moras", Schema::elements(mora_schema()))
            .required("accent", Schema::Type(Int32))
            .optional("pauseMora", mora_schema()),
    )
}

pub fn audio_query_schema() -> Schema {
    Schema::Properties(
        Record::new()
            .required("accentPhrases", Schema::elements(accent_phrase_schema()))
            .required("speedScale", Schema::Type(Float32))
            .required("pitchScale", Schema::Type(Float32))
            .required("intonationScale", Schema::Type(Float32))
            .required("volumeScale", Schema::Type(Float32))
            .required("prePhonemeLength", Schema::Type(Float32))
            .required("postPhonemeLength", Schema::Type(Float32))
            .required("outputSamplingRate", Schema::Type(Int32))
            .required("outputStereo", Schema::Type(Boolean))
            .optional("kana", Schema::Type(Str)),
    )
}

pub fn audio_item_schema() -> Schema {
    Schema::Properties(
        Record::new()
            .required("text", Schema::Type(Str))
            .optional("speaker", Schema::Type(Int32))
            .optional("query", audio_query_schema()),
    )
}

pub fn project_schema() -> Schema {
    Schema::Properties(
        Record::new()
            .required("appVersion", Schema::Type(Str))
            .required("audioKeys", Schema::elements(Schema::Type(Str)))
            .required("audioItems", Schema::values(audio_item_schema())),
    )
}

/// The schema every loaded document must satisfy after migration.
pub static PROJECT_SCHEMA: LazyLock<Schema> = LazyLock::new(project_schema);
