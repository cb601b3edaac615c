//! Form binding and field-level validation, driven by the entity schema.

pub mod submission;
pub mod widgets;

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::{EntityKind, FieldKind, FieldSpec, ATTACHMENT_MAX_LENGTH};
use crate::record::{Record, Value};

pub use submission::{Submission, SubmissionError, UploadedFile};

/// Error bucket for problems not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Accepted date input formats, tried in order, with the number of digits
/// the year part must have. chrono's `%Y` alone also takes short and signed
/// years.
const DATE_INPUT_FORMATS: [(&str, usize); 3] =
    [("%Y-%m-%d", 4), ("%m/%d/%Y", 4), ("%m/%d/%y", 2)];

const REQUIRED: &str = "This field is required.";
const NULL_CHARACTERS: &str = "Null characters are not allowed.";
const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

/// One selectable related record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: i32,
    pub label: String,
}

/// Available choices per relation field name.
pub type ChoiceSets = HashMap<&'static str, Vec<Choice>>;

/// Per-field error messages, serialized as `{field: [messages], "__all__": [...]}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Names of fields with at least one error.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn non_field_errors(&self) -> &[String] {
        self.for_field(NON_FIELD_ERRORS)
    }
}

/// Limits applied while cleaning.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_upload_bytes: usize,
}

/// A validated submission: the record to persist plus files still to store.
#[derive(Debug)]
pub struct Cleaned {
    pub record: Record,
    pub uploads: Vec<(&'static FieldSpec, UploadedFile)>,
}

enum Outcome {
    Value(Value),
    Upload(UploadedFile),
}

/// Bind a submission to the schema of `kind`.
///
/// Every field is checked; all problems are reported together.
pub fn clean(
    kind: EntityKind,
    submission: &Submission,
    choices: &ChoiceSets,
    limits: Limits,
) -> Result<Cleaned, FormErrors> {
    let mut record = Record::new(kind);
    let mut uploads = Vec::new();
    let mut errors = FormErrors::new();

    for field in kind.fields() {
        let available = choices.get(field.name).map(Vec::as_slice).unwrap_or_default();
        match clean_field(field, submission, available, limits) {
            Ok(Outcome::Value(value)) => record.set(field.name, value),
            Ok(Outcome::Upload(file)) => {
                record.set(field.name, Value::Null);
                uploads.push((field, file));
            }
            Err(message) => errors.add(field.name, message),
        }
    }

    if errors.is_empty() {
        Ok(Cleaned { record, uploads })
    } else {
        Err(errors)
    }
}

/// Message for an id that is already taken.
pub fn duplicate_message(kind: EntityKind) -> String {
    format!(
        "{} with this {} already exists.",
        kind.verbose_name(),
        kind.primary_key().label()
    )
}

fn clean_field(
    field: &FieldSpec,
    submission: &Submission,
    choices: &[Choice],
    limits: Limits,
) -> Result<Outcome, String> {
    let raw = submission.first(field.name).unwrap_or_default().trim();

    let value = match field.kind {
        FieldKind::Integer => match raw {
            "" => empty(field)?,
            raw => Value::Int(parse_integer(raw)?),
        },
        FieldKind::Text { max_length } => {
            let length = raw.chars().count();
            if raw.is_empty() && field.required {
                return Err(REQUIRED.to_string());
            }
            if length > max_length {
                return Err(format!(
                    "Ensure this value has at most {max_length} characters (it has {length})."
                ));
            }
            if raw.contains('\0') {
                return Err(NULL_CHARACTERS.to_string());
            }
            Value::Text(raw.to_string())
        }
        FieldKind::Date => match raw {
            "" => empty(field)?,
            raw => Value::Date(parse_date(raw).ok_or_else(|| "Enter a valid date.".to_string())?),
        },
        FieldKind::Boolean => {
            let checked = !matches!(
                raw.to_ascii_lowercase().as_str(),
                "" | "false" | "0" | "off"
            );
            if field.required && !checked {
                return Err(REQUIRED.to_string());
            }
            Value::Bool(checked)
        }
        FieldKind::Image | FieldKind::File => {
            return match submission.file(field.name) {
                Some(file) => {
                    check_upload(field, file, limits)?;
                    Ok(Outcome::Upload(file.clone()))
                }
                None if field.required => Err(REQUIRED.to_string()),
                None => Ok(Outcome::Value(Value::Null)),
            };
        }
        FieldKind::ForeignKey(_) => match raw {
            "" => empty(field)?,
            raw => {
                let id = raw
                    .parse::<i32>()
                    .ok()
                    .filter(|id| choices.iter().any(|choice| choice.id == *id))
                    .ok_or_else(|| INVALID_CHOICE.to_string())?;
                Value::Ref(id)
            }
        },
        FieldKind::ManyToMany(_) => {
            let mut ids = Vec::new();
            for raw in submission.all(field.name) {
                let raw = raw.trim();
                if raw.is_empty() {
                    continue;
                }
                let id = raw
                    .parse::<i32>()
                    .map_err(|_| format!("“{raw}” is not a valid value."))?;
                if !choices.iter().any(|choice| choice.id == id) {
                    return Err(format!(
                        "Select a valid choice. {id} is not one of the available choices."
                    ));
                }
                ids.push(id);
            }
            if ids.is_empty() && field.required {
                return Err(REQUIRED.to_string());
            }
            ids.sort_unstable();
            ids.dedup();
            Value::Refs(ids)
        }
    };

    Ok(Outcome::Value(value))
}

fn empty(field: &FieldSpec) -> Result<Value, String> {
    if field.required {
        Err(REQUIRED.to_string())
    } else {
        Ok(Value::Null)
    }
}

fn parse_integer(raw: &str) -> Result<i32, String> {
    // "7.0" and "7." are whole numbers too.
    let digits = match raw.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
        _ => raw,
    };
    let value = digits
        .parse::<i64>()
        .map_err(|_| "Enter a whole number.".to_string())?;

    if value > i64::from(i32::MAX) {
        return Err(format!(
            "Ensure this value is less than or equal to {}.",
            i32::MAX
        ));
    }
    if value < i64::from(i32::MIN) {
        return Err(format!(
            "Ensure this value is greater than or equal to {}.",
            i32::MIN
        ));
    }
    Ok(value as i32)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_INPUT_FORMATS
        .iter()
        .filter(|(format, digits)| {
            let year = year_part(raw, format);
            year.len() == *digits && year.bytes().all(|b| b.is_ascii_digit())
        })
        .find_map(|(format, _)| NaiveDate::parse_from_str(raw, format).ok())
}

fn year_part<'a>(raw: &'a str, format: &str) -> &'a str {
    let part = if format.starts_with("%Y") {
        raw.split('-').next()
    } else {
        raw.rsplit('/').next()
    };
    part.unwrap_or_default()
}

fn check_upload(field: &FieldSpec, file: &UploadedFile, limits: Limits) -> Result<(), String> {
    let name_length = file.file_name.chars().count();
    if name_length > ATTACHMENT_MAX_LENGTH {
        return Err(format!(
            "Ensure this filename has at most {ATTACHMENT_MAX_LENGTH} characters (it has {name_length})."
        ));
    }
    if file.bytes.is_empty() {
        return Err("The submitted file is empty.".to_string());
    }
    if file.bytes.len() > limits.max_upload_bytes {
        return Err(format!(
            "Ensure this file is at most {} bytes (it has {}).",
            limits.max_upload_bytes,
            file.bytes.len()
        ));
    }
    if field.kind == FieldKind::Image && !looks_like_image(&file.bytes) {
        return Err(INVALID_IMAGE.to_string());
    }
    Ok(())
}

fn looks_like_image(bytes: &[u8]) -> bool {
    const SIGNATURES: [&[u8]; 6] = [
        b"\x89PNG\r\n\x1a\n",
        b"\xff\xd8\xff",
        b"GIF87a",
        b"GIF89a",
        b"BM",
        b"II*\x00",
    ];
    let is_webp = bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP";
    is_webp || SIGNATURES.iter().any(|signature| bytes.starts_with(signature))
}
