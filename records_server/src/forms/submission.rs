//! Request body decoding into a flat name -> values map.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{header, HeaderMap};
use serde_json::Value as JsonValue;

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("The submitted data could not be read: {0}")]
    Malformed(String),
}

/// A file part received in a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Raw submitted values keyed by field name.
#[derive(Debug, Default, Clone)]
pub struct Submission {
    values: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    UrlEncoded,
    Multipart,
    Json,
}

impl BodyFormat {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, SubmissionError> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "application/x-www-form-urlencoded" | "" => Ok(BodyFormat::UrlEncoded),
            "multipart/form-data" => Ok(BodyFormat::Multipart),
            "application/json" => Ok(BodyFormat::Json),
            other if other.ends_with("+json") => Ok(BodyFormat::Json),
            other => Err(SubmissionError::UnsupportedContentType(other.to_string())),
        }
    }
}

impl Submission {
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    pub fn attach(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.files.insert(name.into(), file);
    }

    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
        self.files.remove(name);
    }

    /// First submitted value for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    /// Decode a request body according to its content type.
    pub async fn read(request: Request) -> Result<Self, SubmissionError> {
        match BodyFormat::from_headers(request.headers())? {
            BodyFormat::Multipart => {
                let multipart = Multipart::from_request(request, &())
                    .await
                    .map_err(|e| SubmissionError::Malformed(e.body_text()))?;
                Self::from_multipart(multipart).await
            }
            BodyFormat::UrlEncoded => Self::from_urlencoded(&body_bytes(request).await?),
            BodyFormat::Json => Self::from_json(&body_bytes(request).await?),
        }
    }

    pub fn from_urlencoded(body: &[u8]) -> Result<Self, SubmissionError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|e| SubmissionError::Malformed(e.to_string()))?;

        let mut submission = Self::default();
        for (name, value) in pairs {
            submission.push(name, value);
        }
        Ok(submission)
    }

    /// Accepts a single JSON object. Arrays become repeated values; nulls are omitted.
    pub fn from_json(body: &[u8]) -> Result<Self, SubmissionError> {
        let parsed: JsonValue =
            serde_json::from_slice(body).map_err(|e| SubmissionError::Malformed(e.to_string()))?;
        let JsonValue::Object(object) = parsed else {
            return Err(SubmissionError::Malformed(
                "expected a JSON object".to_string(),
            ));
        };

        let mut submission = Self::default();
        for (name, value) in object {
            match value {
                JsonValue::Array(items) => {
                    // An explicit empty list still counts as submitted.
                    submission.values.entry(name.clone()).or_default();
                    for item in items {
                        if let Some(text) = scalar(item) {
                            submission.push(name.clone(), text);
                        }
                    }
                }
                other => {
                    if let Some(text) = scalar(other) {
                        submission.push(name, text);
                    }
                }
            }
        }
        Ok(submission)
    }

    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, SubmissionError> {
        let mut submission = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| SubmissionError::Malformed(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| SubmissionError::Malformed(e.body_text()))?;
                    // Browsers send an empty part when no file was chosen.
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    submission.attach(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| SubmissionError::Malformed(e.body_text()))?;
                    submission.push(name, text);
                }
            }
        }

        Ok(submission)
    }
}

async fn body_bytes(request: Request) -> Result<Bytes, SubmissionError> {
    Bytes::from_request(request, &())
        .await
        .map_err(|e| SubmissionError::Malformed(e.body_text()))
}

fn scalar(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(text) => Some(text),
        JsonValue::Bool(flag) => Some(flag.to_string()),
        JsonValue::Number(number) => Some(number.to_string()),
        nested => Some(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn urlencoded_keeps_repeated_values() {
        let submission =
            Submission::from_urlencoded(b"first_name=Ana+Li&court_cases=1&court_cases=3").unwrap();
        assert_eq!(submission.first("first_name"), Some("Ana Li"));
        assert_eq!(submission.all("court_cases"), ["1", "3"]);
        assert!(submission.all("missing").is_empty());
    }

    #[test]
    fn json_object_is_flattened() {
        let body = br#"{"employee_id": 4, "first_name": "Ana", "court_cases": [2, 1], "passport_number": null}"#;
        let submission = Submission::from_json(body).unwrap();
        assert_eq!(submission.first("employee_id"), Some("4"));
        assert_eq!(submission.all("court_cases"), ["2", "1"]);
        assert_eq!(submission.first("passport_number"), None);
    }

    #[test]
    fn json_must_be_an_object() {
        assert!(matches!(
            Submission::from_json(b"[1, 2]"),
            Err(SubmissionError::Malformed(_))
        ));
        assert!(matches!(
            Submission::from_json(b"{not json"),
            Err(SubmissionError::Malformed(_))
        ));
    }

    #[test]
    fn content_type_selects_format() {
        let mut headers = HeaderMap::new();
        assert_eq!(BodyFormat::from_headers(&headers).unwrap(), BodyFormat::UrlEncoded);

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=x"),
        );
        assert_eq!(BodyFormat::from_headers(&headers).unwrap(), BodyFormat::Multipart);

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert_eq!(BodyFormat::from_headers(&headers).unwrap(), BodyFormat::Json);

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
        assert!(matches!(
            BodyFormat::from_headers(&headers),
            Err(SubmissionError::UnsupportedContentType(ct)) if ct == "text/csv"
        ));
    }
}
