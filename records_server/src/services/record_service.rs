//! Create-form submissions: validate, store attachments, persist.

use crate::entity::EntityKind;
use crate::error::AppError;
use crate::forms::{self, Cleaned, FormErrors, Limits, Submission};
use crate::record::{Record, Value};
use crate::services::choices;
use crate::store::{RecordStore, StoreError};
use crate::uploads::AttachmentStore;

const VANISHED_REFERENCE: &str =
    "A related record was removed while this form was being submitted. Please try again.";

#[derive(Debug)]
pub enum Outcome {
    Saved(Record),
    Invalid(FormErrors),
}

/// Validate and persist one submission for `kind`.
///
/// Validation problems are an `Outcome`, not an error. Attachments written
/// before a failed insert are removed again.
pub async fn submit(
    store: &dyn RecordStore,
    attachments: &AttachmentStore,
    limits: Limits,
    kind: EntityKind,
    submission: &Submission,
) -> Result<Outcome, AppError> {
    let choices = choices::load(store, kind).await?;

    let Cleaned {
        mut record,
        uploads,
    } = match forms::clean(kind, submission, &choices, limits) {
        Ok(cleaned) => cleaned,
        Err(errors) => return Ok(rejected(kind, errors)),
    };

    let id = record.id()?;
    if store.contains(kind, id).await? {
        return Ok(rejected(kind, duplicate(kind)));
    }

    let mut stored = Vec::with_capacity(uploads.len());
    for (field, file) in &uploads {
        match attachments.save(field, file).await {
            Ok(path) => {
                record.set(field.name, Value::Text(path.clone()));
                stored.push(path);
            }
            Err(e) => {
                discard_all(attachments, &stored).await;
                return Err(e.into());
            }
        }
    }

    match store.insert(record.clone()).await {
        Ok(()) => {
            tracing::info!(
                entity = %kind,
                id,
                backend = store.backend(),
                attachments = stored.len(),
                "Record created"
            );
            crate::metrics::record_created(kind);
            Ok(Outcome::Saved(record))
        }
        Err(e) => {
            discard_all(attachments, &stored).await;
            match e {
                // Lost a race with a concurrent insert of the same id.
                StoreError::Duplicate { .. } => Ok(rejected(kind, duplicate(kind))),
                StoreError::MissingReference { detail, .. } => {
                    tracing::warn!(entity = %kind, id, %detail, "Reference vanished during submit");
                    Ok(rejected(kind, FormErrors::non_field(VANISHED_REFERENCE)))
                }
                other => Err(other.into()),
            }
        }
    }
}

fn duplicate(kind: EntityKind) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.add(kind.primary_key().name, forms::duplicate_message(kind));
    errors
}

fn rejected(kind: EntityKind, errors: FormErrors) -> Outcome {
    tracing::info!(
        entity = %kind,
        fields = ?errors.fields().collect::<Vec<_>>(),
        "Submission rejected"
    );
    crate::metrics::form_rejected(kind);
    Outcome::Invalid(errors)
}

async fn discard_all(attachments: &AttachmentStore, stored: &[String]) {
    for path in stored {
        attachments.discard(path).await;
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;

    use super::*;
    use crate::forms::UploadedFile;
    use crate::store::MemoryStore;

    const LIMITS: Limits = Limits {
        max_upload_bytes: 1024,
    };

    fn next_of_kin(id: &str) -> Submission {
        let mut submission = Submission::default();
        for (name, value) in [
            ("next_of_kin_id", id),
            ("next_of_kin_phone_number", "555-0199"),
            ("next_of_kin_email", "kin@example.com"),
            ("next_of_kin_address", "4 Hill St"),
            ("next_of_kin_relationship", "Sister"),
            ("next_of_kin_date_of_birth", "1988-08-08"),
            ("next_of_kin_occupation", "Nurse"),
            ("next_of_kin_id_number", "ID-88"),
        ] {
            submission.push(name, value);
        }
        submission
    }

    #[tokio::test]
    async fn valid_submission_is_saved_once() {
        let store = MemoryStore::new();
        let dir = tempfile::tempdir().unwrap();
        let attachments = AttachmentStore::new(dir.path());

        let outcome = submit(&store, &attachments, LIMITS, EntityKind::NextOfKin, &next_of_kin("1"))
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Saved(_)));
        assert_eq!(store.count(EntityKind::NextOfKin).await.unwrap(), 1);

        let outcome = submit(&store, &attachments, LIMITS, EntityKind::NextOfKin, &next_of_kin("1"))
            .await
            .unwrap();
        let Outcome::Invalid(errors) = outcome else {
            panic!("duplicate id accepted");
        };
        assert_eq!(
            errors.for_field("next_of_kin_id"),
            ["Next of kin with this Next of kin id already exists."]
        );
        assert_eq!(store.count(EntityKind::NextOfKin).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn invalid_submission_writes_nothing() {
        let store = MemoryStore::new();
        let dir = tempfile::tempdir().unwrap();
        let attachments = AttachmentStore::new(dir.path());

        let mut submission = next_of_kin("2");
        submission.remove("next_of_kin_email");
        let outcome = submit(&store, &attachments, LIMITS, EntityKind::NextOfKin, &submission)
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Invalid(ref e) if e.contains("next_of_kin_email")));
        assert_eq!(store.count(EntityKind::NextOfKin).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn attachments_are_stored_as_relative_paths() {
        let store = MemoryStore::new();
        let dir = tempfile::tempdir().unwrap();
        let attachments = AttachmentStore::new(dir.path());

        let mut submission = Submission::default();
        for (name, value) in [
            ("employee_id", "7"),
            ("first_name", "Ana"),
            ("last_name", "Li"),
            ("address", "12 Harbour Rd"),
            ("phone_number", "555-0101"),
            ("email", "ana@example.com"),
            ("date_of_birth", "1990-04-12"),
            ("national_id", "NID-7"),
            ("date_of_employment", "2019-06-01"),
            ("position", "Analyst"),
        ] {
            submission.push(name, value);
        }
        submission.attach(
            "cv",
            UploadedFile {
                file_name: "Ana Li CV.pdf".into(),
                content_type: Some("application/pdf".into()),
                bytes: Bytes::from_static(b"%PDF-1.7"),
            },
        );

        let outcome = submit(&store, &attachments, LIMITS, EntityKind::Employee, &submission)
            .await
            .unwrap();
        let Outcome::Saved(record) = outcome else {
            panic!("employee rejected");
        };
        assert_eq!(record.get("cv"), Some(&Value::Text("files/Ana_Li_CV.pdf".into())));
        assert!(dir.path().join("files/Ana_Li_CV.pdf").exists());
    }
}
