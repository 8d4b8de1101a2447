use std::rc::Rc;

use yew::Reducible;

use crate::api::{ApiClient, Transport};
use crate::config::{ACCEPTED_MIME_TYPES, MAX_UPLOAD_BYTES};
use crate::error::{ApiResult, ClientResult, ValidationError};
use crate::forms::{InvoiceField, InvoiceForm};
use crate::models::{Expense, ExtractedData};
use crate::storage::KeyValueStore;

/// A file picked or dropped by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    /// Browser handle; absent outside a browser.
    pub raw: Option<web_sys::File>,
}

impl SelectedFile {
    #[cfg(test)]
    pub fn new(name: &str, mime: &str, size: u64) -> Self {
        Self { name: name.to_string(), mime: mime.to_string(), size, raw: None }
    }

    pub fn from_browser(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            mime: file.type_(),
            size: file.size().max(0.0) as u64,
            raw: Some(file),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime == "application/pdf"
    }
}

pub fn validate_upload(file: &SelectedFile) -> Result<(), ValidationError> {
    if !ACCEPTED_MIME_TYPES.contains(&file.mime.as_str()) {
        return Err(ValidationError::UnsupportedFileType(file.mime.clone()));
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge(file.size));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum UploadState {
    #[default]
    Idle,
    FileSelected(SelectedFile),
    Uploading(SelectedFile),
    Preview { file: SelectedFile, form: InvoiceForm },
    Saving { file: SelectedFile, form: InvoiceForm },
}

pub enum UploadAction {
    Select(SelectedFile),
    ClearFile,
    UploadStarted,
    Extracted(ExtractedData),
    UploadFailed,
    Edit(InvoiceField, String),
    SaveStarted,
    SaveFailed,
    Saved,
    Cancel,
}

impl UploadState {
    pub fn file(&self) -> Option<&SelectedFile> {
        match self {
            UploadState::Idle => None,
            UploadState::FileSelected(file) | UploadState::Uploading(file) => Some(file),
            UploadState::Preview { file, .. } | UploadState::Saving { file, .. } => Some(file),
        }
    }

    pub fn form(&self) -> Option<&InvoiceForm> {
        match self {
            UploadState::Preview { form, .. } | UploadState::Saving { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, UploadState::Uploading(_) | UploadState::Saving { .. })
    }

    /// Validates a candidate file. On rejection the current state is kept as is.
    pub fn select(&self, file: SelectedFile) -> Result<UploadAction, ValidationError> {
        validate_upload(&file)?;
        Ok(UploadAction::Select(file))
    }

    /// Transitions that do not apply to the current state leave it unchanged.
    pub fn next(self, action: UploadAction) -> UploadState {
        use UploadState::*;
        match (self, action) {
            (Idle | FileSelected(_), UploadAction::Select(file)) => FileSelected(file),
            (FileSelected(_), UploadAction::ClearFile) => Idle,
            (FileSelected(file), UploadAction::UploadStarted) => Uploading(file),
            (Uploading(file), UploadAction::Extracted(extracted)) => Preview {
                file,
                form: InvoiceForm::from_extracted(&extracted),
            },
            (Uploading(file), UploadAction::UploadFailed) => FileSelected(file),
            (Preview { file, mut form }, UploadAction::Edit(field, value)) => {
                form.set(field, &value);
                Preview { file, form }
            }
            (Preview { file, form }, UploadAction::SaveStarted) => Saving { file, form },
            (Saving { file, form }, UploadAction::SaveFailed) => Preview { file, form },
            (Saving { .. }, UploadAction::Saved) => Idle,
            (Preview { .. }, UploadAction::Cancel) => Idle,
            (state, _) => state,
        }
    }
}

impl Reducible for UploadState {
    type Action = UploadAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().next(action))
    }
}

pub async fn extract<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    file: &SelectedFile,
) -> ApiResult<ExtractedData> {
    client.parse_invoice(file).await
}

/// Checks the mandatory fields, then saves. Nothing is sent when the check fails.
pub async fn save<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>, form: &InvoiceForm) -> ClientResult<Expense> {
    let request = form.to_save_request()?;
    let expense = client.save_invoice(&request).await?;
    log::info!("saved expense {}", expense.id);
    Ok(expense)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::transport::testing::RecordingTransport;
    use crate::api::{HttpMethod, RequestBody};
    use crate::error::ClientError;
    use crate::models::DocType;
    use crate::storage::MemoryStorage;

    fn pdf() -> SelectedFile {
        SelectedFile::new("invoice.pdf", "application/pdf", 300 * 1024)
    }

    fn client(transport: &RecordingTransport) -> ApiClient<RecordingTransport, MemoryStorage> {
        ApiClient::new("http://api.test", transport.clone(), MemoryStorage::default())
    }

    #[test]
    fn unsupported_type_is_rejected_and_state_kept() {
        let state = UploadState::FileSelected(pdf());
        let gif = SelectedFile::new("cat.gif", "image/gif", 1024);
        let err = state.select(gif).err();
        assert_eq!(err, Some(ValidationError::UnsupportedFileType("image/gif".to_string())));
        assert_eq!(state.file(), Some(&pdf()));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let big = SelectedFile::new("scan.png", "image/png", MAX_UPLOAD_BYTES + 1);
        assert_eq!(validate_upload(&big), Err(ValidationError::FileTooLarge(MAX_UPLOAD_BYTES + 1)));
        let exact = SelectedFile::new("scan.png", "image/png", MAX_UPLOAD_BYTES);
        assert_eq!(validate_upload(&exact), Ok(()));
        for mime in ["image/jpeg", "image/jpg"] {
            assert_eq!(validate_upload(&SelectedFile::new("a", mime, 1)), Ok(()));
        }
    }

    #[test]
    fn happy_path_walks_every_stage() {
        let state = UploadState::Idle;
        let action = state.select(pdf()).unwrap();
        let state = state.next(action);
        assert_eq!(state, UploadState::FileSelected(pdf()));

        let state = state.next(UploadAction::UploadStarted);
        assert!(state.is_busy());

        let extracted = ExtractedData { amount_after_vat: Some(117.0), ..Default::default() };
        let state = state.next(UploadAction::Extracted(extracted));
        assert_eq!(state.form().map(|f| f.amount_after_vat), Some(117.0));

        let state = state.next(UploadAction::Edit(InvoiceField::TransactionDate, "2024-01-31".to_string()));
        assert_eq!(state.form().map(|f| f.transaction_date.as_str()), Some("2024-01-31"));

        let state = state.next(UploadAction::SaveStarted);
        assert!(matches!(state, UploadState::Saving { .. }));
        assert_eq!(state.next(UploadAction::Saved), UploadState::Idle);
    }

    #[test]
    fn failures_return_to_the_previous_interactive_state() {
        let state = UploadState::Uploading(pdf()).next(UploadAction::UploadFailed);
        assert_eq!(state, UploadState::FileSelected(pdf()));

        let form = InvoiceForm { amount_after_vat: 5.0, ..Default::default() };
        let state = UploadState::Saving { file: pdf(), form: form.clone() }.next(UploadAction::SaveFailed);
        assert_eq!(state, UploadState::Preview { file: pdf(), form });
        assert_eq!(state.next(UploadAction::Cancel), UploadState::Idle);
    }

    #[test]
    fn busy_states_ignore_new_selections() {
        let other = SelectedFile::new("b.png", "image/png", 10);
        let state = UploadState::Uploading(pdf()).next(UploadAction::Select(other));
        assert_eq!(state, UploadState::Uploading(pdf()));
        assert_eq!(UploadState::Idle.next(UploadAction::UploadStarted), UploadState::Idle);
    }

    #[test]
    fn save_with_missing_fields_sends_nothing() {
        let transport = RecordingTransport::default();
        let form = InvoiceForm { transaction_date: "2024-01-01".to_string(), amount_after_vat: 0.0, ..Default::default() };

        let err = block_on(save(&client(&transport), &form)).unwrap_err();

        assert_eq!(err, ClientError::Validation(ValidationError::MissingRequiredFields));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn save_posts_the_reviewed_fields() {
        let transport = RecordingTransport::default();
        transport.respond(
            201,
            json!({ "expense": {
                "id": "e1", "docType": "INVOICE", "amountBeforeVat": 100.0, "amountAfterVat": 117.0,
                "transactionDate": "2024-01-01T00:00:00.000Z", "category": "OTHER"
            }}),
        );
        let form = InvoiceForm {
            transaction_date: "2024-01-01".to_string(),
            amount_before_vat: 100.0,
            amount_after_vat: 117.0,
            doc_type: DocType::Invoice,
            ..Default::default()
        };

        let expense = block_on(save(&client(&transport), &form)).unwrap();

        assert_eq!(expense.id, "e1");
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://api.test/invoices/save");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({
                "transactionDate": "2024-01-01T00:00:00.000Z",
                "amountBeforeVat": 100.0,
                "amountAfterVat": 117.0,
                "docType": "INVOICE"
            }))
        );
    }

    #[test]
    fn extract_reports_backend_failure() {
        let transport = RecordingTransport::default();
        transport.respond(422, json!({ "error": "Could not read the document" }));

        let err = block_on(extract(&client(&transport), &pdf())).unwrap_err();

        assert_eq!(err.to_string(), "Could not read the document");
        assert_eq!(transport.requests().len(), 1);
    }
}
