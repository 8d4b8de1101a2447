use crate::config::MIN_PASSWORD_LEN;
use crate::error::ValidationError;
use crate::format::{to_date_input, to_iso_timestamp};
use crate::models::{Category, DocType, Expense, ExtractedData, SaveInvoiceRequest, UpdateExpenseRequest};

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Mismatch is reported before length.
pub fn validate_registration(email: &str, password: &str, confirm: &str) -> Result<(), ValidationError> {
    validate_login(email, password)?;
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

/// Number input text as an amount; anything unreadable is zero.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn optional(text: &str) -> Option<String> {
    Some(text.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvoiceField {
    BusinessName,
    BusinessId,
    InvoiceNumber,
    TransactionDate,
    AmountBeforeVat,
    AmountAfterVat,
    DocType,
    Category,
    ServiceDesc,
}

/// Editable invoice fields shared by the extraction preview and the edit dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvoiceForm {
    pub business_name: String,
    pub business_id: String,
    pub invoice_number: String,
    pub transaction_date: String,
    pub amount_before_vat: f64,
    pub amount_after_vat: f64,
    pub doc_type: DocType,
    pub category: Category,
    pub service_desc: String,
}

impl InvoiceForm {
    pub fn from_extracted(extracted: &ExtractedData) -> Self {
        Self {
            business_name: extracted.business_name.clone().unwrap_or_default(),
            business_id: extracted.business_id.clone().unwrap_or_default(),
            invoice_number: extracted.invoice_number.clone().unwrap_or_default(),
            transaction_date: extracted
                .transaction_date
                .as_deref()
                .map(to_date_input)
                .unwrap_or_default(),
            amount_before_vat: extracted.amount_before_vat.unwrap_or(0.0),
            amount_after_vat: extracted.amount_after_vat.unwrap_or(0.0),
            doc_type: extracted.doc_type.as_deref().map(DocType::from_code).unwrap_or_default(),
            category: Category::default(),
            service_desc: extracted.service_desc.clone().unwrap_or_default(),
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            business_name: expense.business_name.clone().unwrap_or_default(),
            business_id: expense.business_id.clone().unwrap_or_default(),
            invoice_number: expense.invoice_number.clone().unwrap_or_default(),
            transaction_date: to_date_input(&expense.transaction_date),
            amount_before_vat: expense.amount_before_vat,
            amount_after_vat: expense.amount_after_vat,
            doc_type: expense.doc_type,
            category: expense.category,
            service_desc: expense.service_desc.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: InvoiceField, raw: &str) {
        match field {
            InvoiceField::BusinessName => self.business_name = raw.to_string(),
            InvoiceField::BusinessId => self.business_id = raw.to_string(),
            InvoiceField::InvoiceNumber => self.invoice_number = raw.to_string(),
            InvoiceField::TransactionDate => self.transaction_date = raw.to_string(),
            InvoiceField::AmountBeforeVat => self.amount_before_vat = parse_amount(raw),
            InvoiceField::AmountAfterVat => self.amount_after_vat = parse_amount(raw),
            InvoiceField::DocType => self.doc_type = DocType::from_code(raw),
            InvoiceField::Category => {
                if let Some(category) = Category::from_code(raw) {
                    self.category = category;
                }
            }
            InvoiceField::ServiceDesc => self.service_desc = raw.to_string(),
        }
    }

    /// The amount after VAT must be non-zero and the date readable.
    fn required_timestamp(&self) -> Result<String, ValidationError> {
        if self.amount_after_vat == 0.0 || !self.amount_after_vat.is_finite() {
            return Err(ValidationError::MissingRequiredFields);
        }
        to_iso_timestamp(&self.transaction_date).ok_or(ValidationError::MissingRequiredFields)
    }

    pub fn to_save_request(&self) -> Result<SaveInvoiceRequest, ValidationError> {
        let transaction_date = self.required_timestamp()?;
        Ok(SaveInvoiceRequest {
            business_name: optional(&self.business_name),
            business_id: optional(&self.business_id),
            invoice_number: optional(&self.invoice_number),
            transaction_date,
            amount_before_vat: self.amount_before_vat,
            amount_after_vat: self.amount_after_vat,
            doc_type: Some(self.doc_type),
            service_desc: optional(&self.service_desc),
        })
    }

    pub fn to_update_request(&self) -> Result<UpdateExpenseRequest, ValidationError> {
        let transaction_date = self.required_timestamp()?;
        Ok(UpdateExpenseRequest {
            business_name: optional(&self.business_name),
            business_id: optional(&self.business_id),
            invoice_number: optional(&self.invoice_number),
            service_desc: optional(&self.service_desc),
            doc_type: self.doc_type,
            amount_before_vat: self.amount_before_vat,
            amount_after_vat: self.amount_after_vat,
            transaction_date,
            category: self.category,
        })
    }
}
