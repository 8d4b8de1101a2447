use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocType {
    Invoice,
    Receipt,
    #[default]
    Unknown,
}

impl DocType {
    pub const ALL: [DocType; 3] = [DocType::Invoice, DocType::Receipt, DocType::Unknown];

    pub fn code(self) -> &'static str {
        match self {
            DocType::Invoice => "INVOICE",
            DocType::Receipt => "RECEIPT",
            DocType::Unknown => "UNKNOWN",
        }
    }

    /// Extraction reports the document type as free text; anything unrecognized is `Unknown`.
    pub fn from_code(code: &str) -> DocType {
        match code.trim().to_ascii_uppercase().as_str() {
            "INVOICE" => DocType::Invoice,
            "RECEIPT" => DocType::Receipt,
            _ => DocType::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocType::Invoice => "Invoice",
            DocType::Receipt => "Receipt",
            DocType::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Car,
    Food,
    Operations,
    It,
    Training,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Car,
        Category::Food,
        Category::Operations,
        Category::It,
        Category::Training,
        Category::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Category::Car => "CAR",
            Category::Food => "FOOD",
            Category::Operations => "OPERATIONS",
            Category::It => "IT",
            Category::Training => "TRAINING",
            Category::Other => "OTHER",
        }
    }

    pub fn from_code(code: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Car => "Car",
            Category::Food => "Food",
            Category::Operations => "Operations",
            Category::It => "IT",
            Category::Training => "Training",
            Category::Other => "Other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub business_id: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub doc_type: DocType,
    pub amount_before_vat: f64,
    pub amount_after_vat: f64,
    pub transaction_date: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub service_desc: Option<String>,
}

/// Candidate fields produced by the parse endpoint. Never saved as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub amount_before_vat: Option<f64>,
    #[serde(default)]
    pub amount_after_vat: Option<f64>,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub business_id: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub service_desc: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ParseInvoiceResponse {
    pub extracted: ExtractedData,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveInvoiceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    pub transaction_date: String,
    pub amount_before_vat: f64,
    pub amount_after_vat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_desc: Option<String>,
}

/// Body of `PATCH /expenses/:id`. Cleared text fields go out as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub business_name: Option<String>,
    pub business_id: Option<String>,
    pub invoice_number: Option<String>,
    pub service_desc: Option<String>,
    pub doc_type: DocType,
    pub amount_before_vat: f64,
    pub amount_after_vat: f64,
    pub transaction_date: String,
    pub category: Category,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExpenseEnvelope {
    pub expense: Expense,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedExpenses {
    pub items: Vec<Expense>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_reads_camel_case_wire_format() {
        let raw = r#"{
            "id": "e1",
            "userId": "u1",
            "businessName": "Cafe Noir",
            "businessId": null,
            "invoiceNumber": "A-17",
            "docType": "RECEIPT",
            "amountBeforeVat": 100.0,
            "amountAfterVat": 117.0,
            "transactionDate": "2024-03-05T00:00:00.000Z",
            "category": "IT",
            "rawText": null,
            "createdAt": "2024-03-05T10:00:00.000Z"
        }"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.business_name.as_deref(), Some("Cafe Noir"));
        assert_eq!(expense.business_id, None);
        assert_eq!(expense.doc_type, DocType::Receipt);
        assert_eq!(expense.category, Category::It);
        assert_eq!(expense.service_desc, None);
    }

    #[test]
    fn save_request_omits_absent_optionals() {
        let body = SaveInvoiceRequest {
            business_name: Some("Garage".to_string()),
            business_id: None,
            invoice_number: None,
            transaction_date: "2024-03-05T00:00:00.000Z".to_string(),
            amount_before_vat: 100.0,
            amount_after_vat: 117.0,
            doc_type: Some(DocType::Invoice),
            service_desc: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["businessName"], "Garage");
        assert_eq!(json["docType"], "INVOICE");
        assert!(json.get("businessId").is_none());
        assert!(json.get("serviceDesc").is_none());
    }

    #[test]
    fn update_request_sends_cleared_fields_as_null() {
        let body = UpdateExpenseRequest {
            business_name: None,
            business_id: None,
            invoice_number: Some("9".to_string()),
            service_desc: None,
            doc_type: DocType::Unknown,
            amount_before_vat: 0.0,
            amount_after_vat: 10.0,
            transaction_date: "2024-01-01T00:00:00.000Z".to_string(),
            category: Category::Training,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["businessName"].is_null());
        assert_eq!(json["category"], "TRAINING");
    }

    #[test]
    fn unknown_doc_type_text_falls_back() {
        assert_eq!(DocType::from_code("invoice"), DocType::Invoice);
        assert_eq!(DocType::from_code("TAX_INVOICE"), DocType::Unknown);
        assert_eq!(Category::from_code("FOOD"), Some(Category::Food));
        assert_eq!(Category::from_code(""), None);
    }
}
