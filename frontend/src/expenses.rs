use std::rc::Rc;

use yew::Reducible;

use crate::api::{ApiClient, Transport};
use crate::error::{ApiResult, ClientResult};
use crate::filters::ExpenseFilters;
use crate::forms::InvoiceForm;
use crate::models::{Category, PaginatedExpenses};
use crate::storage::KeyValueStore;

/// Ids of rows with a mutation in flight. A locked row accepts no further action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowLocks {
    pub updating_id: Option<String>,
    pub deleting_id: Option<String>,
}

impl RowLocks {
    pub fn is_locked(&self, id: &str) -> bool {
        self.updating_id.as_deref() == Some(id) || self.deleting_id.as_deref() == Some(id)
    }

    pub fn updating(&self, id: &str) -> Self {
        Self { updating_id: Some(id.to_string()), ..self.clone() }
    }

    pub fn deleting(&self, id: &str) -> Self {
        Self { deleting_id: Some(id.to_string()), ..self.clone() }
    }

    pub fn release(&self, id: &str) -> Self {
        let keep = |slot: &Option<String>| slot.clone().filter(|held| held != id);
        Self { updating_id: keep(&self.updating_id), deleting_id: keep(&self.deleting_id) }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum LockAction {
    Updating(String),
    Deleting(String),
    Release(String),
}

impl Reducible for RowLocks {
    type Action = LockAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(match action {
            LockAction::Updating(id) => self.updating(&id),
            LockAction::Deleting(id) => self.deleting(&id),
            LockAction::Release(id) => self.release(&id),
        })
    }
}

/// Asks for confirmation on an unlocked row and only then yields the lock to take.
/// A locked row is refused without prompting.
pub fn begin_delete(locks: &RowLocks, expense_id: &str, confirm: impl FnOnce() -> bool) -> Option<LockAction> {
    if locks.is_locked(expense_id) || !confirm() {
        return None;
    }
    Some(LockAction::Deleting(expense_id.to_string()))
}

/// An inline category edit on one row, kept so a rejected change can be rolled back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryChange {
    pub expense_id: String,
    pub previous: Category,
    pub requested: Category,
}

impl CategoryChange {
    /// Category the row's select shows once the request settles: the server's value after
    /// a refetch, the previous one after a failure.
    pub fn shown(&self, outcome: &ApiResult<PaginatedExpenses>) -> Category {
        match outcome {
            Ok(page) => page
                .items
                .iter()
                .find(|expense| expense.id == self.expense_id)
                .map_or(self.requested, |expense| expense.category),
            Err(_) => self.previous,
        }
    }
}

pub async fn load<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    filters: &ExpenseFilters,
) -> ApiResult<PaginatedExpenses> {
    client.get_expenses(filters).await
}

/// Waits for the server to accept the new category, then reads the list again.
pub async fn change_category<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    expense_id: &str,
    category: Category,
    filters: &ExpenseFilters,
) -> ApiResult<PaginatedExpenses> {
    client.update_expense_category(expense_id, category).await?;
    log::info!("expense {} moved to {}", expense_id, category.code());
    load(client, filters).await
}

pub async fn update<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    expense_id: &str,
    form: &InvoiceForm,
    filters: &ExpenseFilters,
) -> ClientResult<PaginatedExpenses> {
    let request = form.to_update_request()?;
    client.update_expense(expense_id, &request).await?;
    log::info!("expense {} updated", expense_id);
    Ok(load(client, filters).await?)
}

/// `None` when the user declines; nothing is sent in that case.
pub async fn delete<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    expense_id: &str,
    confirm: impl FnOnce() -> bool,
    filters: &ExpenseFilters,
) -> ApiResult<Option<PaginatedExpenses>> {
    if !confirm() {
        return Ok(None);
    }
    client.delete_expense(expense_id).await?;
    log::info!("expense {} deleted", expense_id);
    load(client, filters).await.map(Some)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::{json, Value};

    use super::*;
    use crate::api::transport::testing::RecordingTransport;
    use crate::api::{HttpMethod, RequestBody};
    use crate::error::{ClientError, ValidationError};
    use crate::storage::MemoryStorage;

    fn client(transport: &RecordingTransport) -> ApiClient<RecordingTransport, MemoryStorage> {
        ApiClient::new("http://api.test", transport.clone(), MemoryStorage::default())
    }

    fn expense(id: &str, category: &str) -> Value {
        json!({
            "id": id,
            "businessName": null,
            "docType": "RECEIPT",
            "amountBeforeVat": 42.0,
            "amountAfterVat": 49.14,
            "transactionDate": "2024-04-01T00:00:00.000Z",
            "category": category
        })
    }

    fn page(items: Vec<Value>) -> Value {
        let count = items.len();
        json!({ "items": items, "totalCount": count, "page": 1, "pageSize": 20 })
    }

    #[test]
    fn row_locks_track_ids() {
        let locks = RowLocks::default().deleting("e1");
        assert!(locks.is_locked("e1"));
        assert!(!locks.is_locked("e2"));

        let locks = locks.updating("e2");
        assert!(locks.is_locked("e2"));
        let locks = locks.release("e1");
        assert!(!locks.is_locked("e1"));
        assert!(locks.is_locked("e2"));
    }

    #[test]
    fn lock_reducer_releases_only_the_named_row() {
        let locks = Rc::new(RowLocks::default())
            .reduce(LockAction::Updating("e1".to_string()))
            .reduce(LockAction::Deleting("e2".to_string()))
            .reduce(LockAction::Release("e2".to_string()));

        assert_eq!(locks.updating_id.as_deref(), Some("e1"));
        assert_eq!(locks.deleting_id, None);
    }

    #[test]
    fn declined_prompt_takes_no_lock() {
        let locks = RowLocks::default();

        assert_eq!(begin_delete(&locks, "e1", || false), None);
        assert_eq!(begin_delete(&locks, "e1", || true), Some(LockAction::Deleting("e1".to_string())));
    }

    #[test]
    fn locked_row_is_refused_without_prompting() {
        let locks = RowLocks::default().updating("e1");
        let mut prompted = false;

        let action = begin_delete(&locks, "e1", || {
            prompted = true;
            true
        });

        assert_eq!(action, None);
        assert!(!prompted);
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let transport = RecordingTransport::default();

        let outcome = block_on(delete(&client(&transport), "e1", || false, &ExpenseFilters::default())).unwrap();

        assert_eq!(outcome, None);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn confirmed_delete_sends_one_delete_then_one_refetch() {
        let transport = RecordingTransport::default();
        transport.respond_empty(204);
        transport.respond(200, page(vec![]));
        let filters = ExpenseFilters { category: Some(Category::Food), ..Default::default() };

        let outcome = block_on(delete(&client(&transport), "e1", || true, &filters)).unwrap();

        assert_eq!(outcome.map(|p| p.items.len()), Some(0));
        assert_eq!(transport.methods(), vec![HttpMethod::Delete, HttpMethod::Get]);
        assert_eq!(transport.requests()[1].query_value("category"), Some("FOOD"));
    }

    #[test]
    fn failed_delete_does_not_refetch() {
        let transport = RecordingTransport::default();
        transport.respond(404, json!({ "error": "Expense not found" }));

        let err = block_on(delete(&client(&transport), "e1", || true, &ExpenseFilters::default())).unwrap_err();

        assert_eq!(err.to_string(), "Expense not found");
        assert_eq!(transport.methods(), vec![HttpMethod::Delete]);
    }

    #[test]
    fn category_change_waits_for_server_then_refetches() {
        let transport = RecordingTransport::default();
        transport.respond(200, json!({ "expense": expense("e1", "CAR") }));
        transport.respond(200, page(vec![expense("e1", "CAR")]));

        let refreshed =
            block_on(change_category(&client(&transport), "e1", Category::Car, &ExpenseFilters::default())).unwrap();

        assert_eq!(refreshed.items[0].category, Category::Car);
        assert_eq!(transport.methods(), vec![HttpMethod::Patch, HttpMethod::Get]);
    }

    fn food_to_car() -> CategoryChange {
        CategoryChange { expense_id: "e1".to_string(), previous: Category::Food, requested: Category::Car }
    }

    #[test]
    fn rejected_category_change_rolls_the_row_back() {
        let transport = RecordingTransport::default();
        transport.respond(500, json!({ "error": "Database unavailable" }));
        let change = food_to_car();

        let outcome = block_on(change_category(
            &client(&transport),
            &change.expense_id,
            change.requested,
            &ExpenseFilters::default(),
        ));

        assert!(outcome.is_err());
        assert_eq!(change.shown(&outcome), Category::Food);
        assert_eq!(transport.methods(), vec![HttpMethod::Patch]);
    }

    #[test]
    fn accepted_category_change_shows_the_refetched_value() {
        let transport = RecordingTransport::default();
        transport.respond(200, json!({ "expense": expense("e1", "CAR") }));
        transport.respond(200, page(vec![expense("e1", "TRAINING"), expense("e2", "FOOD")]));
        let change = food_to_car();

        let outcome = block_on(change_category(
            &client(&transport),
            &change.expense_id,
            change.requested,
            &ExpenseFilters::default(),
        ));

        assert_eq!(change.shown(&outcome), Category::Training);
        assert_eq!(change.shown(&Ok(PaginatedExpenses::default())), Category::Car);
    }

    #[test]
    fn edit_with_cleared_amount_is_blocked_locally() {
        let transport = RecordingTransport::default();
        let form = InvoiceForm { transaction_date: "2024-04-01".to_string(), ..Default::default() };

        let err = block_on(update(&client(&transport), "e1", &form, &ExpenseFilters::default())).unwrap_err();

        assert_eq!(err, ClientError::Validation(ValidationError::MissingRequiredFields));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn edit_patches_every_field_then_refetches() {
        let transport = RecordingTransport::default();
        transport.respond(200, json!({ "expense": expense("e1", "IT") }));
        transport.respond(200, page(vec![expense("e1", "IT")]));
        let form = InvoiceForm {
            business_name: "Partner".to_string(),
            transaction_date: "2024-04-01".to_string(),
            amount_before_vat: 42.0,
            amount_after_vat: 49.14,
            category: Category::It,
            ..Default::default()
        };

        block_on(update(&client(&transport), "e1", &form, &ExpenseFilters::default())).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://api.test/expenses/e1");
        match &requests[0].body {
            RequestBody::Json(body) => {
                assert_eq!(body["businessName"], "Partner");
                assert!(body["businessId"].is_null());
                assert_eq!(body["category"], "IT");
                assert_eq!(body["transactionDate"], "2024-04-01T00:00:00.000Z");
            }
            other => panic!("unexpected body {:?}", other),
        }
        assert_eq!(requests[1].method, HttpMethod::Get);
    }
}
