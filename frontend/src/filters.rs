use crate::models::Category;

/// Criteria applied to `GET /expenses`. Unset fields never reach the query string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFilters {
    pub from: Option<String>,
    pub to: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub category: Option<Category>,
    pub business: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    From,
    To,
    Min,
    Max,
    Category,
    Business,
}

impl ExpenseFilters {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), value));
            }
        };
        push("from", self.from.clone());
        push("to", self.to.clone());
        push("min", self.min.map(|v| v.to_string()));
        push("max", self.max.map(|v| v.to_string()));
        push("category", self.category.map(|c| c.code().to_string()));
        push("business", self.business.clone());
        push("page", self.page.map(|v| v.to_string()));
        push("pageSize", self.page_size.map(|v| v.to_string()));
        pairs
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some()
            || self.to.is_some()
            || self.min.is_some()
            || self.max.is_some()
            || self.category.is_some()
            || self.business.is_some()
    }

    /// Applies raw input text to one field. Empty text unsets it, and so does a
    /// numeric input that is zero or does not parse.
    pub fn set_field(&mut self, field: FilterField, raw: &str) {
        let text = Some(raw.trim().to_string()).filter(|v| !v.is_empty());
        let amount = || {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v != 0.0)
        };
        match field {
            FilterField::From => self.from = text,
            FilterField::To => self.to = text,
            FilterField::Min => self.min = amount(),
            FilterField::Max => self.max = amount(),
            FilterField::Category => self.category = text.as_deref().and_then(Category::from_code),
            FilterField::Business => self.business = text,
        }
    }

    /// Current value of a field as input text.
    pub fn field_text(&self, field: FilterField) -> String {
        match field {
            FilterField::From => self.from.clone().unwrap_or_default(),
            FilterField::To => self.to.clone().unwrap_or_default(),
            FilterField::Min => self.min.map(|v| v.to_string()).unwrap_or_default(),
            FilterField::Max => self.max.map(|v| v.to_string()).unwrap_or_default(),
            FilterField::Category => self.category.map(|c| c.code().to_string()).unwrap_or_default(),
            FilterField::Business => self.business.clone().unwrap_or_default(),
        }
    }
}

/// Draft criteria edited in the filter panel, kept apart from the applied filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterPanel {
    pub draft: ExpenseFilters,
    pub open: bool,
}

impl FilterPanel {
    pub fn new(applied: &ExpenseFilters) -> Self {
        Self { draft: applied.clone(), open: false }
    }

    pub fn edit(&mut self, field: FilterField, raw: &str) {
        self.draft.set_field(field, raw);
    }

    /// Re-seed the draft after the applied filter changed elsewhere.
    pub fn sync(&mut self, applied: &ExpenseFilters) {
        self.draft = applied.clone();
    }

    /// Returns the filter to apply and closes the panel.
    pub fn apply(&mut self) -> ExpenseFilters {
        self.open = false;
        self.draft.clone()
    }

    /// Clears the draft; the caller applies the returned empty filter immediately.
    pub fn reset(&mut self) -> ExpenseFilters {
        self.draft = ExpenseFilters::default();
        self.draft.clone()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::transport::testing::RecordingTransport;
    use crate::api::ApiClient;
    use crate::storage::MemoryStorage;

    #[test]
    fn applied_filter_sends_only_set_parameters() {
        let mut panel = FilterPanel::new(&ExpenseFilters::default());
        panel.edit(FilterField::Category, "FOOD");
        panel.edit(FilterField::Min, "100");
        let applied = panel.apply();

        let transport = RecordingTransport::default();
        transport.respond(200, json!({ "items": [], "totalCount": 0, "page": 1, "pageSize": 20 }));
        let client = ApiClient::new("http://api.test", transport.clone(), MemoryStorage::default());
        block_on(client.get_expenses(&applied)).unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].query,
            vec![
                ("min".to_string(), "100".to_string()),
                ("category".to_string(), "FOOD".to_string()),
            ]
        );
        for absent in ["from", "to", "max", "business"] {
            assert_eq!(requests[0].query_value(absent), None);
        }
    }

    #[test]
    fn draft_edits_do_not_touch_the_applied_filter() {
        let applied = ExpenseFilters { business: Some("Shufersal".to_string()), ..Default::default() };
        let mut panel = FilterPanel::new(&applied);
        panel.open = true;
        panel.edit(FilterField::Business, "");
        assert_eq!(panel.draft.business, None);
        assert_eq!(applied.business.as_deref(), Some("Shufersal"));

        let next = panel.apply();
        assert!(!panel.open);
        assert!(!next.is_active());
    }

    #[test]
    fn sync_replaces_the_draft_and_keeps_the_panel_state() {
        let first = ExpenseFilters { category: Some(Category::Car), ..Default::default() };
        let mut panel = FilterPanel::new(&first);
        panel.open = true;
        panel.edit(FilterField::Business, "Paz");
        panel.edit(FilterField::Min, "40");

        let second = ExpenseFilters { to: Some("2024-06-30".to_string()), max: Some(900.0), ..Default::default() };
        panel.sync(&second);

        assert_eq!(panel.draft, second);
        assert!(panel.open);
    }

    #[test]
    fn reset_clears_the_draft() {
        let mut panel = FilterPanel::new(&ExpenseFilters::default());
        panel.edit(FilterField::From, "2024-01-01");
        panel.edit(FilterField::Max, "500");
        assert!(panel.draft.is_active());

        let cleared = panel.reset();
        assert_eq!(cleared, ExpenseFilters::default());
        assert_eq!(panel.draft, ExpenseFilters::default());
    }

    #[test]
    fn zero_and_garbage_amounts_are_unset() {
        let mut filters = ExpenseFilters::default();
        filters.set_field(FilterField::Min, "0");
        filters.set_field(FilterField::Max, "abc");
        assert_eq!(filters.min, None);
        assert_eq!(filters.max, None);

        filters.set_field(FilterField::Max, "250.5");
        assert_eq!(filters.field_text(FilterField::Max), "250.5");
    }

    #[test]
    fn pagination_parameters_use_wire_names() {
        let filters = ExpenseFilters { page: Some(2), page_size: Some(50), ..Default::default() };
        assert_eq!(
            filters.query_pairs(),
            vec![("page".to_string(), "2".to_string()), ("pageSize".to_string(), "50".to_string())]
        );
        assert!(!filters.is_active());
    }
}
