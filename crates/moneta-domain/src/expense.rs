//! Domain models for expense records and their categories.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Closed set of labels classifying an expense for aggregation and goals.
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Utilities,
    Housing,
    Healthcare,
    Shopping,
    Education,
    Insurance,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Utilities,
        Category::Housing,
        Category::Healthcare,
        Category::Shopping,
        Category::Education,
        Category::Insurance,
        Category::Other,
    ];

    /// Parses the lowercase wire label; unknown labels are rejected.
    pub fn parse(value: &str) -> Option<Category> {
        match value.trim().to_ascii_lowercase().as_str() {
            "food" => Some(Category::Food),
            "transportation" => Some(Category::Transportation),
            "entertainment" => Some(Category::Entertainment),
            "utilities" => Some(Category::Utilities),
            "housing" => Some(Category::Housing),
            "healthcare" => Some(Category::Healthcare),
            "shopping" => Some(Category::Shopping),
            "education" => Some(Category::Education),
            "insurance" => Some(Category::Insurance),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// User-facing label, as shown in the expense table and category picker.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Housing => "Housing",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Insurance => "Insurance",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A single ledger entry. Mutated only by full-record replacement.
pub struct Expense {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    #[serde(default)]
    pub recurring: bool,
    #[serde(
        rename = "recurringFrequency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recurring_frequency: Option<Frequency>,
    #[serde(rename = "nextDueDate", default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            amount,
            category,
            recurring: false,
            recurring_frequency: None,
            next_due_date: None,
        }
    }

    pub fn with_recurrence(mut self, frequency: Frequency) -> Self {
        self.set_recurrence(Some(frequency));
        self
    }

    /// Assigns or clears the recurrence cadence.
    ///
    /// Keeps the invariant that `recurring`, `recurring_frequency` and
    /// `next_due_date` are either all present or all absent, and never
    /// leaves a stale due date behind.
    pub fn set_recurrence(&mut self, frequency: Option<Frequency>) {
        self.recurring = frequency.is_some();
        self.recurring_frequency = frequency;
        self.refresh_next_due_date();
    }

    /// Recomputes the cached due date from `date` and the active cadence.
    pub fn refresh_next_due_date(&mut self) {
        self.next_due_date = self
            .recurring_frequency
            .map(|frequency| frequency.next_date(self.date));
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} {} ({})", self.date, self.description, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn recurrence_fields_track_the_cadence() {
        let mut expense = Expense::new(date(2024, 1, 31), "Rent", 1500.0, Category::Housing);
        assert!(!expense.recurring);
        assert!(expense.next_due_date.is_none());

        expense.set_recurrence(Some(Frequency::Monthly));
        assert!(expense.recurring);
        assert_eq!(expense.next_due_date, Some(date(2024, 2, 29)));

        expense.set_recurrence(None);
        assert!(!expense.recurring);
        assert!(expense.recurring_frequency.is_none());
        assert!(expense.next_due_date.is_none());
    }

    #[test]
    fn non_recurring_expense_omits_recurrence_fields_on_the_wire() {
        let expense = Expense::new(date(2024, 5, 1), "Coffee", 4.5, Category::Food);
        let json = serde_json::to_string(&expense).unwrap();
        assert!(!json.contains("recurringFrequency"));
        assert!(!json.contains("nextDueDate"));
        assert!(json.contains("\"category\":\"food\""));
    }

    #[test]
    fn recurring_expense_serializes_cadence_on_the_wire() {
        let expense = Expense::new(date(2024, 1, 31), "Rent", 1500.0, Category::Housing)
            .with_recurrence(Frequency::Monthly);
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"recurring\":true"));
        assert!(json.contains("\"recurringFrequency\":\"monthly\""));
        assert!(json.contains("\"nextDueDate\":\"2024-02-29\""));
    }

    #[test]
    fn legacy_records_without_id_or_recurrence_deserialize() {
        let json = r#"{"date":"2024-03-10","description":"Bus","amount":2.75,"category":"transportation"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.description, "Bus");
        assert!(!expense.recurring);
        assert!(!expense.id.is_nil());
    }

    #[test]
    fn category_labels_round_trip_through_parse() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            let wire = json.trim_matches('"');
            assert_eq!(Category::parse(wire), Some(category));
        }
        assert_eq!(Category::parse("groceries"), None);
    }
}
