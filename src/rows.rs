//! Line Item Rows
//!
//! Row view-models for the order item table and the formset naming
//! convention (`<prefix>-<index>-<field>`) the server expects.

use leptos_autocomplete::float_text;

use crate::models::{CatalogItem, InitialItem};
use crate::money::{parse_amount, LineInput};

/// Formset prefix used when the page doesn't override it
pub const DEFAULT_PREFIX: &str = "order_items";

/// Per-row form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowField {
    SkladItem,
    ArticleNumber,
    Name,
    Unit,
    Quantity,
    PurchasePrice,
    IncludeVat,
}

impl RowField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SkladItem => "sklad_item",
            Self::ArticleNumber => "article_number",
            Self::Name => "name",
            Self::Unit => "unit",
            Self::Quantity => "quantity",
            Self::PurchasePrice => "purchase_price",
            Self::IncludeVat => "include_vat",
        }
    }
}

pub fn field_name(prefix: &str, index: u32, field: RowField) -> String {
    format!("{}-{}-{}", prefix, index, field.as_str())
}

/// Management form input name, e.g. `order_items-TOTAL_FORMS`
pub fn management_name(prefix: &str, name: &str) -> String {
    format!("{}-{}", prefix, name)
}

/// One editable line item. `index` is its formset index and doubles as the
/// stable key; it never changes once assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemRow {
    pub index: u32,
    pub sklad_item: String,
    pub article_number: String,
    pub name: String,
    pub unit: String,
    pub quantity: String,
    pub purchase_price: String,
    pub include_vat: bool,
}

impl LineItemRow {
    /// Fresh row as added by the user: empty, VAT on
    pub fn blank(index: u32) -> Self {
        Self {
            index,
            include_vat: true,
            ..Default::default()
        }
    }

    pub fn from_initial(index: u32, item: &InitialItem) -> Self {
        Self {
            index,
            sklad_item: item.sklad_item.clone(),
            article_number: item.article_number.clone(),
            name: item.name.clone(),
            unit: item.unit.clone(),
            quantity: item.quantity.clone(),
            purchase_price: item.purchase_price.clone(),
            include_vat: item.include_vat,
        }
    }

    pub fn line_input(&self) -> LineInput {
        LineInput {
            quantity: parse_amount(&self.quantity),
            price: parse_amount(&self.purchase_price),
            include_vat: self.include_vat,
        }
    }

    /// Copy the picked catalog entry into this row. Quantity and VAT stay.
    pub fn apply_catalog_item(&mut self, item: &CatalogItem) {
        self.sklad_item = item.id.to_string();
        self.article_number = item.article_number.clone();
        self.name = item.name.clone();
        self.unit = item.unit.clone();
        self.purchase_price = float_text(item.purchase_price);
    }
}

/// Index for a new row: one past the highest in use, so it equals the row
/// count until something is removed and never collides afterwards.
pub fn next_form_index(rows: &[LineItemRow]) -> u32 {
    rows.iter().map(|row| row.index + 1).max().unwrap_or(0)
}

pub fn rows_from_initial(items: &[InitialItem]) -> Vec<LineItemRow> {
    items
        .iter()
        .zip(0u32..)
        .map(|(item, index)| LineItemRow::from_initial(index, item))
        .collect()
}

pub fn push_blank_row(rows: &mut Vec<LineItemRow>) -> u32 {
    let index = next_form_index(rows);
    rows.push(LineItemRow::blank(index));
    index
}

/// Returns false if no row had that index
pub fn remove_row(rows: &mut Vec<LineItemRow>, index: u32) -> bool {
    let before = rows.len();
    rows.retain(|row| row.index != index);
    rows.len() != before
}

/// 1-based position shown in the number column
pub fn row_position(rows: &[LineItemRow], index: u32) -> Option<usize> {
    rows.iter().position(|row| row.index == index).map(|at| at + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rows: &[LineItemRow]) -> Vec<String> {
        rows.iter()
            .map(|row| field_name(DEFAULT_PREFIX, row.index, RowField::Quantity))
            .collect()
    }

    #[test]
    fn test_field_names() {
        assert_eq!(field_name("order_items", 3, RowField::PurchasePrice), "order_items-3-purchase_price");
        assert_eq!(field_name("order_items", 0, RowField::IncludeVat), "order_items-0-include_vat");
        assert_eq!(management_name("order_items", "TOTAL_FORMS"), "order_items-TOTAL_FORMS");
    }

    #[test]
    fn test_add_rows_numbers_sequentially() {
        let mut rows = Vec::new();
        assert_eq!(push_blank_row(&mut rows), 0);
        assert_eq!(push_blank_row(&mut rows), 1);
        assert_eq!(push_blank_row(&mut rows), 2);
        assert!(rows.iter().all(|row| row.include_vat));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_remove_keeps_other_names() {
        let mut rows = Vec::new();
        for _ in 0..3 {
            push_blank_row(&mut rows);
        }
        assert!(remove_row(&mut rows, 1));
        assert_eq!(rows.len(), 2);
        assert_eq!(names(&rows), vec!["order_items-0-quantity", "order_items-2-quantity"]);
        assert!(!remove_row(&mut rows, 1));
        assert_eq!(row_position(&rows, 2), Some(2));
        assert_eq!(row_position(&rows, 1), None);
    }

    #[test]
    fn test_add_after_remove_does_not_collide() {
        let mut rows = Vec::new();
        for _ in 0..3 {
            push_blank_row(&mut rows);
        }
        remove_row(&mut rows, 1);
        assert_eq!(push_blank_row(&mut rows), 3);
        remove_row(&mut rows, 3);
        remove_row(&mut rows, 2);
        remove_row(&mut rows, 0);
        assert_eq!(push_blank_row(&mut rows), 0);
    }

    #[test]
    fn test_line_input_parses_fields() {
        let row = LineItemRow {
            quantity: "2".to_string(),
            purchase_price: "10.50".to_string(),
            include_vat: false,
            ..LineItemRow::blank(0)
        };
        assert_eq!(row.line_input(), LineInput { quantity: 2.0, price: 10.5, include_vat: false });
        assert_eq!(LineItemRow::blank(1).line_input().quantity, 0.0);
    }

    #[test]
    fn test_apply_catalog_item() {
        let mut row = LineItemRow { quantity: "3".to_string(), ..LineItemRow::blank(4) };
        row.apply_catalog_item(&CatalogItem {
            id: 42,
            article_number: "BRK-7".to_string(),
            name: "Накладки".to_string(),
            unit: "к-т".to_string(),
            quantity: 10.0,
            purchase_price: 55.0,
            total_value: 550.0,
        });
        assert_eq!(row.sklad_item, "42");
        assert_eq!(row.purchase_price, "55");
        assert_eq!(row.quantity, "3");
        assert_eq!(row.index, 4);
    }

    #[test]
    fn test_rows_from_initial() {
        let items = vec![
            InitialItem { name: "A".to_string(), include_vat: false, ..Default::default() },
            InitialItem { name: "B".to_string(), include_vat: true, ..Default::default() },
        ];
        let rows = rows_from_initial(&items);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].name, "B");
        assert!(!rows[0].include_vat);
        assert_eq!(next_form_index(&rows), 2);
    }
}
