// stockroom/src/export.rs

//! CSV exports of the dashboard tables, the product import template, and
//! local validation of bulk import files.

use crate::model::{Assignment, NewProduct, Order, Product};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use tracing::{event, instrument, Level};

#[derive(Debug, Error)]
pub enum ExportError {
  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("I/O error while writing CSV: {0}")]
  Io(#[from] std::io::Error),

  #[error("CSV output is not valid UTF-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Column order of the product import file.
pub const PRODUCT_IMPORT_HEADERS: [&str; 5] = ["name", "sku", "category", "price", "stock"];

fn write_rows<R: Serialize>(rows: impl IntoIterator<Item = R>) -> ExportResult<String> {
  let mut writer = csv::Writer::from_writer(Vec::new());
  for row in rows {
    writer.serialize(row)?;
  }
  finish(writer)
}

fn finish(mut writer: csv::Writer<Vec<u8>>) -> ExportResult<String> {
  writer.flush()?;
  let bytes = writer
    .into_inner()
    .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()))?;
  Ok(String::from_utf8(bytes)?)
}

#[derive(Serialize)]
struct OrderRow<'a> {
  receipt: &'a str,
  customer: &'a str,
  phone: &'a str,
  status: &'a str,
  progress: u8,
  payment_status: &'a str,
  total: Decimal,
  paid: Decimal,
  balance: Decimal,
  items: u32,
  created_at: String,
}

#[instrument(skip(orders), fields(count = orders.len()), err(Display))]
pub fn orders_csv(orders: &[Order]) -> ExportResult<String> {
  write_rows(orders.iter().map(|order| {
    let summary = order.payment_summary();
    OrderRow {
      receipt: &order.receipt,
      customer: &order.customer_name,
      phone: order.customer_phone.as_deref().unwrap_or(""),
      status: order.status.as_str(),
      progress: order.status.progress(),
      payment_status: order.payment_status.as_str(),
      total: summary.total,
      paid: summary.paid,
      balance: summary.balance,
      items: order.item_count(),
      created_at: order.created_at.map(|at| at.to_rfc3339()).unwrap_or_default(),
    }
  }))
}

#[derive(Serialize)]
struct ProductRow<'a> {
  id: &'a str,
  name: &'a str,
  sku: &'a str,
  category: &'a str,
  price: Decimal,
  stock: u32,
}

#[instrument(skip(products), fields(count = products.len()), err(Display))]
pub fn products_csv(products: &[Product]) -> ExportResult<String> {
  write_rows(products.iter().map(|p| ProductRow {
    id: &p.id,
    name: &p.name,
    sku: p.sku.as_deref().unwrap_or(""),
    category: p.category_id.as_deref().unwrap_or(""),
    price: p.price,
    stock: p.stock,
  }))
}

#[derive(Serialize)]
struct AssignmentRow<'a> {
  id: &'a str,
  product_id: &'a str,
  quantity: u32,
  direction: &'static str,
  warehouse_id: &'a str,
  shop_id: &'a str,
  created_at: String,
}

#[instrument(skip(assignments), fields(count = assignments.len()), err(Display))]
pub fn assignments_csv(assignments: &[Assignment]) -> ExportResult<String> {
  write_rows(assignments.iter().map(|a| AssignmentRow {
    id: &a.id,
    product_id: &a.product_id,
    quantity: a.quantity,
    direction: a.direction.as_str(),
    warehouse_id: &a.warehouse_id,
    shop_id: &a.shop_id,
    created_at: a.created_at.map(|at| at.to_rfc3339()).unwrap_or_default(),
  }))
}

/// Header row plus one filled-in example row.
pub fn product_import_template() -> ExportResult<String> {
  let mut writer = csv::Writer::from_writer(Vec::new());
  writer.write_record(PRODUCT_IMPORT_HEADERS)?;
  writer.write_record(["Sample Shirt", "SKU-0001", "Apparel", "2500.00", "10"])?;
  finish(writer)
}

/// A problem with one line of an import file. Line 1 is the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportIssue {
  pub line: u64,
  pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRow {
  pub line: u64,
  pub product: NewProduct,
}

/// Outcome of checking an import file before it is uploaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportPreview {
  pub rows: Vec<ImportRow>,
  pub issues: Vec<ImportIssue>,
}

impl ImportPreview {
  /// True when there is something to upload and nothing is wrong with it.
  pub fn is_clean(&self) -> bool {
    self.issues.is_empty() && !self.rows.is_empty()
  }

  /// The validated rows re-encoded with the canonical header.
  pub fn to_csv(&self) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PRODUCT_IMPORT_HEADERS)?;
    for row in &self.rows {
      let p = &row.product;
      writer.write_record([
        p.name.as_str(),
        p.sku.as_deref().unwrap_or(""),
        p.category.as_deref().unwrap_or(""),
        &p.price.to_string(),
        &p.stock.to_string(),
      ])?;
    }
    finish(writer)
  }
}

struct Columns {
  name: usize,
  sku: Option<usize>,
  category: Option<usize>,
  price: usize,
  stock: usize,
}

fn locate_columns(headers: &csv::StringRecord) -> Result<Columns, String> {
  let find = |wanted: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(wanted));
  let required = |wanted: &str| find(wanted).ok_or_else(|| format!("Missing required column '{}'.", wanted));
  Ok(Columns {
    name: required("name")?,
    sku: find("sku"),
    category: find("category"),
    price: required("price")?,
    stock: required("stock")?,
  })
}

fn optional_field(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
  idx
    .and_then(|i| record.get(i))
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
}

fn parse_row(record: &csv::StringRecord, cols: &Columns) -> Result<NewProduct, String> {
  let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

  let name = field(cols.name);
  if name.is_empty() {
    return Err("Product name is required.".to_string());
  }
  let price = Decimal::from_str(field(cols.price))
    .map_err(|_| format!("Price '{}' is not a number.", field(cols.price)))?;
  if price.is_sign_negative() {
    return Err("Price cannot be negative.".to_string());
  }
  let stock = field(cols.stock)
    .parse::<u32>()
    .map_err(|_| format!("Stock '{}' is not a whole number.", field(cols.stock)))?;

  Ok(NewProduct {
    name: name.to_string(),
    sku: optional_field(record, cols.sku),
    category: optional_field(record, cols.category),
    price,
    stock,
  })
}

/// Reads a product import file and validates every row. Blank lines are
/// skipped. Never fails as a whole: problems are reported per line.
#[instrument(skip(csv_text), fields(bytes = csv_text.len()))]
pub fn parse_product_import(csv_text: &str) -> ImportPreview {
  let mut preview = ImportPreview::default();
  let mut reader = csv::ReaderBuilder::new()
    .flexible(true)
    .trim(csv::Trim::All)
    .from_reader(csv_text.as_bytes());

  let columns = match reader.headers().map_err(|e| e.to_string()).and_then(locate_columns) {
    Ok(columns) => columns,
    Err(message) => {
      preview.issues.push(ImportIssue { line: 1, message });
      return preview;
    }
  };

  for record in reader.records() {
    let record = match record {
      Ok(record) => record,
      Err(e) => {
        let line = e.position().map_or(0, |p| p.line());
        preview.issues.push(ImportIssue {
          line,
          message: e.to_string(),
        });
        continue;
      }
    };
    let line = record.position().map_or(0, |p| p.line());
    if record.iter().all(|v| v.is_empty()) {
      continue;
    }
    match parse_row(&record, &columns) {
      Ok(product) => preview.rows.push(ImportRow { line, product }),
      Err(message) => preview.issues.push(ImportIssue { line, message }),
    }
  }

  event!(
    Level::DEBUG,
    rows = preview.rows.len(),
    issues = preview.issues.len(),
    "Product import parsed."
  );
  preview
}
