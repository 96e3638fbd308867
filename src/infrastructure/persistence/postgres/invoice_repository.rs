use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use crate::domain::invoice::{
  Invoice, InvoiceChanges, InvoiceStatus, InvoiceSummary, NewInvoice, errors::InvoiceError,
  ports::InvoiceRepository,
};

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: String,
  customer_id: String,
  amount: i64,
  status: String,
  date: NaiveDate,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    Ok(Invoice {
      id: row.id,
      customer_id: row.customer_id,
      amount: row.amount,
      status: InvoiceStatus::from_str(&row.status)?,
      date: row.date,
    })
  }
}

#[derive(Debug, FromRow)]
struct InvoiceSummaryRow {
  id: String,
  customer_name: String,
  customer_email: String,
  amount: i64,
  status: String,
  date: NaiveDate,
}

impl TryFrom<InvoiceSummaryRow> for InvoiceSummary {
  type Error = InvoiceError;

  fn try_from(row: InvoiceSummaryRow) -> Result<Self, Self::Error> {
    Ok(InvoiceSummary {
      id: row.id,
      customer_name: row.customer_name,
      customer_email: row.customer_email,
      amount: row.amount,
      status: InvoiceStatus::from_str(&row.status)?,
      date: row.date,
    })
  }
}

/// Ids cross this boundary as text and are cast to UUID in SQL, so a
/// malformed id fails the statement.
pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES (CAST($1 AS UUID), $2, $3, $4)
            RETURNING id::text AS id, customer_id::text AS customer_id, amount, status, date
            "#,
    )
    .bind(&invoice.customer_id)
    .bind(invoice.amount)
    .bind(invoice.status.as_str())
    .bind(invoice.date)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64, InvoiceError> {
    let result = sqlx::query(
      r#"
            UPDATE invoices
            SET customer_id = CAST($2 AS UUID), amount = $3, status = $4
            WHERE id = CAST($1 AS UUID)
            "#,
    )
    .bind(id)
    .bind(&changes.customer_id)
    .bind(changes.amount)
    .bind(changes.status.as_str())
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected())
  }

  async fn delete(&self, id: &str) -> Result<(), InvoiceError> {
    sqlx::query("DELETE FROM invoices WHERE id = CAST($1 AS UUID)")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }

  async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id::text AS id, customer_id::text AS customer_id, amount, status, date
            FROM invoices
            WHERE id = CAST($1 AS UUID)
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Invoice::try_from).transpose()
  }

  async fn list_summaries(&self) -> Result<Vec<InvoiceSummary>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceSummaryRow>(
      r#"
            SELECT invoices.id::text AS id,
                   customers.name AS customer_name,
                   customers.email AS customer_email,
                   invoices.amount,
                   invoices.status,
                   invoices.date
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            ORDER BY invoices.date DESC, invoices.id
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(InvoiceSummary::try_from).collect()
  }
}
