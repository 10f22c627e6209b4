//! Quotation repository
//!
//! Persists the quotation aggregate across three tables: `quotations`,
//! `quotation_items`, and `calculation_steps`. Inserts run in a single
//! transaction - a quotation with partial children is an integrity
//! violation the read side cannot detect, so either every row commits or
//! none does.
//!
//! Queries are runtime-bound so the crate builds without a live schema;
//! row structs map columns by name via `FromRow`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use domain_quotation::{CustomerResponse, Quotation};

use crate::error::DatabaseError;

/// Repository for quotation aggregates
#[derive(Debug, Clone)]
pub struct QuotationRepository {
    pool: PgPool,
}

impl QuotationRepository {
    /// Creates a new repository over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Next quote sequence number for the given quote date
    pub async fn next_sequence(&self, quote_date: NaiveDate) -> Result<u64, DatabaseError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM quotations WHERE quote_date = $1")
            .bind(quote_date)
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("n")?;
        Ok(count as u64 + 1)
    }

    /// Inserts a quotation with all of its children atomically
    pub async fn insert(&self, quotation: &Quotation) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quotations (
                id, quote_code, request_id, customer_id, employee_id,
                service_type, quote_status,
                base_price, total_surcharges, total_discounts,
                subtotal, tax_amount, final_amount, currency,
                quote_date, valid_until, service_input_data,
                is_price_overridden, override_reason, original_calculated_price,
                customer_response, customer_response_at, customer_notes,
                sent_at, order_id, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27
            )
            "#,
        )
        .bind(*quotation.id().as_uuid())
        .bind(quotation.quote_code())
        .bind(*quotation.request_id().as_uuid())
        .bind(*quotation.customer_id().as_uuid())
        .bind(quotation.employee_id().map(|id| *id.as_uuid()))
        .bind(quotation.service_type().to_string())
        .bind(quotation.status().to_string())
        .bind(quotation.base_price().amount())
        .bind(quotation.total_surcharges().amount())
        .bind(quotation.total_discounts().amount())
        .bind(quotation.subtotal().amount())
        .bind(quotation.tax_amount().amount())
        .bind(quotation.final_amount().amount())
        .bind(quotation.currency().code())
        .bind(quotation.validity().issued_on)
        .bind(quotation.validity().expires_on)
        .bind(quotation.service_input().to_string())
        .bind(quotation.is_price_overridden())
        .bind(quotation.override_reason())
        .bind(quotation.original_calculated_price().map(|m| m.amount()))
        .bind(quotation.customer_response().map(response_tag))
        .bind(quotation.customer_response_at())
        .bind(quotation.customer_notes())
        .bind(quotation.sent_at())
        .bind(quotation.order_id().map(|id| *id.as_uuid()))
        .bind(quotation.created_at())
        .bind(quotation.updated_at())
        .execute(&mut *tx)
        .await?;

        for item in quotation.items() {
            sqlx::query(
                r#"
                INSERT INTO quotation_items (
                    quotation_id, item_category, item_name, description,
                    quantity, unit_price, total_price, display_order, is_internal_only
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(*quotation.id().as_uuid())
            .bind(item.category.to_string())
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price.map(|m| m.amount()))
            .bind(item.total.amount())
            .bind(item.display_order as i32)
            .bind(true)
            .execute(&mut *tx)
            .await?;
        }

        for step in quotation.steps() {
            sqlx::query(
                r#"
                INSERT INTO calculation_steps (
                    quotation_id, calculation_step, component_name, formula_used,
                    input_values, base_value, rate_applied, multiplier,
                    calculated_value, calculation_notes, step_order
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(*quotation.id().as_uuid())
            .bind(&step.step)
            .bind(&step.component)
            .bind(&step.formula)
            .bind(step.inputs.to_string())
            .bind(step.base_value)
            .bind(step.rate_applied)
            .bind(step.multiplier)
            .bind(step.computed.amount())
            .bind(step.notes.as_deref())
            .bind(step.step_order as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(quote_code = quotation.quote_code(), "quotation persisted");
        Ok(())
    }

    /// Loads a quotation with its children, ordered for display and audit
    pub async fn find_by_id(&self, id: Uuid) -> Result<QuotationRecord, DatabaseError> {
        let quotation = sqlx::query_as::<_, QuotationRow>(
            r#"
            SELECT
                id, quote_code, request_id, customer_id, employee_id,
                service_type, quote_status,
                base_price, total_surcharges, total_discounts,
                subtotal, tax_amount, final_amount, currency,
                quote_date, valid_until, service_input_data,
                is_price_overridden, override_reason, original_calculated_price,
                customer_response, customer_response_at, customer_notes,
                sent_at, order_id, created_at, updated_at
            FROM quotations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Quotation", id))?;

        let items = sqlx::query_as::<_, QuotationItemRow>(
            r#"
            SELECT
                quotation_id, item_category, item_name, description,
                quantity, unit_price, total_price, display_order, is_internal_only
            FROM quotation_items
            WHERE quotation_id = $1
            ORDER BY display_order
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let steps = sqlx::query_as::<_, CalculationStepRow>(
            r#"
            SELECT
                quotation_id, calculation_step, component_name, formula_used,
                input_values, base_value, rate_applied, multiplier,
                calculated_value, calculation_notes, step_order
            FROM calculation_steps
            WHERE quotation_id = $1
            ORDER BY step_order
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(QuotationRecord {
            quotation,
            items,
            steps,
        })
    }

    /// All quotations belonging to a customer, newest first
    pub async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<QuotationRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, QuotationRow>(
            r#"
            SELECT
                id, quote_code, request_id, customer_id, employee_id,
                service_type, quote_status,
                base_price, total_surcharges, total_discounts,
                subtotal, tax_amount, final_amount, currency,
                quote_date, valid_until, service_input_data,
                is_price_overridden, override_reason, original_calculated_price,
                customer_response, customer_response_at, customer_notes,
                sent_at, order_id, created_at, updated_at
            FROM quotations
            WHERE customer_id = $1
            ORDER BY quote_date DESC, created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Persists the mutable disposition fields after a lifecycle transition
    ///
    /// Totals and children are frozen at insert time and never updated;
    /// only status, response, override audit, and timestamps may change.
    pub async fn save_disposition(&self, quotation: &Quotation) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE quotations SET
                quote_status = $2,
                final_amount = $3,
                is_price_overridden = $4,
                override_reason = $5,
                original_calculated_price = $6,
                customer_response = $7,
                customer_response_at = $8,
                customer_notes = $9,
                sent_at = $10,
                order_id = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(*quotation.id().as_uuid())
        .bind(quotation.status().to_string())
        .bind(quotation.final_amount().amount())
        .bind(quotation.is_price_overridden())
        .bind(quotation.override_reason())
        .bind(quotation.original_calculated_price().map(|m| m.amount()))
        .bind(quotation.customer_response().map(response_tag))
        .bind(quotation.customer_response_at())
        .bind(quotation.customer_notes())
        .bind(quotation.sent_at())
        .bind(quotation.order_id().map(|id| *id.as_uuid()))
        .bind(quotation.updated_at())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Quotation", quotation.id()));
        }

        Ok(())
    }
}

fn response_tag(response: CustomerResponse) -> &'static str {
    match response {
        CustomerResponse::Accepted => "ACCEPTED",
        CustomerResponse::Rejected => "REJECTED",
    }
}

/// Database row for a quotation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuotationRow {
    pub id: Uuid,
    pub quote_code: String,
    pub request_id: Uuid,
    pub customer_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub service_type: String,
    pub quote_status: String,
    pub base_price: Decimal,
    pub total_surcharges: Decimal,
    pub total_discounts: Decimal,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub final_amount: Decimal,
    pub currency: String,
    pub quote_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub service_input_data: String,
    pub is_price_overridden: bool,
    pub override_reason: Option<String>,
    pub original_calculated_price: Option<Decimal>,
    pub customer_response: Option<String>,
    pub customer_response_at: Option<DateTime<Utc>>,
    pub customer_notes: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub order_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for a breakdown item
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuotationItemRow {
    pub quotation_id: Uuid,
    pub item_category: String,
    pub item_name: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    pub total_price: Decimal,
    pub display_order: i32,
    pub is_internal_only: bool,
}

/// Database row for an audit step
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CalculationStepRow {
    pub quotation_id: Uuid,
    pub calculation_step: String,
    pub component_name: String,
    pub formula_used: String,
    pub input_values: String,
    pub base_value: Option<Decimal>,
    pub rate_applied: Option<Decimal>,
    pub multiplier: Option<Decimal>,
    pub calculated_value: Decimal,
    pub calculation_notes: Option<String>,
    pub step_order: i32,
}

/// A quotation with its ordered children
#[derive(Debug, Clone)]
pub struct QuotationRecord {
    pub quotation: QuotationRow,
    pub items: Vec<QuotationItemRow>,
    pub steps: Vec<CalculationStepRow>,
}
