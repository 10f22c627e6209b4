//! Order repository
//!
//! Orders are 1:1 with quotations, enforced by a unique index on
//! `orders.quotation_id` and an `ON CONFLICT DO NOTHING` insert. Under
//! concurrent accept calls for the same quotation, exactly one insert wins
//! and the loser gets a clean [`DatabaseError::DuplicateOrder`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use domain_quotation::Order;

use crate::error::DatabaseError;

/// Repository for materialized orders
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Creates a new repository over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an order and its copied items, guarding the 1:1 constraint
    ///
    /// The order row is a conditional insert keyed by quotation id; when it
    /// does not win, the whole transaction rolls back and no item rows
    /// survive.
    pub async fn insert(&self, order: &Order) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_code, quotation_id, customer_id, employee_id,
                service_type, order_status,
                base_price, total_surcharges, total_discounts,
                subtotal, tax_amount, final_amount, currency,
                service_data, order_date, customer_notes,
                confirmed_at, completed_at, cancelled_at, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21
            )
            ON CONFLICT (quotation_id) DO NOTHING
            "#,
        )
        .bind(*order.id().as_uuid())
        .bind(order.order_code())
        .bind(*order.quotation_id().as_uuid())
        .bind(*order.customer_id().as_uuid())
        .bind(order.employee_id().map(|id| *id.as_uuid()))
        .bind(order.service_type().to_string())
        .bind(order.status().to_string())
        .bind(order.base_price().amount())
        .bind(order.total_surcharges().amount())
        .bind(order.total_discounts().amount())
        .bind(order.subtotal().amount())
        .bind(order.tax_amount().amount())
        .bind(order.final_amount().amount())
        .bind(order.currency().code())
        .bind(order.service_data().to_string())
        .bind(order.order_date())
        .bind(order.customer_notes())
        .bind(order.confirmed_at())
        .bind(order.completed_at())
        .bind(order.cancelled_at())
        .bind(order.created_at())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DatabaseError::DuplicateOrder(*order.quotation_id().as_uuid()));
        }

        for item in order.items() {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    order_id, item_category, item_name, description,
                    quantity, unit_price, total_price, display_order
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(*order.id().as_uuid())
            .bind(item.category.to_string())
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price.map(|m| m.amount()))
            .bind(item.total.amount())
            .bind(item.display_order as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(order_code = order.order_code(), "order persisted");
        Ok(())
    }

    /// Loads an order row by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<OrderRow, DatabaseError> {
        sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                id, order_code, quotation_id, customer_id, employee_id,
                service_type, order_status,
                base_price, total_surcharges, total_discounts,
                subtotal, tax_amount, final_amount, currency,
                service_data, order_date, customer_notes,
                confirmed_at, completed_at, cancelled_at, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Order", id))
    }

    /// The order materialized from a quotation, if one exists
    pub async fn find_by_quotation(&self, quotation_id: Uuid) -> Result<Option<OrderRow>, DatabaseError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                id, order_code, quotation_id, customer_id, employee_id,
                service_type, order_status,
                base_price, total_surcharges, total_discounts,
                subtotal, tax_amount, final_amount, currency,
                service_data, order_date, customer_notes,
                confirmed_at, completed_at, cancelled_at, created_at
            FROM orders
            WHERE quotation_id = $1
            "#,
        )
        .bind(quotation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// All orders for a customer, newest first
    pub async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<OrderRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                id, order_code, quotation_id, customer_id, employee_id,
                service_type, order_status,
                base_price, total_surcharges, total_discounts,
                subtotal, tax_amount, final_amount, currency,
                service_data, order_date, customer_notes,
                confirmed_at, completed_at, cancelled_at, created_at
            FROM orders
            WHERE customer_id = $1
            ORDER BY order_date DESC, created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Persists a fulfilment status change
    pub async fn save_status(&self, order: &Order) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET
                order_status = $2,
                confirmed_at = $3,
                completed_at = $4,
                cancelled_at = $5
            WHERE id = $1
            "#,
        )
        .bind(*order.id().as_uuid())
        .bind(order.status().to_string())
        .bind(order.confirmed_at())
        .bind(order.completed_at())
        .bind(order.cancelled_at())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Order", order.id()));
        }

        Ok(())
    }
}

/// Database row for an order
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub order_code: String,
    pub quotation_id: Uuid,
    pub customer_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub service_type: String,
    pub order_status: String,
    pub base_price: Decimal,
    pub total_surcharges: Decimal,
    pub total_discounts: Decimal,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub final_amount: Decimal,
    pub currency: String,
    pub service_data: String,
    pub order_date: NaiveDate,
    pub customer_notes: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
