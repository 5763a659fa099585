use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use infra::models::{OrderLine, OrderRow, ProductRow};
use infra::repos::{clients, orders, products, CreateOrderData, UpdateOrderData};

use crate::auth::permissions::require_owner;
use crate::gql::common::helpers::{blank_to_none, non_negative_amount, parse_id};
use crate::gql::error::{GqlError, GqlResult};
use crate::state::AppState;

use super::types::{OrderInput, OrderProductInput, OrderState};

/// A validated order line before it is matched against the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub name: Option<String>,
    pub price: Option<f64>,
}

pub fn validate_lines(lines: Vec<OrderProductInput>) -> GqlResult<Vec<LineRequest>> {
    lines
        .into_iter()
        .map(|line| {
            let id = line
                .id
                .ok_or_else(|| GqlError::validation("order.id", "every line needs a product id"))?;
            let product_id = parse_id(&id, "Product")?;

            let quantity = line
                .quantity
                .ok_or_else(|| GqlError::validation("order.quantity", "is required"))?;
            if quantity <= 0 {
                return Err(GqlError::validation("order.quantity", "must be positive"));
            }

            let price = line
                .price
                .map(|p| non_negative_amount("order.price", p))
                .transpose()?;

            Ok(LineRequest {
                product_id,
                quantity,
                name: blank_to_none(line.name),
                price,
            })
        })
        .collect()
}

/// Units requested per product. Repeated products are summed.
pub fn demand<I>(lines: I) -> GqlResult<BTreeMap<Uuid, i32>>
where
    I: IntoIterator<Item = (Uuid, i32)>,
{
    let mut totals: BTreeMap<Uuid, i32> = BTreeMap::new();
    for (product_id, quantity) in lines {
        let total = totals.entry(product_id).or_insert(0);
        *total = total
            .checked_add(quantity)
            .ok_or_else(|| GqlError::validation("order.quantity", "total quantity is too large"))?;
    }
    Ok(totals)
}

/// Snapshot each requested line against the current product rows.
pub fn build_lines(
    requests: &[LineRequest],
    catalogue: &HashMap<Uuid, ProductRow>,
) -> GqlResult<Vec<OrderLine>> {
    requests
        .iter()
        .map(|req| {
            let product = catalogue
                .get(&req.product_id)
                .ok_or_else(|| GqlError::not_found("Product", req.product_id))?;

            Ok(OrderLine {
                product_id: product.id,
                quantity: req.quantity,
                name: req.name.clone().unwrap_or_else(|| product.name.clone()),
                price: req.price.unwrap_or(product.price),
            })
        })
        .collect()
}

/// Fail when any product lacks the units requested.
///
/// `released` holds units that go back to stock in the same transaction
/// (the previous lines of an order being edited).
pub fn check_stock(
    wanted: &BTreeMap<Uuid, i32>,
    released: &BTreeMap<Uuid, i32>,
    catalogue: &HashMap<Uuid, ProductRow>,
) -> GqlResult<()> {
    for (product_id, quantity) in wanted {
        let product = catalogue
            .get(product_id)
            .ok_or_else(|| GqlError::not_found("Product", product_id))?;
        let available =
            i64::from(product.stock) + i64::from(released.get(product_id).copied().unwrap_or(0));

        if i64::from(*quantity) > available {
            return Err(GqlError::validation(
                "order",
                format!(
                    "product '{}' exceeds available stock ({} requested, {} available)",
                    product.name, quantity, available
                ),
            ));
        }
    }
    Ok(())
}

pub fn lines_total(lines: &[OrderLine]) -> f64 {
    lines
        .iter()
        .map(|line| f64::from(line.quantity) * line.price)
        .sum()
}

async fn load_owned_client(
    conn: &mut sqlx::PgConnection,
    client_id: Uuid,
    seller_id: Uuid,
) -> GqlResult<()> {
    let client = clients::get_by_id(&mut *conn, client_id)
        .await?
        .ok_or_else(|| GqlError::not_found("Client", client_id))?;

    require_owner(client.seller_id, seller_id, "client")
}

async fn lock_catalogue(
    conn: &mut sqlx::PgConnection,
    ids: Vec<Uuid>,
) -> GqlResult<HashMap<Uuid, ProductRow>> {
    let rows = products::lock_by_ids(&mut *conn, &ids).await?;
    Ok(rows.into_iter().map(|p| (p.id, p)).collect())
}

/// Apply net stock movements: positive values return units, negative values take them.
async fn apply_stock_movements(
    conn: &mut sqlx::PgConnection,
    movements: BTreeMap<Uuid, i32>,
) -> GqlResult<()> {
    for (product_id, delta) in movements {
        if delta != 0 {
            products::adjust_stock(&mut *conn, product_id, delta).await?;
        }
    }
    Ok(())
}

/// Place an order for one of the seller's clients, reserving stock.
pub async fn create_order(
    state: &AppState,
    seller_id: Uuid,
    input: OrderInput,
) -> GqlResult<OrderRow> {
    let client_id = parse_id(&input.client, "Client")?;
    let requests = validate_lines(input.order.unwrap_or_default())?;
    let supplied_total = input
        .total
        .map(|t| non_negative_amount("total", t))
        .transpose()?;

    let mut tx = state.db.begin().await?;

    load_owned_client(&mut tx, client_id, seller_id).await?;

    let wanted = demand(requests.iter().map(|r| (r.product_id, r.quantity)))?;
    let catalogue = lock_catalogue(&mut tx, wanted.keys().copied().collect()).await?;
    let lines = build_lines(&requests, &catalogue)?;
    check_stock(&wanted, &BTreeMap::new(), &catalogue)?;

    apply_stock_movements(&mut tx, wanted.iter().map(|(id, q)| (*id, -q)).collect()).await?;

    let total = supplied_total.unwrap_or_else(|| lines_total(&lines));
    let row = orders::create(
        &mut *tx,
        CreateOrderData {
            items: lines,
            total,
            client_id,
            seller_id,
            state: input.state.unwrap_or(OrderState::Pending).into(),
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(order_id = %row.id, client_id = %client_id, seller_id = %seller_id, "Order created");
    Ok(row)
}

/// Update an order. New lines replace the old ones and stock is rebalanced.
pub async fn update_order(
    state: &AppState,
    seller_id: Uuid,
    order_id: Uuid,
    input: OrderInput,
) -> GqlResult<OrderRow> {
    let client_id = parse_id(&input.client, "Client")?;
    let requests = input.order.map(validate_lines).transpose()?;
    let supplied_total = input
        .total
        .map(|t| non_negative_amount("total", t))
        .transpose()?;

    let mut tx = state.db.begin().await?;

    let existing = orders::get_by_id_for_update(&mut *tx, order_id)
        .await?
        .ok_or_else(|| GqlError::not_found("Order", order_id))?;
    require_owner(existing.seller_id, seller_id, "order")?;

    load_owned_client(&mut tx, client_id, seller_id).await?;

    let (items, total) = match requests {
        Some(requests) => {
            let released = demand(existing.items.0.iter().map(|l| (l.product_id, l.quantity)))?;
            let wanted = demand(requests.iter().map(|r| (r.product_id, r.quantity)))?;

            let ids: Vec<Uuid> = wanted.keys().chain(released.keys()).copied().collect();
            let catalogue = lock_catalogue(&mut tx, ids).await?;
            let lines = build_lines(&requests, &catalogue)?;
            check_stock(&wanted, &released, &catalogue)?;

            let mut movements = released.clone();
            for (product_id, quantity) in &wanted {
                *movements.entry(*product_id).or_insert(0) -= quantity;
            }
            // Released lines may name products deleted since; skip them
            movements.retain(|id, _| catalogue.contains_key(id));
            apply_stock_movements(&mut tx, movements).await?;

            let total = supplied_total.unwrap_or_else(|| lines_total(&lines));
            (Some(lines), Some(total))
        }
        None => (None, supplied_total),
    };

    let row = orders::update(
        &mut *tx,
        order_id,
        UpdateOrderData {
            items,
            total,
            client_id,
            state: input.state.map(Into::into),
        },
    )
    .await?
    .ok_or_else(|| GqlError::not_found("Order", order_id))?;

    tx.commit().await?;

    tracing::info!(order_id = %row.id, "Order updated");
    Ok(row)
}

pub async fn delete_order(state: &AppState, seller_id: Uuid, order_id: Uuid) -> GqlResult<()> {
    let order = orders::get_by_id(&state.db, order_id)
        .await?
        .ok_or_else(|| GqlError::not_found("Order", order_id))?;
    require_owner(order.seller_id, seller_id, "order")?;

    if !orders::delete(&state.db, order_id).await? {
        return Err(GqlError::not_found("Order", order_id));
    }

    tracing::info!(order_id = %order_id, "Order deleted");
    Ok(())
}
