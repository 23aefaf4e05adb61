use diesel::prelude::*;

use crate::{
    domain::order::{
        NewOrder as DomainNewOrder, Order as DomainOrder, OrderListItem, OrderListQuery,
    },
    models::order::{
        NewOrder as DbNewOrder, NewOrderLine as DbNewOrderLine, Order as DbOrder,
        OrderLine as DbOrderLine,
    },
    repository::{DieselRepository, OrderReader, OrderWriter, RepositoryError, RepositoryResult},
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = load_lines(&mut conn, order.id)?;

        Ok(Some(DomainOrder::from((order, lines))))
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<OrderListItem>)> {
        use crate::schema::{customers, orders};

        let mut conn = self.conn()?;

        let OrderListQuery {
            customer_id,
            pagination,
        } = query;

        let mut count_query = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(customer) = customer_id {
            count_query = count_query.filter(orders::customer_id.eq(customer));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = orders::table
            .inner_join(customers::table)
            .select((DbOrder::as_select(), customers::name))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(customer) = customer_id {
            items = items.filter(orders::customer_id.eq(customer));
        }

        items = items.order((orders::ordered_at.desc(), orders::id.desc()));

        if let Some(pagination) = pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<(DbOrder, String)>(&mut conn)?;

        let orders = rows
            .into_iter()
            .map(|(order, customer_name)| order.into_list_item(customer_name))
            .collect();

        Ok((total, orders))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_lines, orders};

        if new_order.lines.is_empty() {
            return Err(RepositoryError::ConstraintViolation(
                "an order must have at least one line".to_string(),
            ));
        }

        let lines_total: i64 = new_order
            .lines
            .iter()
            .map(|line| line.line_amount_cents)
            .sum();
        if lines_total != new_order.total_cents {
            return Err(RepositoryError::ConstraintViolation(format!(
                "order total {} does not match line amounts {lines_total}",
                new_order.total_cents
            )));
        }

        let mut conn = self.conn()?;

        // Availability and price checks run under the same write lock as the
        // inserts, so the snapshot matches the catalog at commit time.
        conn.immediate_transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(orders::table)
                .values(&DbNewOrder::from(new_order))
                .get_result::<DbOrder>(conn)?;

            let order_id = created.id;

            for line in &new_order.lines {
                ensure_price_current(conn, line.product_id, line.unit_price_cents)?;
            }

            let payload: Vec<DbNewOrderLine> = new_order
                .lines
                .iter()
                .map(|line| DbNewOrderLine::from_domain(order_id, line))
                .collect();

            diesel::insert_into(order_lines::table)
                .values(&payload)
                .execute(conn)?;

            let lines = load_lines(conn, order_id)?;

            Ok(DomainOrder::from((created, lines)))
        })
    }
}

fn ensure_price_current(
    conn: &mut SqliteConnection,
    product_id: i32,
    expected_cents: i64,
) -> RepositoryResult<()> {
    use crate::schema::products;

    let current_cents = products::table
        .filter(products::id.eq(product_id))
        .filter(products::is_active.eq(true))
        .select(products::price_cents)
        .first::<i64>(conn)
        .optional()?
        .ok_or(RepositoryError::ProductUnavailable(product_id))?;

    if current_cents != expected_cents {
        return Err(RepositoryError::PriceChanged {
            product_id,
            expected_cents,
            current_cents,
        });
    }

    Ok(())
}

fn load_lines(
    conn: &mut SqliteConnection,
    order_id: i32,
) -> RepositoryResult<Vec<(DbOrderLine, String)>> {
    use crate::schema::{order_lines, products};

    let lines = order_lines::table
        .inner_join(products::table)
        .filter(order_lines::order_id.eq(order_id))
        .order(order_lines::id.asc())
        .select((DbOrderLine::as_select(), products::name))
        .load::<(DbOrderLine, String)>(conn)?;

    Ok(lines)
}
