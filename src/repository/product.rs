use diesel::prelude::*;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;
        let product = products::table
            .left_join(categories::table)
            .filter(products::id.eq(id))
            .select((DbProduct::as_select(), categories::name.nullable()))
            .first::<(DbProduct, Option<String>)>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let mut items = products::table
            .left_join(categories::table)
            .select((DbProduct::as_select(), categories::name.nullable()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items = items.filter(products::is_active.eq(true));
        }

        if let Some(category_id) = query.category_id {
            items = items.filter(products::category_id.eq(category_id));
        }

        let rows = items
            .order((categories::name.nullable().asc(), products::name.asc()))
            .load::<(DbProduct, Option<String>)>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(products::table)
            .values(&DbNewProduct::from(new_product))
            .get_result::<DbProduct>(&mut conn)?;

        let category_name = load_category_name(&mut conn, created.category_id)?;
        Ok(created.into_domain(category_name))
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set(&DbUpdateProduct::from(updates))
            .get_result::<DbProduct>(&mut conn)?;

        let category_name = load_category_name(&mut conn, updated.category_id)?;
        Ok(updated.into_domain(category_name))
    }
}

fn load_category_name(
    conn: &mut SqliteConnection,
    category_id: Option<i32>,
) -> RepositoryResult<Option<String>> {
    use crate::schema::categories;

    let Some(category_id) = category_id else {
        return Ok(None);
    };

    let name = categories::table
        .filter(categories::id.eq(category_id))
        .select(categories::name)
        .first::<String>(conn)
        .optional()?;

    Ok(name)
}
