use diesel::prelude::*;

use crate::{
    domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory},
    models::category::{Category as DbCategory, NewCategory as DbNewCategory},
    repository::{CategoryReader, CategoryWriter, DieselRepository, RepositoryResult},
};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let category = categories::table
            .filter(categories::id.eq(id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(Into::into))
    }

    fn list_categories(&self) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let items = categories::table
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?;

        Ok(items.into_iter().map(Into::into).collect())
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, new_category: &DomainNewCategory) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(categories::table)
            .values(&DbNewCategory::from(new_category))
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }
}
