use diesel::prelude::*;

use crate::{
    domain::preference::{NewPreference as DomainNewPreference, Preference as DomainPreference},
    models::preference::{NewPreference as DbNewPreference, Preference as DbPreference},
    repository::{DieselRepository, PreferenceReader, PreferenceWriter, RepositoryResult},
};

impl PreferenceReader for DieselRepository {
    fn get_preference(
        &self,
        customer_id: i32,
        preference_type: &str,
    ) -> RepositoryResult<Option<DomainPreference>> {
        use crate::schema::preferences;

        let mut conn = self.conn()?;
        let preference = preferences::table
            .filter(preferences::customer_id.eq(customer_id))
            .filter(preferences::preference_type.eq(preference_type))
            .first::<DbPreference>(&mut conn)
            .optional()?;

        Ok(preference.map(Into::into))
    }

    fn list_preferences(&self, customer_id: i32) -> RepositoryResult<Vec<DomainPreference>> {
        use crate::schema::preferences;

        let mut conn = self.conn()?;
        let items = preferences::table
            .filter(preferences::customer_id.eq(customer_id))
            .order((preferences::updated_at.desc(), preferences::id.desc()))
            .load::<DbPreference>(&mut conn)?;

        Ok(items.into_iter().map(Into::into).collect())
    }
}

impl PreferenceWriter for DieselRepository {
    fn upsert_preference(
        &self,
        preference: &DomainNewPreference,
    ) -> RepositoryResult<DomainPreference> {
        use crate::schema::preferences;

        let mut conn = self.conn()?;
        let db_new = DbNewPreference::from(preference);

        let stored = diesel::insert_into(preferences::table)
            .values(&db_new)
            .on_conflict((preferences::customer_id, preferences::preference_type))
            .do_update()
            .set((
                preferences::preference_value.eq(db_new.preference_value),
                preferences::updated_at.eq(db_new.updated_at),
            ))
            .get_result::<DbPreference>(&mut conn)?;

        Ok(stored.into())
    }
}
