use diesel::prelude::*;

use crate::{
    domain::customer::{
        ContactDetail, Customer as DomainCustomer, CustomerIdentity, CustomerType,
        NewCustomer as DomainNewCustomer, name_key,
    },
    domain::membership::{
        Member, Membership as DomainMembership, NewMembership as DomainNewMembership,
    },
    models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer},
    models::membership::{Membership as DbMembership, NewMembership as DbNewMembership},
    repository::{
        CustomerReader, CustomerWriter, DieselRepository, RepositoryError, RepositoryResult,
    },
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn find_matching_customer(
        &self,
        identity: &CustomerIdentity,
    ) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let mut query = customers::table
            .filter(customers::name_key.eq(name_key(&identity.name)))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(email) = identity.email.as_deref() {
            query = query.filter(customers::email.eq(email));
        }

        let candidates = query
            .order(customers::id.desc())
            .load::<DbCustomer>(&mut conn)?;

        // Newest member first, otherwise the newest customer.
        let position = candidates
            .iter()
            .position(|customer| customer.customer_type == CustomerType::Member.as_str())
            .unwrap_or(0);

        Ok(candidates.into_iter().nth(position).map(Into::into))
    }

    fn find_members_by_name(&self, name: &str) -> RepositoryResult<Vec<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let members = customers::table
            .filter(customers::name_key.eq(name_key(name)))
            .filter(customers::customer_type.eq(CustomerType::Member.as_str()))
            .order(customers::id.desc())
            .load::<DbCustomer>(&mut conn)?;

        Ok(members.into_iter().map(Into::into).collect())
    }

    fn find_member_by_contact(
        &self,
        name: &str,
        contact: &ContactDetail,
    ) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let mut query = customers::table
            .filter(customers::name_key.eq(name_key(name)))
            .filter(customers::customer_type.eq(CustomerType::Member.as_str()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        query = match contact {
            ContactDetail::Email(email) => query.filter(customers::email.eq(email.as_str())),
            ContactDetail::Phone(phone) => query.filter(customers::phone.eq(phone.as_str())),
        };

        let member = query
            .order(customers::id.desc())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(member.map(Into::into))
    }

    fn get_membership(&self, customer_id: i32) -> RepositoryResult<Option<DomainMembership>> {
        use crate::schema::memberships;

        let mut conn = self.conn()?;
        let membership = memberships::table
            .filter(memberships::customer_id.eq(customer_id))
            .first::<DbMembership>(&mut conn)
            .optional()?;

        Ok(membership.map(Into::into))
    }

    fn get_member_by_email(&self, email: &str) -> RepositoryResult<Option<Member>> {
        use crate::schema::{customers, memberships};

        let mut conn = self.conn()?;
        let row = customers::table
            .inner_join(memberships::table)
            .filter(customers::email.eq(email.trim().to_lowercase()))
            .filter(customers::customer_type.eq(CustomerType::Member.as_str()))
            .order(customers::id.desc())
            .select((DbCustomer::as_select(), DbMembership::as_select()))
            .first::<(DbCustomer, DbMembership)>(&mut conn)
            .optional()?;

        Ok(row.map(|(customer, membership)| Member {
            customer: customer.into(),
            membership: membership.into(),
        }))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(
        &self,
        new_customer: &DomainNewCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(customers::table)
            .values(&DbNewCustomer::from_domain(new_customer, CustomerType::Regular))
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(created.into())
    }

    fn create_member(
        &self,
        new_customer: &DomainNewCustomer,
        new_membership: &DomainNewMembership,
    ) -> RepositoryResult<Member> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        conn.transaction::<Member, RepositoryError, _>(|conn| {
            let customer = diesel::insert_into(customers::table)
                .values(&DbNewCustomer::from_domain(new_customer, CustomerType::Member))
                .get_result::<DbCustomer>(conn)?;

            let membership = insert_membership(conn, customer.id, new_membership)?;

            Ok(Member {
                customer: customer.into(),
                membership: membership.into(),
            })
        })
    }

    fn create_membership(
        &self,
        customer_id: i32,
        new_membership: &DomainNewMembership,
    ) -> RepositoryResult<Member> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        conn.transaction::<Member, RepositoryError, _>(|conn| {
            let customer = diesel::update(customers::table.filter(customers::id.eq(customer_id)))
                .set(customers::customer_type.eq(CustomerType::Member.as_str()))
                .get_result::<DbCustomer>(conn)?;

            let membership = insert_membership(conn, customer.id, new_membership)?;

            Ok(Member {
                customer: customer.into(),
                membership: membership.into(),
            })
        })
    }
}

fn insert_membership(
    conn: &mut SqliteConnection,
    customer_id: i32,
    new_membership: &DomainNewMembership,
) -> RepositoryResult<DbMembership> {
    use crate::schema::memberships;

    let membership = diesel::insert_into(memberships::table)
        .values(&DbNewMembership::from_domain(customer_id, new_membership))
        .get_result::<DbMembership>(conn)?;

    Ok(membership)
}
