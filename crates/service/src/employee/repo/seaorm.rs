use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::employee::domain::{Employee, EmployeePatch, NewEmployee, SearchFilter};
use crate::employee::repository::EmployeeRepository;
use crate::errors::StoreError;
use models::employee;

/// SeaORM-backed repository implementation.
pub struct SeaOrmEmployeeRepository {
    pub db: DatabaseConnection,
}

/// `%needle%` for LIKE, lower-cased, with LIKE metacharacters escaped.
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait::async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = employee::Entity::find()
            .order_by_desc(employee::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Employee>, StoreError> {
        let mut query = employee::Entity::find();
        if let Some(designation) = &filter.designation {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(employee::Column::Designation))).like(contains_pattern(designation)),
            );
        }
        if let Some(department) = &filter.department {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(employee::Column::Department))).like(contains_pattern(department)),
            );
        }
        let rows = query.order_by_desc(employee::Column::CreatedAt).all(&self.db).await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        let found = employee::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Employee::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        let found = employee::Entity::find()
            .filter(employee::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await?;
        Ok(found.map(Employee::from))
    }

    async fn create(&self, input: NewEmployee) -> Result<Employee, StoreError> {
        let now = Utc::now().into();
        let am = employee::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            gender: Set(input.gender),
            designation: Set(input.designation),
            department: Set(input.department),
            salary: Set(input.salary),
            date_of_joining: Set(input.date_of_joining),
            photo_url: Set(input.photo_url),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(&self.db).await?;
        Ok(created.into())
    }

    async fn update(&self, id: Uuid, patch: EmployeePatch) -> Result<Option<Employee>, StoreError> {
        let Some(found) = employee::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: employee::ActiveModel = found.into();
        if let Some(v) = patch.first_name { am.first_name = Set(v); }
        if let Some(v) = patch.last_name { am.last_name = Set(v); }
        if let Some(v) = patch.email { am.email = Set(v); }
        if let Some(v) = patch.gender { am.gender = Set(Some(v)); }
        if let Some(v) = patch.designation { am.designation = Set(v); }
        if let Some(v) = patch.department { am.department = Set(v); }
        if let Some(v) = patch.salary { am.salary = Set(v); }
        if let Some(v) = patch.date_of_joining { am.date_of_joining = Set(v); }
        if let Some(v) = patch.photo_url { am.photo_url = Set(Some(v)); }
        am.updated_at = Set(Utc::now().into());
        match am.update(&self.db).await {
            Ok(updated) => Ok(Some(updated.into())),
            // deleted between the read and the write
            Err(sea_orm::DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = employee::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
