//! Staff profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::StaffProfile;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub account_id: i64,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub department: String,
    pub position: String,
    pub hire_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StaffProfile {
    fn from(model: Model) -> Self {
        StaffProfile {
            id: model.id,
            account_id: model.account_id,
            employee_id: model.employee_id,
            department: model.department,
            position: model.position,
            hire_date: model.hire_date,
        }
    }
}
