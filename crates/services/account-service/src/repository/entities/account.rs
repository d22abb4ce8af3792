//! Account database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::AppError;
use domain::{Account, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub phone: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub profile_picture: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::staff_profile::Entity")]
    StaffProfile,
    #[sea_orm(has_one = "super::guest_profile::Entity")]
    GuestProfile,
}

impl Related<super::staff_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffProfile.def()
    }
}

impl Related<super::guest_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuestProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity. Fails only on a role name the
/// domain does not know.
impl TryFrom<Model> for Account {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role: Role = model.role.parse().map_err(|_| {
            AppError::internal(format!(
                "Account {} has unknown role '{}'",
                model.id, model.role
            ))
        })?;

        Ok(Account {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            role,
            phone: model.phone,
            address: model.address,
            profile_picture: model.profile_picture,
            is_active: model.is_active,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            date_joined: model.date_joined,
        })
    }
}
