//! Guest profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{GuestProfile, Preferences};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guest_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub account_id: i64,
    pub nationality: String,
    pub passport_number: String,
    pub id_number: String,
    pub date_of_birth: Option<Date>,
    #[sea_orm(column_type = "JsonBinary")]
    pub preferences: Json,
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

impl From<Model> for GuestProfile {
    fn from(model: Model) -> Self {
        // Anything but a JSON object is treated as "no preferences"
        let preferences = match model.preferences {
            Json::Object(map) => map,
            _ => Preferences::new(),
        };

        GuestProfile {
            id: model.id,
            account_id: model.account_id,
            nationality: model.nationality,
            passport_number: model.passport_number,
            id_number: model.id_number,
            date_of_birth: model.date_of_birth,
            preferences,
        }
    }
}
