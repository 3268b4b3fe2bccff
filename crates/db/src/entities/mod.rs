//! `SeaORM` entity definitions.

pub mod accounts;
pub mod cards;
pub mod sea_orm_active_enums;
