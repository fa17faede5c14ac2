//! 提交文档实体

use sea_orm::entity::prelude::*;

use crate::models::documents::entities::{FileRef, SubmissionRecord};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_number: String,
    pub prefix: String,
    pub first_name: String,
    pub last_name: String,
    pub unit: String,
    pub officer_type: String,
    // JSON 数组
    #[sea_orm(column_type = "Text")]
    pub uploaded_files: String,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_record(self) -> crate::errors::Result<SubmissionRecord> {
        let uploaded_files: Vec<FileRef> = serde_json::from_str(&self.uploaded_files)?;

        Ok(SubmissionRecord {
            id_number: self.id_number,
            prefix: self.prefix,
            first_name: self.first_name,
            last_name: self.last_name,
            unit: self.unit,
            officer_type: self.officer_type,
            uploaded_files,
        })
    }
}
