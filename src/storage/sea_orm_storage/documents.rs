//! 提交文档存储操作

use super::SeaOrmStorage;
use crate::entity::documents::{ActiveModel, Column, Entity as Documents};
use crate::errors::{DocSystemError, Result};
use crate::models::documents::entities::SubmissionRecord;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 插入或覆盖提交记录（附件列表整体替换）
    pub async fn upsert_document_impl(&self, record: &SubmissionRecord) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let uploaded_files = serde_json::to_string(&record.uploaded_files)?;

        let model = ActiveModel {
            id_number: Set(record.id_number.clone()),
            prefix: Set(record.prefix.clone()),
            first_name: Set(record.first_name.clone()),
            last_name: Set(record.last_name.clone()),
            unit: Set(record.unit.clone()),
            officer_type: Set(record.officer_type.clone()),
            uploaded_files: Set(uploaded_files),
            updated_at: Set(now),
        };

        Documents::insert(model)
            .on_conflict(
                OnConflict::column(Column::IdNumber)
                    .update_columns([
                        Column::Prefix,
                        Column::FirstName,
                        Column::LastName,
                        Column::Unit,
                        Column::OfficerType,
                        Column::UploadedFiles,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DocSystemError::database_operation(format!("保存提交记录失败: {e}")))?;

        Ok(())
    }

    /// 通过身份证号获取提交记录
    pub async fn find_document_by_id_number_impl(
        &self,
        id_number: &str,
    ) -> Result<Option<SubmissionRecord>> {
        let result = Documents::find()
            .filter(Column::IdNumber.eq(id_number))
            .one(&self.db)
            .await
            .map_err(|e| DocSystemError::database_operation(format!("查询提交记录失败: {e}")))?;

        result.map(|m| m.into_record()).transpose()
    }
}
