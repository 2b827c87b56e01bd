// ==========================================
// 实验室库存管理 - 记录导入器
// ==========================================
// 流程: 文件解析 → 字段映射 → 汇总被拒绝的行
// 单行错误不中断整个导入，文件级错误直接返回
// ==========================================

use crate::domain::member::Member;
use crate::domain::reagent::Reagent;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{NumberedRow, RawRow, UniversalFileParser};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

/// 被拒绝的行
#[derive(Debug, Clone, Serialize)]
pub struct RowRejection {
    /// 文件中的行号（表头为第 1 行）
    pub row: usize,
    pub reason: String,
}

/// 导入结果
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RowRejection>,
}

impl<T> ImportReport<T> {
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.rejected.len()
    }
}

pub struct RecordImporter {
    parser: UniversalFileParser,
    mapper: FieldMapper,
}

impl RecordImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: FieldMapper,
        }
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_reagents<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportReport<Reagent>> {
        let rows = self.parser.parse(path.as_ref())?;
        Ok(self.map_rows(&rows, |row, n| self.mapper.map_reagent(row, n)))
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_members<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportReport<Member>> {
        let rows = self.parser.parse(path.as_ref())?;
        Ok(self.map_rows(&rows, |row, n| self.mapper.map_member(row, n)))
    }

    fn map_rows<T>(
        &self,
        rows: &[NumberedRow],
        map: impl Fn(&RawRow, usize) -> Result<T, ImportError>,
    ) -> ImportReport<T> {
        let mut records = Vec::with_capacity(rows.len());
        let mut rejected = Vec::new();

        for (row_number, row) in rows {
            let row_number = *row_number;
            match map(row, row_number) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(row = row_number, error = %e, "行被拒绝");
                    rejected.push(RowRejection {
                        row: row_number,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            imported = records.len(),
            rejected = rejected.len(),
            "导入完成"
        );

        ImportReport { records, rejected }
    }
}

impl Default for RecordImporter {
    fn default() -> Self {
        Self::new()
    }
}
