// ==========================================
// 实验室库存管理 - 导入层
// ==========================================
// 职责: 外部数据导入,生成试剂/成员记录
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod record_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{
    CsvParser, ExcelParser, FileParser, NumberedRow, RawRow, UniversalFileParser,
};
pub use record_importer::{ImportReport, RecordImporter, RowRejection};
