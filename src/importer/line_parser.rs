// ==========================================
// 排班导入系统 - 行解析器
// ==========================================
// 阶段 1: 原始文本 → (行号, 字段列表)
// 规则:
// - 按换行切分，空行/纯空白行在编号前丢弃
// - 第一条非空行为表头，不产出数据行，但占用行号 1
// - 按逗号切分，字段去除首尾空白
// - 不支持引号/转义：值中的逗号与字段分隔符无法区分（已知限制）
// ==========================================

use crate::domain::schedule::ParsedRow;
use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use tracing::{debug, warn};

/// 默认字段分隔符
pub const DEFAULT_DELIMITER: u8 = b',';

// ==========================================
// LineParser - 行解析器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct LineParser {
    delimiter: u8,
}

impl Default for LineParser {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl LineParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// 解析整段文本为数据行（不含表头）
    ///
    /// # 返回
    /// - Vec<ParsedRow>: 按原始顺序排列；空文本或仅有表头时为空
    pub fn parse(&self, content: &str) -> Vec<ParsedRow> {
        let rows: Vec<ParsedRow> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .skip(1) // 表头
            .map(|(idx, line)| ParsedRow::new(idx + 1, self.tokenize(idx + 1, line)))
            .collect();

        debug!(data_rows = rows.len(), "行解析完成");
        rows
    }

    /// 单行分词
    ///
    /// 关闭引号处理：引号按普通字符保留
    fn tokenize(&self, line_number: usize, line: &str) -> Vec<String> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .quoting(false)
            .flexible(true)
            .trim(Trim::All)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(line.as_bytes());

        let mut record = StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(true) => record.iter().map(str::to_string).collect(),
            Ok(false) => Vec::new(),
            Err(e) => {
                // 分词失败只影响本行：整行作为单个字段交给校验器产出诊断
                warn!(line_number, error = %e, "行分词失败");
                vec![line.trim().to_string()]
            }
        }
    }
}
