use thiserror::Error;

/// 流水线错误，按用法、数据、输入三类划分，参见[`SeqErr::kind`]。
#[derive(Error, Debug, Eq, PartialEq)]
pub enum SeqErr {
    /// 流水线已被某次终端操作消费，无法再次消费。
    #[error("[Usage] Seq already consumed by a terminal operation")]
    Consumed,

    /// 整数范围的步长为0。
    #[error("[Usage] Range step must not be zero")]
    ZeroStep,

    /// 收集为映射时键冲突且未指定合并策略。
    #[error("[Data] Duplicate key {key} when collecting to a map")]
    DuplicateKey { key: String },

    #[error("[Input] Open file `{file}` error: {err}")]
    OpenFileErr { file: String, err: String },

    #[error("[Input] Read line {line_no} of file `{file}` error: {err}")]
    ReadLineErr { file: String, line_no: usize, err: String },
}

/// 错误类别。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrKind {
    /// 用法错误：重复消费、非法参数。
    Usage,
    /// 数据错误：收集时的键冲突。
    Data,
    /// 输入错误：文件打开或读取失败。
    Io,
}

impl SeqErr {
    pub fn kind(&self) -> ErrKind {
        match self {
            SeqErr::Consumed | SeqErr::ZeroStep => ErrKind::Usage,
            SeqErr::DuplicateKey { .. } => ErrKind::Data,
            SeqErr::OpenFileErr { .. } | SeqErr::ReadLineErr { .. } => ErrKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(ErrKind::Usage, SeqErr::Consumed.kind());
        assert_eq!(ErrKind::Usage, SeqErr::ZeroStep.kind());
        assert_eq!(ErrKind::Data, SeqErr::DuplicateKey { key: "\"k\"".to_owned() }.kind());
        assert_eq!(ErrKind::Io, SeqErr::OpenFileErr { file: "a.txt".to_owned(), err: "gone".to_owned() }.kind());
        assert_eq!(
            ErrKind::Io,
            SeqErr::ReadLineErr { file: "a.txt".to_owned(), line_no: 3, err: "bad utf-8".to_owned() }.kind()
        );
    }

    #[test]
    fn test_message_carries_category() {
        assert_eq!("[Usage] Seq already consumed by a terminal operation", SeqErr::Consumed.to_string());
        assert_eq!(
            "[Data] Duplicate key \"Sawrey\" when collecting to a map",
            SeqErr::DuplicateKey { key: "\"Sawrey\"".to_owned() }.to_string()
        );
        assert_eq!(
            "[Input] Read line 2 of file `receipt.txt` error: bad utf-8",
            SeqErr::ReadLineErr { file: "receipt.txt".to_owned(), line_no: 2, err: "bad utf-8".to_owned() }.to_string()
        );
    }
}
