//! 惰性序列流水线：以集合、字面值、生成函数或文本文件构造[`Seq`]，
//! 经过零个或多个惰性中间操作组合，最终由一次终端操作驱动单遍求值。
//!
//! ```
//! use rseq::Seq;
//!
//! let total = Seq::of(["one", "two", "three", "four", "five"]).map(|word| word.len()).sum();
//! assert_eq!(Ok(19), total);
//! ```

pub use crate::err::{ErrKind, SeqErr};
pub use crate::group::GroupMap;
pub use crate::seq::{IntoIter, Seq};

mod collect;
mod err;
mod group;
mod seq;
mod source;

/// 整数类型
pub type Integer = i64;

/// 终端操作的统一结果类型
pub type SeqRes<T> = Result<T, SeqErr>;
