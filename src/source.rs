use crate::err::SeqErr;
use crate::seq::Seq;
use crate::{Integer, SeqRes};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter;
use std::path::Path;

/* ********************************************** 数据源构造 ********************************************** */

impl<T: 'static> Seq<T> {
    /// 以任意有序集合或字面值列表作为数据源，元素按集合迭代顺序产出。
    pub fn of<I>(values: I) -> Seq<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Seq::new(values.into_iter().map(Ok))
    }

    /// 空数据源。
    pub fn empty() -> Seq<T> {
        Seq::new(iter::empty())
    }

    /// 无限重复同一个值，仅在[`Seq::limit`]约束下可收敛。
    pub fn repeat(value: T) -> Seq<T>
    where
        T: Clone,
    {
        Seq::new(iter::repeat(value).map(Ok))
    }

    /// 从种子出发按后继函数生成的无限数据源，仅在[`Seq::limit`]约束下可收敛。
    pub fn iterate(seed: T, mut f: impl FnMut(&T) -> T + 'static) -> Seq<T> {
        Seq::new(iter::successors(Some(seed), move |prev| Some(f(prev))).map(Ok))
    }
}

impl Seq<Integer> {
    /// 生成`[start, end]`闭区间内步长为1的整数，起始值大于结束值时无数据生成。
    pub fn range(start: Integer, end: Integer) -> Seq<Integer> {
        Seq::new(range_to_iter(start, end, 1).map(Ok))
    }

    /// 生成`[start, end]`闭区间内的整数。
    /// 步长为正时正序生成，为负时从区间高端逆序生成，为0时返回[`SeqErr::ZeroStep`]。
    pub fn range_step(start: Integer, end: Integer, step: Integer) -> SeqRes<Seq<Integer>> {
        if step == 0 {
            return Err(SeqErr::ZeroStep);
        }
        Ok(Seq::new(range_to_iter(start, end, step).map(Ok)))
    }
}

impl Seq<String> {
    /// 以内存文本的行作为数据源，行语义与[`str::lines`]一致：
    /// 行不含换行符，`\r\n`按`\n`处理，末尾换行不产生空行。
    pub fn from_text(text: String) -> Seq<String> {
        Seq::new(TextLines { text, pos: 0 }.map(Ok))
    }

    /// 以UTF-8文本文件的行作为数据源，按文件顺序逐行产出，行语义与[`Seq::from_text`]一致。
    /// 打开失败时立即返回[`SeqErr::OpenFileErr`]；
    /// 某行读取失败时在途产出一个[`SeqErr::ReadLineErr`]后终止；
    /// 文件句柄随流水线一同释放。
    pub fn lines(path: impl AsRef<Path>) -> SeqRes<Seq<String>> {
        let file = path.as_ref().display().to_string();
        match File::open(path.as_ref()) {
            Ok(fin) => Ok(Seq::new(LinesIter { file, lines: BufReader::new(fin).lines(), line_no: 0, done: false })),
            Err(err) => Err(SeqErr::OpenFileErr { file, err: err.to_string() }),
        }
    }
}

fn range_to_iter(start: Integer, end: Integer, step: Integer) -> Box<dyn DoubleEndedIterator<Item = Integer>> {
    let iter = RangeIter { start, end, step: step.unsigned_abs(), next: start, next_back: end, done: false };
    if step < 0 { Box::new(iter.rev()) } else { Box::new(iter) }
}

#[derive(Debug, Eq, PartialEq)]
struct RangeIter {
    start: Integer,
    end: Integer,
    /// 步长幅值，方向由迭代端决定。
    step: u64,
    next: Integer,
    next_back: Integer,
    /// 游标后继越过[`Integer`]边界时置位，此时区间已耗尽。
    done: bool,
}

impl Iterator for RangeIter {
    type Item = Integer;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.done && self.next >= self.start && self.next <= self.end && self.next <= self.next_back {
            let res = self.next;
            match res.checked_add_unsigned(self.step) {
                Some(next) => self.next = next,
                None => self.done = true,
            }
            Some(res)
        } else {
            None
        }
    }
}

impl DoubleEndedIterator for RangeIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if !self.done && self.next_back >= self.start && self.next_back <= self.end && self.next_back >= self.next {
            let res = self.next_back;
            match res.checked_sub_unsigned(self.step) {
                Some(next_back) => self.next_back = next_back,
                None => self.done = true,
            }
            Some(res)
        } else {
            None
        }
    }
}

/// 按行切分自有文本，语义与[`str::lines`]一致。
#[derive(Debug)]
struct TextLines {
    text: String,
    pos: usize,
}

impl Iterator for TextLines {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];
        let line = match rest.find('\n') {
            Some(idx) => {
                self.pos += idx + 1;
                &rest[..idx]
            }
            None => {
                self.pos = self.text.len();
                rest
            }
        };
        Some(line.strip_suffix('\r').unwrap_or(line).to_owned())
    }
}

/// 文件行数据源，读取错误只上报一次，之后终止迭代。
struct LinesIter {
    file: String,
    lines: Lines<BufReader<File>>,
    line_no: usize,
    done: bool,
}

impl Iterator for LinesIter {
    type Item = SeqRes<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.line_no += 1;
        match self.lines.next() {
            Some(Ok(line)) => Some(Ok(line)),
            Some(Err(err)) => {
                self.done = true;
                Some(Err(SeqErr::ReadLineErr { file: self.file.clone(), line_no: self.line_no, err: err.to_string() }))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
