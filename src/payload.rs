//! # 载荷编解码模块
//!
//! 负责在字节载荷与位序列之间转换，并约定定界符 [`DELIMITER`]：
//! 编码时在载荷末尾追加定界符，每个字节按最高位优先展开为 8 个 bit；
//! 解码时每 8 个 bit 组成一个字节，一旦最近的 5 个字节等于定界符即停止。
//!
//! 注意：若消息本身含有 `#####`，解码会在第一次出现处截断。

use crate::constants::BITS_PER_BYTE;
use crate::error::StegoError;
use std::borrow::Cow;
use std::iter::Chain;
use std::slice;

pub use crate::constants::DELIMITER;

/// 载荷加定界符的位迭代器，每次产出 0 或 1，字节内最高位优先。
#[derive(Debug, Clone)]
pub struct PayloadBits<'a> {
    bytes: Chain<slice::Iter<'a, u8>, slice::Iter<'a, u8>>,
    current: u8,
    pending: usize,
    remaining: usize,
}

impl Iterator for PayloadBits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.pending == 0 {
            self.current = *self.bytes.next()?;
            self.pending = BITS_PER_BYTE;
        }
        self.pending -= 1;
        self.remaining -= 1;
        Some((self.current >> self.pending) & 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PayloadBits<'_> {}

/// 返回 `payload` 加定界符的位迭代器。
pub fn payload_bits(payload: &[u8]) -> PayloadBits<'_> {
    PayloadBits {
        bytes: payload.iter().chain(DELIMITER.iter()),
        current: 0,
        pending: 0,
        remaining: (payload.len() + DELIMITER.len()) * BITS_PER_BYTE,
    }
}

/// 将载荷转换为位序列 (已追加定界符)。
pub fn text_to_bits(payload: &[u8]) -> Vec<u8> {
    payload_bits(payload).collect()
}

/// 解码结果：恢复出的载荷，以及是否找到了定界符。
///
/// `found` 为 `false` 时，`payload` 只是从噪声中解出的字节，不能当作消息使用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub payload: Vec<u8>,
    pub found: bool,
}

impl Extraction {
    /// 以文本形式查看载荷，非 UTF-8 字节会被替换。
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// 仅在找到定界符时返回载荷。
    ///
    /// # Errors
    ///
    /// 未找到定界符时返回 [`StegoError::DelimiterNotFound`]。
    pub fn into_payload(self) -> Result<Vec<u8>, StegoError> {
        if self.found {
            Ok(self.payload)
        } else {
            Err(StegoError::DelimiterNotFound)
        }
    }
}

/// 增量式的位到字节解码器，逐 bit 输入并检测定界符。
#[derive(Debug, Default)]
pub struct DelimiterScanner {
    decoded: Vec<u8>,
    current: u8,
    filled: usize,
    found: bool,
}

impl DelimiterScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 输入一个 bit (只使用最低位)。当定界符刚好完整出现时返回 `true`，
    /// 此后的输入都会被忽略。
    pub fn push_bit(&mut self, bit: u8) -> bool {
        if self.found {
            return true;
        }

        self.current = (self.current << 1) | (bit & 1);
        self.filled += 1;
        if self.filled < BITS_PER_BYTE {
            return false;
        }

        self.decoded.push(self.current);
        self.current = 0;
        self.filled = 0;
        self.found = self.decoded.ends_with(DELIMITER);
        self.found
    }

    /// 已解出的完整字节数。
    pub fn bytes_decoded(&self) -> usize {
        self.decoded.len()
    }

    /// 结束解码。找到定界符时去掉末尾的定界符；不足 8 bit 的尾部被丢弃。
    pub fn finish(mut self) -> Extraction {
        if self.found {
            self.decoded.truncate(self.decoded.len() - DELIMITER.len());
        }
        Extraction {
            payload: self.decoded,
            found: self.found,
        }
    }
}

/// 将位序列还原为载荷，遇到第一个定界符即停止。
pub fn bits_to_text<I>(bits: I) -> Extraction
where
    I: IntoIterator<Item = u8>,
{
    let mut scanner = DelimiterScanner::new();
    for bit in bits {
        if scanner.push_bit(bit) {
            break;
        }
    }
    scanner.finish()
}
