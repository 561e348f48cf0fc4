/// 只进不退的游标：位置 + 剩余长度视图，永不复制输入缓冲区。
/// Every slice handed out borrows the original input.
pub struct Cursor<'a> {
    input: &'a [u8],
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    #[inline(always)]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    #[inline(always)]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    #[inline(always)]
    pub fn remaining(&self) -> &'a [u8] {
        if self.pos >= self.input.len() {
            &[]
        } else {
            &self.input[self.pos..]
        }
    }

    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// 极速跳过空白字符
    pub fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b' ' | b'\n' | b'\t' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    /// 尝试匹配前缀，如果不匹配则不移动游标
    pub fn matches(&self, pattern: &[u8]) -> bool {
        self.remaining().starts_with(pattern)
    }
}
