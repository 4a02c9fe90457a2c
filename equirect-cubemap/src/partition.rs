/// Splitting of the combined (face, row) index space into contiguous work blocks.
use std::ops::Range;

/// Half-open range [start, end) over the flattened index k = face * edge + row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

impl Block {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Lazy, restartable sequence of blocks covering [0, range) exactly once.
/// Cloning yields an iterator that replays the same blocks from its current position.
#[derive(Debug, Clone)]
pub struct Blocks {
    range: usize,
    block_size: usize,
    remaining: usize,
    next_start: usize,
}

impl Iterator for Blocks {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.remaining == 0 || self.next_start >= self.range {
            return None;
        }

        let start = self.next_start;
        // The last block absorbs the integer-division remainder.
        let end = if self.remaining == 1 || start + 2 * self.block_size > self.range {
            self.range
        } else {
            start + self.block_size
        };

        self.next_start = end;
        self.remaining -= 1;
        Some(Block { start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next_start >= self.range {
            (0, Some(0))
        } else {
            (1, Some(self.remaining))
        }
    }
}

/// Partition [0, range) into at most `block_count` blocks of `range / block_count` indices,
/// the final block taking whatever is left over. A zero count is treated as one.
/// An empty range yields no blocks.
pub fn partition(range: usize, block_count: usize) -> Blocks {
    let block_count = block_count.max(1).min(range.max(1));
    let block_size = (range / block_count).max(1);

    Blocks {
        range,
        block_size,
        remaining: block_count,
        next_start: 0,
    }
}
