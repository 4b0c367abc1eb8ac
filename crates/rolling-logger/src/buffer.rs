//! In-memory ring of the most recent log lines.

use std::collections::VecDeque;

pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Split `chunk` into lines and keep the newest `capacity` of them
    pub fn push_chunk(&mut self, chunk: &str) {
        for line in chunk.lines().filter(|line| !line.trim().is_empty()) {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line.to_string());
        }
    }

    /// Up to `limit` lines, oldest first
    pub fn recent(&self, limit: usize) -> Vec<String> {
        let skip = self.lines.len().saturating_sub(limit);
        self.lines.iter().skip(skip).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_lines() {
        let mut buffer = LogBuffer::new(3);
        buffer.push_chunk("1\n2\n");
        buffer.push_chunk("3\n\n4\n");

        assert_eq!(buffer.recent(10), vec!["2", "3", "4"]);
        assert_eq!(buffer.recent(1), vec!["4"]);
        assert!(buffer.recent(0).is_empty());
    }
}
