/// Ordered candidate stream URLs with a cursor that only moves forward
/// during a fallback cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointList {
    urls: Vec<String>,
    current: usize,
}

impl EndpointList {
    /// Returns `None` when `urls` is empty.
    pub fn new(urls: Vec<String>) -> Option<Self> {
        if urls.is_empty() {
            return None;
        }
        Some(Self { urls, current: 0 })
    }

    pub fn current(&self) -> &str {
        &self.urls[self.current]
    }

    pub fn primary(&self) -> &str {
        &self.urls[0]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn remaining(&self) -> usize {
        self.urls.len() - self.current - 1
    }

    /// Moves to the next candidate, or returns `None` once exhausted.
    pub fn advance(&mut self) -> Option<&str> {
        if self.current + 1 >= self.urls.len() {
            return None;
        }
        self.current += 1;
        Some(&self.urls[self.current])
    }

    pub fn reset(&mut self) -> &str {
        self.current = 0;
        self.primary()
    }
}
