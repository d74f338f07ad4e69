use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only snapshot of a blob write in flight (or finished).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteProgress {
    pub bytes_written: u64,
    pub committed: bool,
}

impl fmt::Display for WriteProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {} bytes.", self.bytes_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text() {
        let p = WriteProgress {
            bytes_written: 5,
            committed: true,
        };
        assert_eq!(p.to_string(), "Wrote 5 bytes.");
        assert_eq!(WriteProgress::default().to_string(), "Wrote 0 bytes.");
    }
}
