use crate::domain::WriteProgress;

/// Something that can report its own progress without being disturbed.
pub trait SelfWatch: Send + Sync {
    fn progress(&self) -> WriteProgress;

    /// Human-readable status line for invocation logs.
    fn status(&self) -> String {
        self.progress().to_string()
    }
}
