use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Success,
    Info,
    Error,
}

/// Transient status message shown at the bottom of a screen.
#[derive(Debug, Clone)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
    pub created_at: Instant,
    pub displayed_at: Option<Instant>,
    pub duration: Duration,
}

impl Banner {
    #[must_use]
    pub fn new(level: BannerLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
            displayed_at: None,
            duration: Duration::from_secs(4),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(BannerLevel::Success, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(BannerLevel::Info, message)
    }

    /// Errors stay up twice as long.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(BannerLevel::Error, message).with_duration(Duration::from_secs(8))
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}
