use std::future::Future;
use std::pin::Pin;

use super::Launcher;
use crate::error::StokeError;

/// Mock launcher for testing. Returns canned exit codes.
pub struct MockLauncher {
    codes: Vec<i32>,
    call_count: std::sync::atomic::AtomicUsize,
}

impl MockLauncher {
    pub fn new(codes: Vec<i32>) -> Self {
        Self {
            codes,
            call_count: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn fixed(code: i32) -> Self {
        Self::new(vec![code])
    }

    pub fn failing() -> Self {
        Self::new(vec![])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(std::sync::atomic::Ordering::Relaxed)
    }
}

impl Launcher for MockLauncher {
    fn launch(
        &self,
        _script: &str,
        _extra: &[String],
    ) -> Pin<Box<dyn Future<Output = Result<i32, StokeError>> + Send + '_>> {
        let idx = self
            .call_count
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        if self.codes.is_empty() {
            return Box::pin(async {
                Err(StokeError::LaunchFailed(
                    "mock launcher: no exit codes".into(),
                ))
            });
        }

        let code = self.codes[idx % self.codes.len()];
        Box::pin(async move { Ok(code) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_code() {
        let launcher = MockLauncher::fixed(137);
        assert_eq!(launcher.launch("train.py", &[]).await.unwrap(), 137);
        assert_eq!(launcher.call_count(), 1);
    }

    #[tokio::test]
    async fn cycling_codes() {
        let launcher = MockLauncher::new(vec![0, 1]);
        assert_eq!(launcher.launch("a.py", &[]).await.unwrap(), 0);
        assert_eq!(launcher.launch("b.py", &[]).await.unwrap(), 1);
        assert_eq!(launcher.launch("c.py", &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failing_launcher() {
        let launcher = MockLauncher::failing();
        assert!(launcher.launch("train.py", &[]).await.is_err());
    }
}
