use anyhow::{Result, anyhow};
use std::future::Future;
use std::time::Duration;

/// 通用重试逻辑。`max_attempts`为总尝试次数，小于1时按1处理；
/// `attempt_timeout`限制每一次尝试，超时与其他错误一样参与重试
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    retry_delay_ms: u64,
    attempt_timeout: Duration,
    label: &str,
    operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        let outcome = match tokio::time::timeout(attempt_timeout, operation()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(anyhow!("timed out after {}s", attempt_timeout.as_secs())),
        };

        match outcome {
            Ok(result) => return Ok(result),
            Err(err) => {
                attempts += 1;
                if attempts >= max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    "{} call failed, retrying ({}/{}): {}",
                    label,
                    attempts,
                    max_attempts,
                    err
                );
                // 线性退避
                let delay = retry_delay_ms.saturating_mul(attempts as u64);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }
    }
}
