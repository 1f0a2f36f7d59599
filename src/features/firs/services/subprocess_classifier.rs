use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::core::config::ClassifierConfig;
use crate::features::firs::models::Priority;
use crate::features::firs::services::priority_classifier::{
    ClassificationError, PriorityClassifier,
};

/// Classifier that delegates to an external scoring program.
///
/// The program is run as `<program> <args...> <description>` and must print a
/// single integer (1, 2 or 3) on stdout and exit with status 0. The category is
/// not passed on.
///
/// At most `max_concurrency` programs run at once; callers beyond that wait for
/// a slot, and the wait counts against `timeout`.
#[derive(Debug, Clone)]
pub struct SubprocessClassifier {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    slots: Arc<Semaphore>,
}

impl SubprocessClassifier {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        timeout: Duration,
        max_concurrency: usize,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
            slots: Arc::new(Semaphore::new(max_concurrency)),
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            config.timeout,
            config.max_concurrency,
        )
    }

    fn parse_output(stdout: &[u8]) -> Result<Priority, ClassificationError> {
        let text = String::from_utf8_lossy(stdout);
        let trimmed = text.trim();
        let value = match trimmed.parse::<i64>() {
            Ok(value) => value,
            // Integer text that overflows i64 is still a number, just not a tier
            Err(_) if is_integer_literal(trimmed) => {
                return Err(ClassificationError::OutOfRange(trimmed.to_string()))
            }
            Err(_) => return Err(ClassificationError::Malformed(trimmed.to_string())),
        };
        Priority::try_from(value).map_err(|v| ClassificationError::OutOfRange(v.to_string()))
    }

    async fn run(&self, description: &str) -> Result<std::process::Output, ClassificationError> {
        let _slot = self
            .slots
            .acquire()
            .await
            .map_err(|_| ClassificationError::Closed)?;

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(description)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the wait future on timeout must not leave the child running
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ClassificationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        child
            .wait_with_output()
            .await
            .map_err(ClassificationError::Wait)
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[async_trait]
impl PriorityClassifier for SubprocessClassifier {
    async fn classify(
        &self,
        _category: &str,
        description: &str,
    ) -> Result<Priority, ClassificationError> {
        let output = tokio::time::timeout(self.timeout, self.run(description))
            .await
            .map_err(|_| ClassificationError::TimedOut(self.timeout))??;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(ClassificationError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            tracing::warn!("Classifier '{}' wrote to stderr: {}", self.program, stderr);
        }

        Self::parse_output(&output.stdout)
    }

    fn name(&self) -> &'static str {
        "subprocess"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    /// Runs `sh -c <script> classifier <description>`, so the description is `$1`
    fn shell(script: &str, timeout: Duration) -> SubprocessClassifier {
        SubprocessClassifier::new(
            "sh",
            vec!["-c".to_string(), script.to_string(), "classifier".to_string()],
            timeout,
            4,
        )
    }

    fn quick(script: &str) -> SubprocessClassifier {
        shell(script, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_numeric_output_is_accepted() {
        let priority = quick("echo 2").classify("theft", "bike").await.unwrap();
        assert_eq!(priority, Priority::Medium);
    }

    #[tokio::test]
    async fn test_output_whitespace_is_trimmed() {
        let priority = quick("printf '  1 \\n\\n'").classify("", "").await.unwrap();
        assert_eq!(priority, Priority::High);
    }

    #[tokio::test]
    async fn test_description_is_passed_as_last_argument() {
        let classifier =
            quick(r#"case "$1" in *urgent*) echo 1 ;; *) echo 3 ;; esac"#);

        let urgent = classifier
            .classify("other", "an urgent matter")
            .await
            .unwrap();
        let calm = classifier.classify("other", "a calm matter").await.unwrap();

        assert_eq!(urgent, Priority::High);
        assert_eq!(calm, Priority::Low);
    }

    #[tokio::test]
    async fn test_non_numeric_output_is_an_error() {
        let err = quick("echo high").classify("", "x").await.unwrap_err();
        assert!(matches!(err, ClassificationError::Malformed(ref s) if s == "high"));

        let err = quick("true").classify("", "x").await.unwrap_err();
        assert!(matches!(err, ClassificationError::Malformed(ref s) if s.is_empty()));
    }

    #[tokio::test]
    async fn test_out_of_range_output_is_an_error() {
        let err = quick("echo 7").classify("", "x").await.unwrap_err();
        assert!(matches!(err, ClassificationError::OutOfRange(ref s) if s == "7"));

        let err = quick("echo 0").classify("", "x").await.unwrap_err();
        assert!(matches!(err, ClassificationError::OutOfRange(ref s) if s == "0"));
    }

    #[tokio::test]
    async fn test_integer_beyond_i64_is_out_of_range() {
        let err = quick("echo 99999999999999999999")
            .classify("", "x")
            .await
            .unwrap_err();
        assert!(
            matches!(err, ClassificationError::OutOfRange(ref s) if s == "99999999999999999999"),
            "{err:?}"
        );

        let err = quick("echo -99999999999999999999")
            .classify("", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, ClassificationError::OutOfRange(_)), "{err:?}");
    }

    #[test]
    fn test_parse_output_distinguishes_overflow_from_garbage() {
        assert_eq!(
            SubprocessClassifier::parse_output(b" 3\n").unwrap(),
            Priority::Low
        );
        assert!(matches!(
            SubprocessClassifier::parse_output(b"18446744073709551616"),
            Err(ClassificationError::OutOfRange(_))
        ));
        assert!(matches!(
            SubprocessClassifier::parse_output(b"-4"),
            Err(ClassificationError::OutOfRange(ref s)) if s == "-4"
        ));
        for garbage in [&b"1e30"[..], b"-", b"12abc", b"1 2"] {
            assert!(matches!(
                SubprocessClassifier::parse_output(garbage),
                Err(ClassificationError::Malformed(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_capped() {
        let classifier = SubprocessClassifier::new(
            "sh",
            vec!["-c".to_string(), "sleep 0.5; echo 1".to_string()],
            Duration::from_millis(800),
            1,
        );

        // The second call queues behind the first and runs out of time
        let (first, second) = tokio::join!(
            classifier.classify("", "a"),
            classifier.classify("", "b")
        );
        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(ClassificationError::TimedOut(_))))
                .count(),
            1
        );

        // The slot is released afterwards
        assert_eq!(classifier.classify("", "c").await.unwrap(), Priority::High);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_an_error() {
        let err = quick("echo 1; echo model missing >&2; exit 3")
            .classify("", "x")
            .await
            .unwrap_err();
        match err {
            ClassificationError::Failed { stderr, .. } => assert_eq!(stderr, "model missing"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_an_error() {
        let timeout = Duration::from_millis(200);
        let err = shell("sleep 5; echo 1", timeout)
            .classify("", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, ClassificationError::TimedOut(t) if t == timeout));
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let classifier = SubprocessClassifier::new(
            "/nonexistent/fir-classifier",
            Vec::new(),
            Duration::from_secs(1),
            1,
        );
        let err = classifier.classify("", "x").await.unwrap_err();
        assert!(matches!(err, ClassificationError::Spawn { .. }));
    }

    #[test]
    fn test_from_config() {
        let config = ClassifierConfig {
            mode: crate::core::config::ClassifierMode::Subprocess,
            program: "python".to_string(),
            args: vec!["ml_model/predict.py".to_string()],
            timeout: Duration::from_secs(10),
            max_concurrency: 2,
        };
        let classifier = SubprocessClassifier::from_config(&config);
        assert_eq!(classifier.program, "python");
        assert_eq!(classifier.args, vec!["ml_model/predict.py".to_string()]);
        assert_eq!(classifier.timeout, Duration::from_secs(10));
        assert_eq!(classifier.slots.available_permits(), 2);
        assert_eq!(classifier.name(), "subprocess");
    }
}
