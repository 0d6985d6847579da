use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use meetnotes::llm::{GenerationRequest, LlmProvider};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn run_meetnotes(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_meetnotes"))
            .args(args)
            .current_dir(self.home.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env_remove("MEETNOTES_API_KEY")
            .env_remove("GROQ_API_KEY")
            .env_remove("GEMINI_API_KEY")
            .env_remove("MEETNOTES_BIND_ADDR")
            .output()
            .expect("failed to execute meetnotes binary")
    }

    /// Write a file under the temporary HOME and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.home.path().join(name);
        std::fs::write(&path, contents).expect("write test file");
        path
    }

    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }
}

/// Prompt captured by `ScriptedProvider`.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SeenPrompt {
    pub system: String,
    pub prompt: String,
}

/// Generation backend double: replays a fixed reply (or failure) and records
/// every prompt it was given.
#[allow(dead_code)]
pub struct ScriptedProvider {
    reply: Result<String, String>,
    delay: Duration,
    pub seen: Arc<Mutex<Vec<SeenPrompt>>>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
            seen: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            delay: Duration::ZERO,
            seen: Arc::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> anyhow::Result<String> {
        self.seen.lock().unwrap().push(SeenPrompt {
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
        });
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone().map_err(|e| anyhow::anyhow!(e))
    }
}
