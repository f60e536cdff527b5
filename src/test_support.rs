use crate::config::Config;
use crate::context::RunContext;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A project directory and a framework directory on disk.
pub(crate) struct Fixture {
    pub(crate) project: TempDir,
    pub(crate) framework: TempDir,
    pub(crate) config: Config,
}

impl Fixture {
    /// Empty project and framework directories with default config.
    pub(crate) fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            framework: TempDir::new().unwrap(),
            config: Config::default(),
        }
    }

    /// A project with a minimal context file.
    pub(crate) fn with_context() -> Self {
        let fixture = Self::new();
        fixture.project_file("prompts/main.md", "# World\n");
        fixture
    }

    pub(crate) fn project_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(self.project.path(), rel, content)
    }

    pub(crate) fn framework_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(self.framework.path(), rel, content)
    }

    pub(crate) fn template(&self, name: &str, content: &str) -> PathBuf {
        self.framework_file(&format!("tpl/{}.md", name), content)
    }

    pub(crate) fn ctx(&self) -> RunContext {
        RunContext::new(
            self.project.path(),
            self.framework.path(),
            self.config.clone(),
        )
    }
}

fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
