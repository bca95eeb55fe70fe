//! The Kernel (核) — the heart of deskshell.
//!
//! The Kernel owns the pieces every terminal on the desktop shares and
//! hands out [`Session`]s that borrow them:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Kernel (核)                        │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────┐  │
//! │  │  VfsEngine  │  │ ToolRegistry │  │     Gateway     │  │
//! │  │ (one tree)  │  │  (builtins)  │  │ (http/offline)  │  │
//! │  └─────────────┘  └──────────────┘  └─────────────────┘  │
//! │  ┌─────────────────────────────┐  ┌───────────────────┐  │
//! │  │ WindowManager  Clipboard    │  │    SystemInfo     │  │
//! │  └─────────────────────────────┘  └───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//!        │ open_session()            │ open_session()
//!        ▼                           ▼
//!   Session (cwd, history,      Session (cwd, history,
//!   log, input, ring)           log, input, ring)
//! ```
//!
//! Dropping the kernel (and its sessions) drops the tree.

use std::sync::Arc;

use anyhow::{Context, Result};
use deskshell_types::NodeSnapshot;

use crate::gateway::{Gateway, GatewayConfig, HttpGateway, OfflineGateway};
use crate::session::{Clipboard, MemoryClipboard, Session, SessionServices};
use crate::tools::{SystemInfo, ToolRegistry, register_builtins};
use crate::vfs::{Identity, VfsEngine, VfsPath, default_tree};
use crate::windows::{InMemoryWindows, WindowManager};

/// Configuration for kernel initialization.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Login name; owns the home directory.
    pub user: String,
    pub group: String,
    pub hostname: String,
    /// Home directory. Defaults to `/home/<user>`.
    pub home: Option<String>,
    /// Restore this tree instead of booting the default one.
    pub seed: Option<NodeSnapshot>,
    /// Talk to an HTTP gateway. `None` answers every unknown command
    /// with `command not found`.
    pub gateway: Option<GatewayConfig>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            group: "user".to_string(),
            hostname: "deskshell".to_string(),
            home: None,
            seed: None,
            gateway: None,
        }
    }
}

impl KernelConfig {
    /// Default tree, offline gateway.
    pub fn transient() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        let user = user.into();
        self.group = user.clone();
        self.user = user;
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_seed(mut self, seed: NodeSnapshot) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_gateway(mut self, gateway: GatewayConfig) -> Self {
        self.gateway = Some(gateway);
        self
    }

    fn home_path(&self) -> VfsPath {
        match &self.home {
            Some(home) => VfsPath::parse(home),
            None => VfsPath::from_segments(["home", self.user.as_str()]),
        }
    }
}

/// Shared state for every session of one desktop.
pub struct Kernel {
    services: SessionServices,
}

impl Kernel {
    /// Build a kernel: the tree, the builtin registry and the gateway.
    #[tracing::instrument(level = "info", skip_all, fields(user = %config.user, host = %config.hostname))]
    pub fn new(config: KernelConfig) -> Result<Self> {
        let identity = Identity::new(config.user.clone(), config.group.clone());
        let home = config.home_path();

        let vfs = match &config.seed {
            Some(seed) => VfsEngine::from_snapshot(seed, identity, home)
                .context("failed to restore filesystem snapshot")?,
            None => VfsEngine::new(default_tree(&identity, &config.hostname), identity, home)
                .context("failed to build default filesystem")?,
        };

        let gateway: Arc<dyn Gateway> = match config.gateway {
            Some(gateway) => {
                tracing::info!(endpoint = %gateway.endpoint, model = %gateway.model, "using http gateway");
                Arc::new(HttpGateway::new(gateway).context("failed to build gateway client")?)
            }
            None => Arc::new(OfflineGateway),
        };

        let mut tools = ToolRegistry::new();
        register_builtins(&mut tools);

        let system = SystemInfo {
            hostname: config.hostname,
            ..SystemInfo::default()
        };

        Ok(Self {
            services: SessionServices {
                vfs: Arc::new(vfs),
                tools: Arc::new(tools),
                gateway,
                system: Arc::new(system),
                windows: Arc::new(InMemoryWindows::new()),
                clipboard: Arc::new(MemoryClipboard::new()),
            },
        })
    }

    /// A kernel on the default tree with the offline gateway.
    pub fn transient() -> Result<Self> {
        Self::new(KernelConfig::transient())
    }

    /// Replace the gateway.
    pub fn with_gateway(mut self, gateway: Arc<dyn Gateway>) -> Self {
        self.services.gateway = gateway;
        self
    }

    /// Replace the window manager.
    pub fn with_windows(mut self, windows: Arc<dyn WindowManager>) -> Self {
        self.services.windows = windows;
        self
    }

    /// Replace the clipboard.
    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.services.clipboard = clipboard;
        self
    }

    pub fn vfs(&self) -> &Arc<VfsEngine> {
        &self.services.vfs
    }

    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.services.tools
    }

    pub fn system(&self) -> &SystemInfo {
        &self.services.system
    }

    /// A new terminal session in the home directory.
    pub fn open_session(&self) -> Session {
        Session::new(self.services.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kernel_boots_home() {
        let kernel = Kernel::transient().expect("kernel");
        let session = kernel.open_session();
        assert_eq!(session.cwd().to_string(), "/home/user");
        assert!(kernel.tools().contains("ls"));
        assert_eq!(kernel.system().hostname, "deskshell");
    }

    #[test]
    fn test_custom_user_and_host() {
        let kernel = Kernel::new(KernelConfig::default().with_user("ada").with_hostname("lovelace"))
            .expect("kernel");
        let session = kernel.open_session();
        assert_eq!(session.prompt(), "ada@lovelace:~$ ");
        assert_eq!(
            kernel.vfs().read_file(&VfsPath::parse("/etc/hostname")).expect("hostname"),
            "lovelace"
        );
    }

    #[test]
    fn test_sessions_share_one_tree() {
        let kernel = Kernel::transient().expect("kernel");
        let mut a = kernel.open_session();
        let b = kernel.open_session();
        assert!(a.submit("touch shared.txt").is_ok());
        assert!(kernel.vfs().exists(&b.cwd().join("shared.txt")));
    }

    #[test]
    fn test_seed_snapshot_restores_tree() {
        let source = Kernel::transient().expect("kernel");
        let mut session = source.open_session();
        assert!(session.submit("echo kept > note.txt").is_ok());
        let snapshot = source.vfs().export().expect("export");

        let restored = Kernel::new(KernelConfig::default().with_seed(snapshot)).expect("kernel");
        let note = restored.vfs().read_file(&VfsPath::parse("/home/user/note.txt"));
        assert_eq!(note.as_deref(), Ok("kept"));
    }

    #[test]
    fn test_seed_must_be_directory() {
        let file = NodeSnapshot {
            name: "x".into(),
            kind: deskshell_types::NodeKind::File,
            permissions: "-rw-r--r--".into(),
            owner: "user".into(),
            group: "user".into(),
            created_at: chrono::Utc::now(),
            content: Some("content".into()),
            children: None,
        };
        assert!(Kernel::new(KernelConfig::default().with_seed(file)).is_err());
    }
}
