//! Runtime context for CLI commands

use anyhow::{Context, Result};
use sl_core::{
    AccountId, AnalysisId, BuilderHandle, BuilderOptions, BuilderRegistry, Config, ServiceType,
};
use sl_render::{
    AuditWriter, Compiler, HttpRenderingService, InMemoryRenderingService, RenderingService,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Runtime context containing the loaded configuration and rendering service
pub struct RuntimeContext {
    /// The loaded configuration
    pub config: Config,

    /// Project root; relative config paths resolve against it
    pub root: PathBuf,

    /// Account every builder and service call uses
    pub account_id: AccountId,

    /// Rendering service selected by `service.type`
    pub service: Arc<dyn RenderingService>,

    /// Builders created during this invocation
    pub registry: BuilderRegistry,

    options: BuilderOptions,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        let account_id = config
            .account_id(args.account.as_deref())
            .context("Failed to resolve account")?;
        let options = config
            .builder_options()
            .context("Invalid layout configuration")?;
        let service = create_service(&config)?;
        let registry = BuilderRegistry::with_idle_ttl(config.idle_ttl());

        Ok(Self {
            config,
            root,
            account_id,
            service,
            registry,
            options,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Builder for an analysis under this context's account
    pub async fn builder_for(&self, analysis_id: &AnalysisId) -> BuilderHandle {
        self.registry
            .get_or_create(analysis_id, &self.account_id, &self.options)
            .await
    }

    /// Compiler wired to the configured service, timeout and audit directory
    pub fn compiler(&self) -> Compiler {
        let compiler =
            Compiler::new(Arc::clone(&self.service)).with_timeout(self.config.timeout());
        match self.config.audit_dir_absolute(&self.root) {
            Some(dir) => compiler.with_audit(AuditWriter::new(dir)),
            None => compiler,
        }
    }
}

fn create_service(config: &Config) -> Result<Arc<dyn RenderingService>> {
    match config.service.service_type {
        ServiceType::Http => {
            let endpoint = config
                .service
                .endpoint
                .as_deref()
                .context("service.endpoint is required for the http service")?;
            let service = HttpRenderingService::new(endpoint, config.timeout())
                .context("Failed to create HTTP rendering client")?;
            Ok(Arc::new(service))
        }
        ServiceType::Memory => Ok(Arc::new(InMemoryRenderingService::new())),
    }
}
