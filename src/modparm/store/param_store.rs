use super::backend::ParamBackend;
use super::{DiscoveryIssue, DiscoveryReport, HOTMOD_ENTRY};
use crate::error::Result;
use crate::model::{Module, Parameter};
use crate::radix::parse_leading_int;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct ParamStore<B: ParamBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    root: PathBuf,
    modules: Vec<Module>,
}

impl<B: ParamBackend> ParamStore<B> {
    pub fn with_backend(backend: B, root: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            root: root.into(),
            modules: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// `<root>/module/<module>/parameters`
    pub fn parameters_dir(&self, module: &str) -> PathBuf {
        self.root.join("module").join(module).join("parameters")
    }

    pub fn parameter_path(&self, module: &str, parameter: &str) -> PathBuf {
        self.parameters_dir(module).join(parameter)
    }

    /// Scans the parameter directory of every named module, in order, and
    /// replaces the current module set with the result.
    pub fn discover<S: AsRef<str>>(&mut self, module_names: &[S]) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();
        let mut modules = Vec::with_capacity(module_names.len());

        for name in module_names {
            let module = self.discover_module(name.as_ref(), &mut report);
            report.parameters += module.parameters.len();
            modules.push(module);
        }

        report.modules = modules.len();
        self.modules = modules;
        debug!(
            modules = report.modules,
            parameters = report.parameters,
            "discovery finished"
        );
        report
    }

    fn discover_module(&self, name: &str, report: &mut DiscoveryReport) -> Module {
        let mut module = Module::new(name);
        let dir = self.parameters_dir(name);

        let entries = match self.backend.list_entries(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(module = name, error = %e, "cannot list module parameters");
                report.issues.push(DiscoveryIssue::UnlistableModule {
                    module: name.to_string(),
                    reason: e.to_string(),
                });
                return module;
            }
        };

        for entry in entries.into_iter().filter(|e| e != HOTMOD_ENTRY) {
            let value = match self.backend.read_text(&dir.join(&entry)) {
                Ok(text) => parse_leading_int(&text).unwrap_or_else(|| {
                    debug!(module = name, parameter = %entry, "no leading integer, using 0");
                    0
                }),
                Err(e) => {
                    warn!(module = name, parameter = %entry, error = %e, "cannot read parameter");
                    report.issues.push(DiscoveryIssue::UnreadableParameter {
                        module: name.to_string(),
                        parameter: entry.clone(),
                        reason: e.to_string(),
                    });
                    0
                }
            };
            module.parameters.push(Parameter::new(name, entry, value));
        }

        module
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, module: usize) -> Option<&Module> {
        self.modules.get(module)
    }

    pub fn get(&self, module: usize, parameter: usize) -> Option<&Parameter> {
        self.modules.get(module)?.parameters.get(parameter)
    }

    pub fn get_mut(&mut self, module: usize, parameter: usize) -> Option<&mut Parameter> {
        self.modules.get_mut(module)?.parameters.get_mut(parameter)
    }

    /// Writes the in-memory value of a parameter to its backing file.
    ///
    /// Out-of-range indexes are a caller bug and persist nothing.
    pub fn persist(&self, module: usize, parameter: usize) -> Result<()> {
        let Some(param) = self.get(module, parameter) else {
            debug!(module, parameter, "persist on unknown index ignored");
            return Ok(());
        };

        let path = self.parameter_path(&param.module_name, &param.name);
        self.backend
            .write_text(&path, &format!("{}\n", param.value))?;
        info!(
            module = %param.module_name,
            parameter = %param.name,
            value = param.value,
            "parameter written"
        );
        Ok(())
    }
}
