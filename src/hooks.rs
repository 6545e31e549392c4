//! Post-creation lifecycle hooks.
//!
//! Hooks are registered at runtime in a [`HookRegistry`], either as Rust
//! closures or as executable scripts found in `.file-factory/hooks/`. A hook
//! receives the [`ArtifactCreationResult`] of the run; scripts get it as JSON
//! on stdin. Hook failures are logged and never fail the run.

use std::collections::HashMap;
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, warn};
use serde::Serialize;

use crate::error::{Error, Result};

/// The kind of artifact a generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    Component,
    Hook,
    Context,
    Page,
}

impl ArtifactType {
    /// The hook slot that fires for this artifact type only.
    pub fn hook_slot(self) -> HookSlot {
        match self {
            ArtifactType::Component => HookSlot::AfterComponent,
            ArtifactType::Hook => HookSlot::AfterHook,
            ArtifactType::Context => HookSlot::AfterContext,
            ArtifactType::Page => HookSlot::AfterPage,
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactType::Component => "component",
            ArtifactType::Hook => "hook",
            ArtifactType::Context => "context",
            ArtifactType::Page => "page",
        };
        f.write_str(name)
    }
}

/// What a hook is told about a finished generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCreationResult {
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    pub name: String,
    pub files: Vec<PathBuf>,
    pub package_root: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookSlot {
    /// Fires after every artifact, following the type-specific slot
    AfterCreate,
    AfterComponent,
    AfterHook,
    AfterContext,
    AfterPage,
}

impl HookSlot {
    pub const ALL: [HookSlot; 5] = [
        HookSlot::AfterCreate,
        HookSlot::AfterComponent,
        HookSlot::AfterHook,
        HookSlot::AfterContext,
        HookSlot::AfterPage,
    ];

    /// Script file name for this slot in a hooks directory.
    pub fn file_name(self) -> &'static str {
        match self {
            HookSlot::AfterCreate => "after_create",
            HookSlot::AfterComponent => "after_component",
            HookSlot::AfterHook => "after_hook",
            HookSlot::AfterContext => "after_context",
            HookSlot::AfterPage => "after_page",
        }
    }
}

/// A callable run after an artifact has been created.
pub trait LifecycleHook {
    fn name(&self) -> String;

    fn call(&self, result: &ArtifactCreationResult) -> anyhow::Result<()>;

    /// True if the hook executes an external program.
    fn is_script(&self) -> bool {
        false
    }
}

impl<F> LifecycleHook for F
where
    F: Fn(&ArtifactCreationResult) -> anyhow::Result<()>,
{
    fn name(&self) -> String {
        "closure".to_string()
    }

    fn call(&self, result: &ArtifactCreationResult) -> anyhow::Result<()> {
        self(result)
    }
}

/// An executable script receiving the creation result as JSON on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptHook {
    path: PathBuf,
}

impl ScriptHook {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs a hook script, feeding `context` to its stdin.
///
/// # Errors
/// * `Error::IoError` if the script cannot be spawned
/// * `Error::HookError` if it exits with a non-zero status
pub fn run_hook<P: AsRef<Path>>(script_path: P, context: &serde_json::Value) -> Result<()> {
    let script_path = script_path.as_ref();
    debug!("Running hook script {}", script_path.display());

    let mut child = Command::new(script_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?;

    // A script may exit without reading its input.
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(context.to_string().as_bytes()) {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(Error::IoError(e)),
            _ => {}
        }
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(Error::HookError(format!(
            "{} failed with status: {status}",
            script_path.display()
        )));
    }

    Ok(())
}

impl LifecycleHook for ScriptHook {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn call(&self, result: &ArtifactCreationResult) -> anyhow::Result<()> {
        let context = serde_json::to_value(result)?;
        run_hook(&self.path, &context)?;
        Ok(())
    }

    fn is_script(&self) -> bool {
        true
    }
}

/// Hooks per slot, run in registration order.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<HookSlot, Vec<Box<dyn LifecycleHook>>>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for slot in HookSlot::ALL {
            let names: Vec<String> = self.get(slot).iter().map(|hook| hook.name()).collect();
            if !names.is_empty() {
                map.entry(&slot, &names);
            }
        }
        map.finish()
    }
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H: LifecycleHook + 'static>(&mut self, slot: HookSlot, hook: H) -> &mut Self {
        self.hooks.entry(slot).or_default().push(Box::new(hook));
        self
    }

    pub fn get(&self, slot: HookSlot) -> &[Box<dyn LifecycleHook>] {
        self.hooks.get(&slot).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }

    /// True if any registered hook runs an external script.
    pub fn has_script_hooks(&self) -> bool {
        self.hooks.values().flatten().any(|hook| hook.is_script())
    }

    /// Registers every hook script present in `hooks_dir`, one per slot file.
    pub fn discover<P: AsRef<Path>>(&mut self, hooks_dir: P) -> &mut Self {
        let hooks_dir = hooks_dir.as_ref();
        for slot in HookSlot::ALL {
            let script = hooks_dir.join(slot.file_name());
            if script.is_file() {
                debug!("Found {} hook at {}", slot.file_name(), script.display());
                self.register(slot, ScriptHook::new(script));
            }
        }
        self
    }

    /// Layers `other` on top: every slot `other` fills replaces the same slot here.
    pub fn overlay(&mut self, other: HookRegistry) -> &mut Self {
        for (slot, hooks) in other.hooks {
            if !hooks.is_empty() {
                self.hooks.insert(slot, hooks);
            }
        }
        self
    }
}

/// Runs the type-specific hooks, then the `after_create` hooks.
///
/// Returns the number of hooks that failed; each failure is logged.
pub fn run_hooks(registry: &HookRegistry, result: &ArtifactCreationResult) -> usize {
    let slots = [result.artifact_type.hook_slot(), HookSlot::AfterCreate];
    let mut failures = 0;

    for slot in slots {
        for hook in registry.get(slot) {
            if let Err(e) = hook.call(result) {
                warn!("Hook {} ({}) failed: {e:#}", hook.name(), slot.file_name());
                failures += 1;
            }
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn creation_result(artifact_type: ArtifactType) -> ArtifactCreationResult {
        ArtifactCreationResult {
            artifact_type,
            name: "Button".to_string(),
            files: vec![PathBuf::from("/pkg/src/components/Button/Button.tsx")],
            package_root: PathBuf::from("/pkg"),
        }
    }

    #[test]
    fn test_result_serialization() {
        let value = serde_json::to_value(creation_result(ArtifactType::Component)).unwrap();
        assert_eq!(value["type"], "component");
        assert_eq!(value["packageRoot"], "/pkg");
        assert_eq!(value["name"], "Button");
    }

    #[test]
    fn test_type_specific_slot_runs_first() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = HookRegistry::new();

        let after_create = Rc::clone(&calls);
        registry.register(HookSlot::AfterCreate, move |_: &ArtifactCreationResult| -> anyhow::Result<()> {
            after_create.borrow_mut().push("after_create");
            Ok(())
        });
        let after_page = Rc::clone(&calls);
        registry.register(HookSlot::AfterPage, move |_: &ArtifactCreationResult| -> anyhow::Result<()> {
            after_page.borrow_mut().push("after_page");
            Ok(())
        });
        let after_component = Rc::clone(&calls);
        registry.register(HookSlot::AfterComponent, move |_: &ArtifactCreationResult| -> anyhow::Result<()> {
            after_component.borrow_mut().push("after_component");
            Ok(())
        });

        let failures = run_hooks(&registry, &creation_result(ArtifactType::Component));
        assert_eq!(failures, 0);
        assert_eq!(*calls.borrow(), vec!["after_component", "after_create"]);
    }

    #[test]
    fn test_failing_hook_does_not_stop_others() {
        let ran = Rc::new(RefCell::new(false));
        let mut registry = HookRegistry::new();
        registry.register(HookSlot::AfterHook, |_: &ArtifactCreationResult| -> anyhow::Result<()> {
            anyhow::bail!("boom")
        });
        let flag = Rc::clone(&ran);
        registry.register(HookSlot::AfterCreate, move |_: &ArtifactCreationResult| -> anyhow::Result<()> {
            *flag.borrow_mut() = true;
            Ok(())
        });

        assert_eq!(run_hooks(&registry, &creation_result(ArtifactType::Hook)), 1);
        assert!(*ran.borrow());
    }

    #[test]
    fn test_overlay_replaces_filled_slots() {
        let mut workspace = HookRegistry::new();
        workspace.register(HookSlot::AfterCreate, |_: &ArtifactCreationResult| -> anyhow::Result<()> {
            anyhow::bail!("workspace hook should be replaced")
        });
        workspace.register(HookSlot::AfterPage, |_: &ArtifactCreationResult| -> anyhow::Result<()> {
            Ok(())
        });
        let mut package = HookRegistry::new();
        package.register(HookSlot::AfterCreate, |_: &ArtifactCreationResult| -> anyhow::Result<()> {
            Ok(())
        });

        workspace.overlay(package);
        assert_eq!(workspace.get(HookSlot::AfterCreate).len(), 1);
        assert_eq!(workspace.get(HookSlot::AfterPage).len(), 1);
        assert_eq!(run_hooks(&workspace, &creation_result(ArtifactType::Page)), 0);
    }

    #[test]
    fn test_discover_missing_directory() {
        let mut registry = HookRegistry::new();
        registry.discover("/definitely/not/here");
        assert!(registry.is_empty());
        assert!(!registry.has_script_hooks());
    }
}
